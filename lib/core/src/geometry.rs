/// Uniform measurements of a scroll target, in pixels.
///
/// Implemented by scroll containers (window, document or element) and by the sentinel marker. For
/// the marker only [`ScrollGeometry::offset_top`] is relevant.
pub trait ScrollGeometry {
    /// Position of the target relative to its offset parent.
    fn offset_top(&self) -> f64;
    /// Height of the visible viewport of the target.
    fn visible_height(&self) -> f64;
    /// Total height of the scrollable content.
    fn scroll_height(&self) -> f64;
    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f64;
}

impl<G: ScrollGeometry + ?Sized> ScrollGeometry for &G {
    fn offset_top(&self) -> f64 {
        (**self).offset_top()
    }

    fn visible_height(&self) -> f64 {
        (**self).visible_height()
    }

    fn scroll_height(&self) -> f64 {
        (**self).scroll_height()
    }

    fn scroll_top(&self) -> f64 {
        (**self).scroll_top()
    }
}

/// Frozen measurements of a target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometrySnapshot {
    pub offset_top: f64,
    pub visible_height: f64,
    pub scroll_height: f64,
    pub scroll_top: f64,
}

impl GeometrySnapshot {
    pub fn of<G: ScrollGeometry + ?Sized>(target: &G) -> Self {
        Self {
            offset_top: target.offset_top(),
            visible_height: target.visible_height(),
            scroll_height: target.scroll_height(),
            scroll_top: target.scroll_top(),
        }
    }
}

impl ScrollGeometry for GeometrySnapshot {
    fn offset_top(&self) -> f64 {
        self.offset_top
    }

    fn visible_height(&self) -> f64 {
        self.visible_height
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }
}

/// Vertical range of a container's content that is currently visible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    pub top: f64,
    pub bottom: f64,
}

impl ViewportBounds {
    pub fn of<G: ScrollGeometry + ?Sized>(container: &G) -> Self {
        let top = container.offset_top() + container.scroll_top();
        Self {
            top,
            bottom: top + container.visible_height(),
        }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, point: f64) -> bool {
        point >= self.top && point <= self.bottom
    }
}

/// Position compared against the container bounds: the marker's top shifted by `trigger_offset`.
pub fn trigger_point<G: ScrollGeometry + ?Sized>(marker: &G, trigger_offset: f64) -> f64 {
    marker.offset_top() + trigger_offset
}

#[cfg(test)]
mod tests {
    use crate::geometry::{trigger_point, GeometrySnapshot, ViewportBounds};

    fn container(offset_top: f64, visible_height: f64, scroll_top: f64) -> GeometrySnapshot {
        GeometrySnapshot {
            offset_top,
            visible_height,
            scroll_height: visible_height * 4.0,
            scroll_top,
        }
    }

    #[test]
    fn test_viewport_bounds_of() {
        assert_eq!(
            ViewportBounds::of(&container(0.0, 500.0, 0.0)),
            ViewportBounds { top: 0.0, bottom: 500.0 }
        );
        assert_eq!(
            ViewportBounds::of(&container(40.0, 300.0, 120.0)),
            ViewportBounds { top: 160.0, bottom: 460.0 }
        );
    }

    #[test]
    fn test_viewport_bounds_contains_is_inclusive() {
        let bounds = ViewportBounds { top: 100.0, bottom: 600.0 };
        assert!(bounds.contains(100.0));
        assert!(bounds.contains(600.0));
        assert!(bounds.contains(350.5));
        assert!(!bounds.contains(99.9));
        assert!(!bounds.contains(600.1));
    }

    #[test]
    fn test_trigger_point() {
        let marker = GeometrySnapshot { offset_top: 480.0, ..Default::default() };
        assert_eq!(trigger_point(&marker, 0.0), 480.0);
        assert_eq!(trigger_point(&marker, -80.0), 400.0);
        assert_eq!(trigger_point(&marker, 1000.0), 1480.0);
    }

    #[test]
    fn test_snapshot_of_reference() {
        let target = container(10.0, 200.0, 30.0);
        let by_ref = &target;
        assert_eq!(GeometrySnapshot::of(&by_ref), target);
    }
}
