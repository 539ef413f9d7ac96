use scroll_pager_core::errors::ScrollPagerError;
use scroll_pager_core::geometry::{GeometrySnapshot, ScrollGeometry};
use scroll_pager_core::target::{Marker, ScrollContainer, ScrollListener};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, EventTarget, HtmlDivElement, HtmlElement, Window};

const SCROLL_EVENT: &str = "scroll";

/// Scroll container in the browser: the window, the document or an element.
///
/// Window and document are measured through the document body, the window reports its inner height
/// both as visible and as scroll height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollTarget {
    Window(Window),
    Document(Document),
    Element(HtmlElement),
}

impl ScrollTarget {
    pub fn window() -> Option<Self> {
        web_sys::window().map(ScrollTarget::Window)
    }

    pub fn document() -> Option<Self> {
        web_sys::window().and_then(|window| window.document()).map(ScrollTarget::Document)
    }

    /// The document body as an element, for pages whose body is the scrolling element.
    pub fn body() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
            .map(ScrollTarget::Element)
    }

    /// Current measurements of the target.
    pub fn measure(&self) -> GeometrySnapshot {
        let measured = self.measured_element().map(|element| element_geometry(&element)).unwrap_or_default();
        let window_height = match self {
            ScrollTarget::Window(window) => Some(inner_height(window)),
            _ => None,
        };
        dispatch_geometry(measured, window_height)
    }

    fn measured_element(&self) -> Option<HtmlElement> {
        match self {
            ScrollTarget::Window(window) => window.document().and_then(|document| document.body()),
            ScrollTarget::Document(document) => document.body(),
            ScrollTarget::Element(element) => Some(element.clone()),
        }
    }

    fn event_target(&self) -> &EventTarget {
        match self {
            ScrollTarget::Window(window) => window.as_ref(),
            ScrollTarget::Document(document) => document.as_ref(),
            ScrollTarget::Element(element) => element.as_ref(),
        }
    }
}

impl From<HtmlElement> for ScrollTarget {
    fn from(element: HtmlElement) -> Self {
        ScrollTarget::Element(element)
    }
}

fn inner_height(window: &Window) -> f64 {
    window.inner_height().ok().and_then(|height| height.as_f64()).unwrap_or_default()
}

fn element_geometry(element: &HtmlElement) -> GeometrySnapshot {
    GeometrySnapshot {
        offset_top: f64::from(element.offset_top()),
        visible_height: f64::from(element.client_height()),
        scroll_height: f64::from(element.scroll_height()),
        scroll_top: f64::from(element.scroll_top()),
    }
}

/// Geometry of a target from the measurements of its element (the body for window and document).
///
/// A window reports its inner height as both visible and scroll height.
pub fn dispatch_geometry(measured: GeometrySnapshot, window_height: Option<f64>) -> GeometrySnapshot {
    match window_height {
        Some(height) => GeometrySnapshot {
            visible_height: height,
            scroll_height: height,
            ..measured
        },
        None => measured,
    }
}

impl ScrollGeometry for ScrollTarget {
    fn offset_top(&self) -> f64 {
        self.measure().offset_top
    }

    fn visible_height(&self) -> f64 {
        self.measure().visible_height
    }

    fn scroll_height(&self) -> f64 {
        self.measure().scroll_height
    }

    fn scroll_top(&self) -> f64 {
        self.measure().scroll_top
    }
}

/// Registered scroll listener, removed from its target when dropped.
pub struct ScrollSubscription {
    target: EventTarget,
    closure: Closure<dyn Fn()>,
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.target.remove_event_listener_with_callback(SCROLL_EVENT, self.closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to remove scroll listener: {e:?}");
        }
    }
}

impl ScrollContainer for ScrollTarget {
    type Subscription = ScrollSubscription;

    fn subscribe(&self, listener: ScrollListener) -> Result<ScrollSubscription, ScrollPagerError> {
        let target = self.event_target().clone();
        let closure = Closure::<dyn Fn()>::new(move || listener());
        target
            .add_event_listener_with_callback(SCROLL_EVENT, closure.as_ref().unchecked_ref())
            .map_err(|e| ScrollPagerError::Listener(format!("{e:?}")))?;
        Ok(ScrollSubscription { target, closure })
    }
}

/// The rendered sentinel element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentinel(HtmlElement);

impl From<HtmlDivElement> for Sentinel {
    fn from(element: HtmlDivElement) -> Self {
        Self(element.into())
    }
}

impl ScrollGeometry for Sentinel {
    fn offset_top(&self) -> f64 {
        f64::from(self.0.offset_top())
    }

    fn visible_height(&self) -> f64 {
        f64::from(self.0.client_height())
    }

    fn scroll_height(&self) -> f64 {
        f64::from(self.0.scroll_height())
    }

    fn scroll_top(&self) -> f64 {
        f64::from(self.0.scroll_top())
    }
}

impl Marker for Sentinel {
    type Container = ScrollTarget;

    fn parent_container(&self) -> Option<ScrollTarget> {
        self.0
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .map(ScrollTarget::Element)
    }
}
