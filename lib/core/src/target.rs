use std::rc::Rc;

use crate::errors::ScrollPagerError;
use crate::geometry::ScrollGeometry;

/// Callback invoked on every scroll event of a container.
pub type ScrollListener = Rc<dyn Fn()>;

/// A scrollable region whose scroll events can be observed.
pub trait ScrollContainer: ScrollGeometry + PartialEq {
    /// Keeps the listener registered, dropping it detaches the listener.
    type Subscription;

    /// Register `listener` for the scroll events of this container.
    ///
    /// Returns [`ScrollPagerError::NotEventTarget`] when the container cannot emit events.
    fn subscribe(&self, listener: ScrollListener) -> Result<Self::Subscription, ScrollPagerError>;
}

/// The sentinel element whose position decides whether the next page is requested.
pub trait Marker: ScrollGeometry {
    type Container;

    /// Container used when the host does not provide one.
    fn parent_container(&self) -> Option<Self::Container>;
}
