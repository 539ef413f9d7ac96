#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::channel::oneshot;
use scroll_pager_core::config::TriggerConfig;
use scroll_pager_core::errors::ScrollPagerError;
use scroll_pager_core::geometry::{GeometrySnapshot, ScrollGeometry};
use scroll_pager_core::policy::PageRequest;
use scroll_pager_core::scheduler::ManualScheduler;
use scroll_pager_core::target::{Marker, ScrollContainer, ScrollListener};
use scroll_pager_core::trigger::{PageChange, ScrollTrigger};

pub type TestTrigger = ScrollTrigger<FakeContainer, FakeMarker, Rc<ManualScheduler>>;

struct ContainerInner {
    geometry: Cell<GeometrySnapshot>,
    listeners: RefCell<Vec<(u64, ScrollListener)>>,
    next_listener_id: Cell<u64>,
    is_event_target: bool,
}

/// In-memory scroll container, clones share the same identity.
#[derive(Clone)]
pub struct FakeContainer {
    inner: Rc<ContainerInner>,
}

impl FakeContainer {
    pub fn new(visible_height: f64) -> Self {
        Self::with_event_target(visible_height, true)
    }

    pub fn not_event_target(visible_height: f64) -> Self {
        Self::with_event_target(visible_height, false)
    }

    fn with_event_target(visible_height: f64, is_event_target: bool) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                geometry: Cell::new(GeometrySnapshot {
                    offset_top: 0.0,
                    visible_height,
                    scroll_height: visible_height * 10.0,
                    scroll_top: 0.0,
                }),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                is_event_target,
            }),
        }
    }

    /// Change the scroll offset and notify listeners like a browser would.
    pub fn scroll_to(&self, scroll_top: f64) {
        let mut geometry = self.inner.geometry.get();
        geometry.scroll_top = scroll_top;
        self.inner.geometry.set(geometry);
        self.fire_scroll();
    }

    pub fn fire_scroll(&self) {
        let listeners: Vec<ScrollListener> = self.inner.listeners.borrow().iter().map(|(_, listener)| listener.clone()).collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl PartialEq for FakeContainer {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for FakeContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeContainer").field("geometry", &self.inner.geometry.get()).finish()
    }
}

impl ScrollGeometry for FakeContainer {
    fn offset_top(&self) -> f64 {
        self.inner.geometry.get().offset_top
    }

    fn visible_height(&self) -> f64 {
        self.inner.geometry.get().visible_height
    }

    fn scroll_height(&self) -> f64 {
        self.inner.geometry.get().scroll_height
    }

    fn scroll_top(&self) -> f64 {
        self.inner.geometry.get().scroll_top
    }
}

pub struct FakeSubscription {
    container: Weak<ContainerInner>,
    id: u64,
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        if let Some(container) = self.container.upgrade() {
            container.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl ScrollContainer for FakeContainer {
    type Subscription = FakeSubscription;

    fn subscribe(&self, listener: ScrollListener) -> Result<FakeSubscription, ScrollPagerError> {
        if !self.inner.is_event_target {
            return Err(ScrollPagerError::NotEventTarget);
        }
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));
        Ok(FakeSubscription {
            container: Rc::downgrade(&self.inner),
            id,
        })
    }
}

/// Sentinel with a movable position and an optional parent container.
pub struct FakeMarker {
    offset_top: Rc<Cell<f64>>,
    parent: Option<FakeContainer>,
}

impl FakeMarker {
    /// Returns the marker and a handle to move it.
    pub fn new(offset_top: f64, parent: Option<FakeContainer>) -> (Self, Rc<Cell<f64>>) {
        let position = Rc::new(Cell::new(offset_top));
        (Self { offset_top: position.clone(), parent }, position)
    }
}

impl ScrollGeometry for FakeMarker {
    fn offset_top(&self) -> f64 {
        self.offset_top.get()
    }

    fn visible_height(&self) -> f64 {
        0.0
    }

    fn scroll_height(&self) -> f64 {
        0.0
    }

    fn scroll_top(&self) -> f64 {
        0.0
    }
}

impl Marker for FakeMarker {
    type Container = FakeContainer;

    fn parent_container(&self) -> Option<FakeContainer> {
        self.parent.clone()
    }
}

pub type CallLog = Rc<RefCell<Vec<PageRequest>>>;

/// Trigger whose callback records its arguments and returns [`PageChange::Immediate`].
pub fn immediate_trigger(config: TriggerConfig) -> (TestTrigger, Rc<ManualScheduler>, CallLog) {
    let scheduler = Rc::new(ManualScheduler::new());
    let calls = CallLog::default();
    let callback_calls = calls.clone();
    let trigger = ScrollTrigger::new(config, scheduler.clone(), move |request| {
        callback_calls.borrow_mut().push(request);
        PageChange::Immediate
    });
    (trigger, scheduler, calls)
}

/// Page fetches that complete when the test resolves them.
#[derive(Clone, Default)]
pub struct DeferredPages {
    senders: Rc<RefCell<Vec<oneshot::Sender<()>>>>,
}

impl DeferredPages {
    pub fn in_flight(&self) -> usize {
        self.senders.borrow().len()
    }

    pub fn resolve_next(&self) {
        let sender = self.senders.borrow_mut().remove(0);
        sender.send(()).expect("Page change future should be alive.");
    }
}

/// Trigger whose callback records its arguments and returns a [`PageChange::Deferred`] resolved
/// through the returned [`DeferredPages`].
pub fn deferred_trigger(config: TriggerConfig) -> (TestTrigger, Rc<ManualScheduler>, CallLog, DeferredPages) {
    let scheduler = Rc::new(ManualScheduler::new());
    let calls = CallLog::default();
    let pages = DeferredPages::default();
    let callback_calls = calls.clone();
    let callback_pages = pages.clone();
    let trigger = ScrollTrigger::new(config, scheduler.clone(), move |request| {
        callback_calls.borrow_mut().push(request);
        let (sender, receiver) = oneshot::channel::<()>();
        callback_pages.senders.borrow_mut().push(sender);
        PageChange::deferred(async move {
            let _ = receiver.await;
        })
    });
    (trigger, scheduler, calls, pages)
}
