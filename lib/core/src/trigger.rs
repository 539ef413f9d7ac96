use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use futures_util::future::{FutureExt, LocalBoxFuture};

use crate::config::TriggerConfig;
use crate::errors::ScrollPagerError;
use crate::policy::{evaluate, CheckOutcome, PageRequest, SkipReason};
use crate::scheduler::{Scheduler, Task};
use crate::target::{Marker, ScrollContainer, ScrollListener};

/// What the page change callback returned.
pub enum PageChange {
    /// The callback is done, the trigger re-arms right away.
    Immediate,
    /// The trigger stays disarmed until the future completes.
    Deferred(LocalBoxFuture<'static, ()>),
}

impl PageChange {
    pub fn deferred(future: impl Future<Output = ()> + 'static) -> Self {
        PageChange::Deferred(future.boxed_local())
    }
}

impl From<()> for PageChange {
    fn from(_: ()) -> Self {
        PageChange::Immediate
    }
}

impl fmt::Debug for PageChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageChange::Immediate => write!(f, "Immediate"),
            PageChange::Deferred(_) => write!(f, "Deferred(..)"),
        }
    }
}

pub type PageChangeFn = Rc<dyn Fn(PageRequest) -> PageChange>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    /// The callback is running.
    Invoking,
    Deferred(u64),
}

struct TriggerState<C: ScrollContainer, M, H> {
    config: TriggerConfig,
    marker: Option<M>,
    /// Container set by the host, the marker's parent is used when absent.
    container_ref: Option<C>,
    container: Option<C>,
    subscription: Option<C::Subscription>,
    scheduled: Option<H>,
    pending: Option<Pending>,
    attached: bool,
    last_result_id: u64,
}

struct Shared<C: ScrollContainer, M, S: Scheduler> {
    scheduler: S,
    on_page_change: RefCell<PageChangeFn>,
    state: RefCell<TriggerState<C, M, S::Handle>>,
}

impl<C: ScrollContainer, M, S: Scheduler> Drop for Shared<C, M, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().scheduled.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// Watches a scroll container and requests the next page whenever the marker enters its viewport.
///
/// At most one page change is in flight at any time: the trigger is disarmed while the callback runs
/// and, for [`PageChange::Deferred`] results, until the returned future completes. Once re-armed, a
/// check is scheduled so that a marker still in view requests another page.
///
/// Cloning yields another handle to the same trigger.
pub struct ScrollTrigger<C: ScrollContainer, M, S: Scheduler> {
    shared: Rc<Shared<C, M, S>>,
}

impl<C: ScrollContainer, M, S: Scheduler> Clone for ScrollTrigger<C, M, S> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<C, M, S> ScrollTrigger<C, M, S>
where
    C: ScrollContainer + Clone + 'static,
    M: Marker<Container = C> + 'static,
    S: Scheduler + 'static,
{
    pub fn new(
        config: TriggerConfig,
        scheduler: S,
        on_page_change: impl Fn(PageRequest) -> PageChange + 'static,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                on_page_change: RefCell::new(Rc::new(on_page_change)),
                state: RefCell::new(TriggerState {
                    config,
                    marker: None,
                    container_ref: None,
                    container: None,
                    subscription: None,
                    scheduled: None,
                    pending: None,
                    attached: false,
                    last_result_id: 0,
                }),
            }),
        }
    }

    /// Start watching: listen to `container`, or to the marker's parent when `None`, and evaluate
    /// immediately when `run_at_start` is set.
    ///
    /// `None` keeps a container set earlier through [`ScrollTrigger::set_container`].
    pub fn attach(&self, marker: M, container: Option<C>) {
        if self.is_attached() {
            self.detach();
        }
        let run_at_start = {
            let mut state = self.shared.state.borrow_mut();
            state.marker = Some(marker);
            if container.is_some() {
                state.container_ref = container;
            }
            state.attached = true;
            state.config.run_at_start
        };
        self.bind_container();
        log::debug!("Scroll trigger attached, run at start: {run_at_start}");
        if run_at_start {
            self.check();
        }
    }

    /// Replace the container set by the host, `None` falls back to the marker's parent.
    ///
    /// The listener moves to the new container before any further check. No check is performed
    /// unless `check_on_container_change` is set.
    pub fn set_container(&self, container: Option<C>) {
        let (attached, check_on_change) = {
            let mut state = self.shared.state.borrow_mut();
            state.container_ref = container;
            (state.attached, state.config.check_on_container_change)
        };
        if attached && self.bind_container() {
            log::debug!("Scroll container replaced.");
            if check_on_change {
                self.check();
            }
        }
    }

    /// Apply a new configuration, a changed item count schedules a check.
    pub fn update_config(&self, config: TriggerConfig) {
        let item_count_changed = {
            let mut state = self.shared.state.borrow_mut();
            let changed = state.config.item_count != config.item_count;
            state.config = config;
            changed
        };
        if item_count_changed {
            self.schedule_check();
        }
    }

    pub fn set_on_page_change(&self, on_page_change: impl Fn(PageRequest) -> PageChange + 'static) {
        *self.shared.on_page_change.borrow_mut() = Rc::new(on_page_change);
    }

    /// Replace any outstanding scheduled check with one running on the next tick.
    pub fn schedule_check(&self) {
        let previous = {
            let mut state = self.shared.state.borrow_mut();
            if !state.attached {
                return;
            }
            state.scheduled.take()
        };
        if let Some(handle) = previous {
            self.shared.scheduler.cancel(handle);
        }

        let weak = Rc::downgrade(&self.shared);
        let task: Task = Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                ScrollTrigger { shared }.run_scheduled_check();
            }
        });
        match self.shared.scheduler.defer(task) {
            Ok(handle) => self.shared.state.borrow_mut().scheduled = Some(handle),
            Err(e) => log::warn!("Failed to schedule scroll trigger check: {e}"),
        }
    }

    /// Evaluate the trigger now and invoke the page change callback when the marker is in view.
    pub fn check(&self) -> CheckOutcome {
        let outcome = {
            let state = self.shared.state.borrow();
            match (state.attached, &state.container, &state.marker) {
                (true, Some(container), Some(marker)) => evaluate(&state.config, state.pending.is_none(), container, marker),
                _ => CheckOutcome::Skipped(SkipReason::Detached),
            }
        };
        let CheckOutcome::Triggered(request) = outcome else {
            log::trace!("Scroll trigger check: {outcome:?}");
            return outcome;
        };

        // disarm before invoking, re-entrant checks are skipped as pending
        self.shared.state.borrow_mut().pending = Some(Pending::Invoking);
        let on_page_change = self.shared.on_page_change.borrow().clone();
        log::debug!("Requesting next page: {request:?}");
        match on_page_change(request) {
            PageChange::Immediate => self.settle(Pending::Invoking),
            PageChange::Deferred(future) => self.await_page_change(future),
        }
        outcome
    }

    /// Stop watching: drop the listener and any scheduled check. A pending page change still runs
    /// to completion but no longer re-arms this trigger.
    pub fn detach(&self) {
        let (scheduled, subscription) = {
            let mut state = self.shared.state.borrow_mut();
            state.attached = false;
            state.pending = None;
            state.marker = None;
            state.container = None;
            (state.scheduled.take(), state.subscription.take())
        };
        if let Some(handle) = scheduled {
            self.shared.scheduler.cancel(handle);
        }
        if subscription.is_some() {
            log::debug!("Scroll trigger detached.");
        }
        drop(subscription);
    }

    pub fn config(&self) -> TriggerConfig {
        self.shared.state.borrow().config.clone()
    }

    /// Container currently listened to.
    pub fn container(&self) -> Option<C> {
        self.shared.state.borrow().container.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.shared.state.borrow().attached
    }

    /// Whether a page change may be requested, false while one is in flight.
    pub fn is_armed(&self) -> bool {
        self.shared.state.borrow().pending.is_none()
    }

    pub fn has_scheduled_check(&self) -> bool {
        self.shared.state.borrow().scheduled.is_some()
    }

    fn run_scheduled_check(&self) {
        self.shared.state.borrow_mut().scheduled = None;
        self.check();
    }

    fn await_page_change(&self, future: LocalBoxFuture<'static, ()>) {
        let result_id = {
            let mut state = self.shared.state.borrow_mut();
            state.last_result_id += 1;
            let result_id = state.last_result_id;
            if state.pending == Some(Pending::Invoking) {
                state.pending = Some(Pending::Deferred(result_id));
            }
            result_id
        };
        let weak = Rc::downgrade(&self.shared);
        self.shared.scheduler.spawn(
            async move {
                future.await;
                if let Some(shared) = weak.upgrade() {
                    ScrollTrigger { shared }.settle(Pending::Deferred(result_id));
                }
            }
            .boxed_local(),
        );
    }

    /// Re-arm if `expected` is still the pending page change, then schedule a check.
    fn settle(&self, expected: Pending) {
        let rearmed = {
            let mut state = self.shared.state.borrow_mut();
            match state.pending == Some(expected) {
                true => {
                    state.pending = None;
                    true
                },
                false => false,
            }
        };
        match rearmed {
            true => self.schedule_check(),
            false => log::debug!("Ignoring settlement of a page change that is no longer pending."),
        }
    }

    /// Resolve the effective container and move the listener if it changed.
    fn bind_container(&self) -> bool {
        let resolved = {
            let state = self.shared.state.borrow();
            let resolved = state.container_ref.clone().or_else(|| state.marker.as_ref().and_then(M::parent_container));
            if resolved == state.container {
                return false;
            }
            resolved
        };

        let previous = self.shared.state.borrow_mut().subscription.take();
        drop(previous);

        let subscription = resolved.as_ref().and_then(|container| match container.subscribe(self.scroll_listener()) {
            Ok(subscription) => Some(subscription),
            Err(ScrollPagerError::NotEventTarget) => {
                log::debug!("Scroll container is not an event target, listener skipped.");
                None
            },
            Err(e) => {
                log::warn!("Failed to listen to scroll container: {e}");
                None
            },
        });
        let mut state = self.shared.state.borrow_mut();
        state.container = resolved;
        state.subscription = subscription;
        true
    }

    fn scroll_listener(&self) -> ScrollListener {
        let weak = Rc::downgrade(&self.shared);
        Rc::new(move || {
            if let Some(shared) = weak.upgrade() {
                ScrollTrigger { shared }.schedule_check();
            }
        })
    }
}

impl<C: ScrollContainer, M, S: Scheduler> fmt::Debug for ScrollTrigger<C, M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.state.try_borrow() {
            Ok(state) => f.debug_struct("ScrollTrigger")
                .field("config", &state.config)
                .field("attached", &state.attached)
                .field("armed", &state.pending.is_none())
                .field("scheduled", &state.scheduled.is_some())
                .finish(),
            Err(_) => f.debug_struct("ScrollTrigger").finish_non_exhaustive(),
        }
    }
}
