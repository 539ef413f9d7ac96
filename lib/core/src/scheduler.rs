use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_util::future::LocalBoxFuture;
use futures_util::task::noop_waker_ref;

use crate::errors::ScrollPagerError;

pub type Task = Box<dyn FnOnce()>;

/// Deferred execution on the host's single threaded event queue.
pub trait Scheduler {
    type Handle;

    /// Queue `task` for a later tick. Implementations never run it synchronously.
    fn defer(&self, task: Task) -> Result<Self::Handle, ScrollPagerError>;

    /// Cancel a task queued with [`Scheduler::defer`]. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);

    /// Drive `future` to completion in the background.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    type Handle = S::Handle;

    fn defer(&self, task: Task) -> Result<Self::Handle, ScrollPagerError> {
        (**self).defer(task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle)
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        (**self).spawn(future)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Scheduler driven explicitly by its owner, for headless hosts and tests.
///
/// Tasks deferred while a tick runs are executed on the next tick.
#[derive(Default)]
pub struct ManualScheduler {
    next_id: Cell<u64>,
    queue: RefCell<VecDeque<(TaskId, Task)>>,
    futures: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deferred tasks waiting for a tick.
    pub fn pending_tasks(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of spawned futures that did not complete yet.
    pub fn pending_futures(&self) -> usize {
        self.futures.borrow().len()
    }

    /// Run the tasks queued before this call, returns how many ran.
    pub fn run_tick(&self) -> usize {
        let tick_ids: Vec<TaskId> = self.queue.borrow().iter().map(|(id, _)| *id).collect();
        let mut ran = 0;
        for id in tick_ids {
            // an earlier task of the same tick may have cancelled this one
            let task = {
                let mut queue = self.queue.borrow_mut();
                queue.iter().position(|(queued_id, _)| *queued_id == id).and_then(|index| queue.remove(index))
            };
            if let Some((_, task)) = task {
                task();
                ran += 1;
            }
        }
        ran
    }

    /// Poll every spawned future once, returns how many completed.
    pub fn poll_futures(&self) -> usize {
        let mut futures = std::mem::take(&mut *self.futures.borrow_mut());
        let mut context = Context::from_waker(noop_waker_ref());
        let before = futures.len();
        futures.retain_mut(|future| future.as_mut().poll(&mut context).is_pending());
        let completed = before - futures.len();
        // keep futures spawned while polling
        self.futures.borrow_mut().splice(0..0, futures);
        completed
    }

    /// Alternate polling and ticks until neither makes progress, returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let completed = self.poll_futures();
            let tick = self.run_tick();
            ran += tick;
            if completed == 0 && tick == 0 {
                return ran;
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TaskId;

    fn defer(&self, task: Task) -> Result<TaskId, ScrollPagerError> {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push_back((id, task));
        Ok(id)
    }

    fn cancel(&self, handle: TaskId) {
        self.queue.borrow_mut().retain(|(id, _)| *id != handle);
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        self.futures.borrow_mut().push(future);
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("pending_tasks", &self.pending_tasks())
            .field("pending_futures", &self.pending_futures())
            .finish()
    }
}
