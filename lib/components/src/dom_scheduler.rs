use std::time::Duration;

use futures_util::future::LocalBoxFuture;
use leptos::prelude::{set_timeout_with_handle, TimeoutHandle};
use leptos::task::spawn_local;
use scroll_pager_core::errors::ScrollPagerError;
use scroll_pager_core::scheduler::{Scheduler, Task};

/// Runs deferred checks on the next turn of the browser event loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomScheduler;

impl Scheduler for DomScheduler {
    type Handle = TimeoutHandle;

    fn defer(&self, task: Task) -> Result<TimeoutHandle, ScrollPagerError> {
        set_timeout_with_handle(task, Duration::ZERO).map_err(|e| ScrollPagerError::Schedule(format!("{e:?}")))
    }

    fn cancel(&self, handle: TimeoutHandle) {
        handle.clear();
    }

    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        spawn_local(future);
    }
}
