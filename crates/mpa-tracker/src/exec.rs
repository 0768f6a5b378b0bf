//! Background dispatch for fire-and-forget platform requests.
//!
//! A quiet-mode request may block inside the platform, so the tracker never
//! runs it on the caller's thread. Dispatch goes through a small trait so
//! tests can run requests inline and deterministically, and every dispatch
//! returns a [`TaskHandle`] that keeps the failure path inspectable even
//! when the caller discards the outcome.

use crate::error::{Error, Result};

/// A one-way unit of work handed to a dispatcher.
pub type Task = Box<dyn FnOnce() -> mpa_platform::Result<()> + Send>;

/// Dispatches one-way tasks onto an execution context.
pub trait Dispatcher: Send + Sync {
    /// Schedules `task` and returns a handle to its outcome.
    fn dispatch(&self, task: Task) -> TaskHandle;
}

/// Handle to one dispatched task.
///
/// Callers that only need fire-and-forget semantics may drop it; the task
/// keeps running.
pub struct TaskHandle {
    inner: HandleInner,
}

enum HandleInner {
    /// Task already ran on the calling thread (inline dispatch).
    Completed(Option<mpa_platform::Error>),
    /// Task running on the tokio blocking pool.
    Tokio(tokio::task::JoinHandle<mpa_platform::Result<()>>),
}

impl TaskHandle {
    /// True once the task has run to completion, successfully or not.
    pub fn is_finished(&self) -> bool {
        match &self.inner {
            HandleInner::Completed(_) => true,
            HandleInner::Tokio(handle) => handle.is_finished(),
        }
    }

    /// Waits for the task and surfaces its outcome.
    ///
    /// # Errors
    ///
    /// `Error::Platform` when the task itself failed, `Error::Background`
    /// when it panicked or was cancelled.
    pub async fn join(self) -> Result<()> {
        match self.inner {
            HandleInner::Completed(None) => Ok(()),
            HandleInner::Completed(Some(err)) => Err(err.into()),
            HandleInner::Tokio(handle) => match handle.await {
                Ok(outcome) => outcome.map_err(Error::from),
                Err(join_err) => Err(Error::Background(join_err.to_string())),
            },
        }
    }
}

/// Dispatches onto the tokio blocking pool.
#[derive(Clone)]
pub struct TokioDispatcher {
    handle: tokio::runtime::Handle,
}

impl TokioDispatcher {
    /// Uses the ambient tokio runtime.
    ///
    /// # Errors
    ///
    /// `Error::Config` when called outside a runtime.
    pub fn current() -> Result<Self> {
        tokio::runtime::Handle::try_current()
            .map(|handle| Self { handle })
            .map_err(|_| Error::Config("no ambient tokio runtime".into()))
    }

    /// Uses an explicit runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, task: Task) -> TaskHandle {
        TaskHandle {
            inner: HandleInner::Tokio(self.handle.spawn_blocking(task)),
        }
    }
}

/// Runs tasks immediately on the calling thread.
///
/// For tests that want deterministic ordering without a runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineDispatcher;

impl Dispatcher for InlineDispatcher {
    fn dispatch(&self, task: Task) -> TaskHandle {
        TaskHandle {
            inner: HandleInner::Completed(task().err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_inline_dispatch_runs_immediately() {
        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = Arc::clone(&ran);

        let handle = InlineDispatcher.dispatch(Box::new(move || {
            ran_clone.store(true, Ordering::SeqCst);
            Ok(())
        }));

        assert!(ran.load(Ordering::SeqCst), "inline task should run synchronously");
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_inline_dispatch_surfaces_task_error() {
        let handle = InlineDispatcher.dispatch(Box::new(|| {
            Err(mpa_platform::Error::ProfileState("boom".into()))
        }));

        let outcome = handle.join().await;
        assert!(matches!(outcome, Err(Error::Platform(_))));
    }

    #[tokio::test]
    async fn test_tokio_dispatch_joins() {
        let dispatcher = TokioDispatcher::current().unwrap();
        let handle = dispatcher.dispatch(Box::new(|| Ok(())));

        handle.join().await.unwrap();
    }

    #[test]
    fn test_tokio_dispatcher_requires_runtime() {
        assert!(matches!(TokioDispatcher::current(), Err(Error::Config(_))));
    }
}
