//! Result handles for jobs submitted to a pool.

use crate::errors::{JoinError, ThreadResult};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use super::Job;

/// Pending result of a job submitted with [`WorkerPool::submit`].
///
/// The value can be taken once; after that the handle reports
/// [`JoinError::Cancelled`].
///
/// [`WorkerPool::submit`]: super::WorkerPool::submit
pub struct TaskHandle<T> {
    result: Receiver<Result<T, JoinError>>,
}

impl<T: Send + 'static> TaskHandle<T> {
    /// Wrap `f` into a job whose outcome is delivered to the returned handle.
    ///
    /// A panic in `f` is caught and reported as [`JoinError::ThreadPanicked`].
    /// If the job is dropped without running, the handle reports
    /// [`JoinError::Cancelled`].
    pub(crate) fn wrap<F>(f: F) -> (Job, Self)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(f)).map_err(|_| JoinError::ThreadPanicked);
            let failed = outcome.is_err();
            let _ = tx.send(outcome);
            if failed {
                log::error!("Submitted task panicked");
            }
        });
        (job, Self { result: rx })
    }
}

impl<T> TaskHandle<T> {
    /// Block until the job has run and return its value.
    pub fn get(self) -> ThreadResult<T> {
        match self.result.recv() {
            Ok(outcome) => outcome.map_err(Into::into),
            Err(_) => Err(JoinError::Cancelled.into()),
        }
    }

    /// Like [`TaskHandle::get`], giving up after `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> ThreadResult<T> {
        match self.result.recv_timeout(timeout) {
            Ok(outcome) => outcome.map_err(Into::into),
            Err(RecvTimeoutError::Timeout) => Err(JoinError::Timeout.into()),
            Err(RecvTimeoutError::Disconnected) => Err(JoinError::Cancelled.into()),
        }
    }

    /// Whether a result is ready to be taken.
    pub fn is_done(&self) -> bool {
        !self.result.is_empty()
    }
}
