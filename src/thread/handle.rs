//! Join handle for a started daemon thread.

use super::Thread;
use crate::errors::{JoinError, ThreadResult};

/// A handle that can be used to wait for a daemon thread to complete.
///
/// Dropping the handle detaches the thread; it keeps running and does not
/// delay process exit.
#[derive(Debug)]
pub struct JoinHandle {
    thread: Thread,
    inner: std::thread::JoinHandle<()>,
}

impl JoinHandle {
    pub(super) fn new(thread: Thread, inner: std::thread::JoinHandle<()>) -> Self {
        Self { thread, inner }
    }

    /// Wait for the thread to complete.
    ///
    /// # Returns
    ///
    /// `Ok(())` when the body returned, or [`JoinError::ThreadPanicked`]
    /// if it unwound.
    pub fn join(self) -> ThreadResult<()> {
        self.inner
            .join()
            .map_err(|_| JoinError::ThreadPanicked.into())
    }

    /// Check if the thread has finished without blocking.
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{JoinError, ThreadError};
    use crate::thread::{DaemonThread, ThreadState};

    #[test]
    fn test_join_reports_panic() {
        let handle = DaemonThread::new(|| panic!("boom")).start().unwrap();
        let thread = handle.thread().clone();
        assert_eq!(handle.join(), Err(ThreadError::Join(JoinError::ThreadPanicked)));
        assert_eq!(thread.state(), ThreadState::Terminated);
    }

    #[test]
    fn test_alive_until_released() {
        let (tx, rx) = crossbeam_channel::bounded::<()>(0);
        let handle = DaemonThread::new(move || {
            let _ = rx.recv();
        })
        .start()
        .unwrap();

        assert!(handle.thread().is_alive());
        assert!(!handle.is_finished());
        drop(tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_debug_shows_thread() {
        let handle = DaemonThread::named("debug-me").start().unwrap();
        let text = format!("{:?}", handle);
        assert!(text.starts_with("JoinHandle"));
        assert!(text.contains("\"debug-me\""));
        handle.join().unwrap();
    }

    #[test]
    fn test_start_result_unwrap_err() {
        let err = DaemonThread::named("bad\0name").start().unwrap_err();
        assert!(matches!(err, ThreadError::Spawn(_)));
        let ok = DaemonThread::new(|| {}).start();
        assert!(format!("{:?}", ok).starts_with("Ok(JoinHandle"));
        ok.unwrap().join().unwrap();
    }
}
