//! Error types for thread and worker pool operations.
//!
//! The taxonomy is intentionally small: spawning can fail at the OS level
//! or on a rejected pool configuration, joining can observe a panic, and a
//! pool can refuse work once it has been shut down. Interruption is not an
//! error here; see [`crate::utils::sleep`].

#![allow(clippy::uninlined_format_args)]

use std::fmt;

/// Result type for threading operations.
pub type ThreadResult<T> = Result<T, ThreadError>;

/// Error type for all threading operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadError {
    /// Thread or pool creation errors
    Spawn(SpawnError),
    /// Thread joining and task result errors
    Join(JoinError),
    /// Worker pool submission errors
    Pool(PoolError),
}

/// Errors that can occur while creating threads or pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// The operating system refused to create the thread
    Os(String),
    /// Worker count must be positive
    InvalidPoolSize(usize),
    /// Thread name or naming template is unusable
    InvalidName(String),
    /// Requested stack size is zero
    InvalidStackSize(usize),
}

/// Errors observed when waiting on a thread or a submitted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The thread body or task panicked
    ThreadPanicked,
    /// The task was discarded before it ran
    Cancelled,
    /// Waiting timed out
    Timeout,
}

/// Errors returned by a worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The pool has been shut down and no longer accepts work
    Rejected,
}

impl fmt::Display for ThreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadError::Spawn(e) => write!(f, "Thread spawn error: {}", e),
            ThreadError::Join(e) => write!(f, "Thread join error: {}", e),
            ThreadError::Pool(e) => write!(f, "Worker pool error: {}", e),
        }
    }
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::Os(msg) => write!(f, "Failed to spawn OS thread: {}", msg),
            SpawnError::InvalidPoolSize(size) => write!(f, "Invalid pool size: {}", size),
            SpawnError::InvalidName(name) => write!(f, "Invalid thread name: {:?}", name),
            SpawnError::InvalidStackSize(size) => write!(f, "Invalid stack size: {}", size),
        }
    }
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::ThreadPanicked => write!(f, "Thread panicked during execution"),
            JoinError::Cancelled => write!(f, "Task was cancelled before it ran"),
            JoinError::Timeout => write!(f, "Join operation timed out"),
        }
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Rejected => write!(f, "Pool is shut down, task rejected"),
        }
    }
}

impl std::error::Error for ThreadError {}
impl std::error::Error for SpawnError {}
impl std::error::Error for JoinError {}
impl std::error::Error for PoolError {}

// Conversion implementations for ergonomic error handling

impl From<SpawnError> for ThreadError {
    fn from(error: SpawnError) -> Self {
        ThreadError::Spawn(error)
    }
}

impl From<JoinError> for ThreadError {
    fn from(error: JoinError) -> Self {
        ThreadError::Join(error)
    }
}

impl From<PoolError> for ThreadError {
    fn from(error: PoolError) -> Self {
        ThreadError::Pool(error)
    }
}

impl From<std::io::Error> for SpawnError {
    fn from(error: std::io::Error) -> Self {
        SpawnError::Os(error.to_string())
    }
}

impl From<std::io::Error> for ThreadError {
    fn from(error: std::io::Error) -> Self {
        ThreadError::Spawn(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_prefixed_by_category() {
        let err: ThreadError = SpawnError::InvalidPoolSize(0).into();
        assert_eq!(err.to_string(), "Thread spawn error: Invalid pool size: 0");

        let err: ThreadError = PoolError::Rejected.into();
        assert_eq!(err.to_string(), "Worker pool error: Pool is shut down, task rejected");
    }

    #[test]
    fn test_io_error_maps_to_spawn() {
        let io = std::io::Error::new(std::io::ErrorKind::WouldBlock, "no threads left");
        let err: ThreadError = io.into();
        assert!(matches!(err, ThreadError::Spawn(SpawnError::Os(ref msg)) if msg.contains("no threads left")));
    }
}
