#![deny(unsafe_code)]
#![forbid(unreachable_pub)]

//! Thread lifecycle primitives for long-running services.
//!
//! Background threads in a server should never be the reason the process
//! fails to exit. This crate makes that property structural:
//!
//! - [`DaemonThread`] is the base every long-lived background thread is
//!   built from. It is a daemon from the moment it is constructed and is
//!   never joined implicitly.
//! - [`new_daemon_fixed_thread_executor`] creates a fixed-size pool of
//!   named daemon workers.
//! - [`sleep`] is a coarse delay that treats interruption as a diagnostic,
//!   not a failure.
//!
//! Cancellation is cooperative: [`Thread::interrupt`] sets a flag and wakes
//! the target out of [`time::park_for`]; the target decides how to react.
//!
//! # Quick Start
//!
//! ```
//! use daemon_threads::{new_daemon_fixed_thread_executor, sleep, DaemonThread};
//!
//! let heartbeat = DaemonThread::named("heartbeat")
//!     .run(|| sleep(10))
//!     .start()
//!     .expect("failed to start heartbeat");
//!
//! let pool = new_daemon_fixed_thread_executor("worker-%d", 4).expect("failed to create pool");
//! let answer = pool.submit(|| 6 * 7).unwrap();
//! assert_eq!(answer.get(), Ok(42));
//!
//! heartbeat.join().unwrap();
//! ```

pub mod errors;
pub mod pool;
pub mod thread;
pub mod time;
pub mod utils;

#[cfg(test)]
mod tests;

// ============================================================================
// Public API
// ============================================================================

// Threads
pub use thread::{DaemonThread, JoinHandle, Thread, ThreadId, ThreadState};

// Pools
pub use pool::{Job, NameFormat, TaskHandle, WorkerPool, WorkerPoolBuilder};

// Helpers
pub use utils::{new_daemon_fixed_thread_executor, sleep};

// Errors
pub use errors::{JoinError, PoolError, SpawnError, ThreadError, ThreadResult};
