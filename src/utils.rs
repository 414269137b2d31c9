//! Stateless thread helpers.

use crate::errors::ThreadResult;
use crate::pool::{WorkerPool, WorkerPoolBuilder};
use crate::time;
use std::time::Duration;

/// Create a pool of `threads_num` daemon workers named from `thread_name`.
///
/// Each worker's name is `thread_name` with its index (starting at 0)
/// substituted for the first `%d`. All workers are started before this
/// returns, and the pool keeps exactly that many for its whole life.
///
/// ```
/// let pool = daemon_threads::new_daemon_fixed_thread_executor("worker-%d", 4).unwrap();
/// let names: Vec<_> = pool.workers().iter().filter_map(|w| w.name()).collect();
/// assert_eq!(names, ["worker-0", "worker-1", "worker-2", "worker-3"]);
/// ```
pub fn new_daemon_fixed_thread_executor(thread_name: &str, threads_num: usize) -> ThreadResult<WorkerPool> {
    WorkerPoolBuilder::new(thread_name, threads_num).build()
}

/// Sleep for roughly `millis` milliseconds; not a precise timer.
///
/// An interrupt cuts the sleep short. It is logged rather than returned,
/// and the calling thread's interrupt flag is left set so outer code can
/// still react to it.
pub fn sleep(millis: u64) {
    if let Err(interrupted) = time::park_for(Duration::from_millis(millis)) {
        crate::thread::current().reassert_interrupt();
        log::error!("Current thread sleep error: {}", interrupted);
    }
}
