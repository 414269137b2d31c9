//! Worker loop run by every pool thread.

use super::{Job, PoolState};
use crate::thread;
use crossbeam_channel::{Receiver, Sender};
use portable_atomic::{AtomicU8, Ordering};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub(super) struct Worker {
    pub(super) jobs: Receiver<Job>,
    pub(super) state: Arc<AtomicU8>,
    // Never sent on; dropping it tells the pool this worker has exited.
    pub(super) _exit: Sender<()>,
}

impl Worker {
    /// Serve jobs until the queue is closed and drained.
    ///
    /// A panicking job is logged and the worker keeps serving, so the pool
    /// never loses a thread.
    pub(super) fn run(self) {
        let me = thread::current();
        let name = me.name().unwrap_or_default();
        log::debug!("worker {} started", name);

        for job in self.jobs.iter() {
            // Interrupts are meant for the job they hit, not the next one.
            if self.state.load(Ordering::Acquire) != PoolState::Stop as u8 {
                thread::interrupted();
            }
            log::trace!("worker {} picked up a job", name);
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                log::error!("job panicked on worker {}", name);
            }
        }

        log::debug!("worker {} exiting", name);
    }
}
