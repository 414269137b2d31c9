//! Fixed-size pools of named daemon workers.
//!
//! A pool owns exactly as many workers as it was created with, starts them
//! all up front and never grows or shrinks. Workers are [`DaemonThread`]s,
//! so a pool that is never shut down does not keep the process alive.
//! Jobs are handed out in FIFO order from a shared queue; completion order
//! across workers is unspecified.

use crate::errors::{PoolError, SpawnError, ThreadResult};
use crate::thread::{DaemonThread, Thread};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use portable_atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub mod format;
pub mod task;
mod worker;

pub use format::NameFormat;
pub use task::TaskHandle;

use worker::Worker;

/// A unit of work executed by a pool worker.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum PoolState {
    /// Accepting and running jobs
    Running = 0,
    /// No new jobs; queued jobs still run
    Shutdown = 1,
    /// No new jobs; queue discarded, workers interrupted
    Stop = 2,
}

/// Configuration for a [`WorkerPool`].
///
/// ```
/// use daemon_threads::WorkerPoolBuilder;
///
/// let pool = WorkerPoolBuilder::new("io-%d", 2)
///     .stack_size(512 * 1024)
///     .build()
///     .unwrap();
/// assert_eq!(pool.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WorkerPoolBuilder {
    name_format: String,
    threads: usize,
    stack_size: Option<usize>,
}

impl WorkerPoolBuilder {
    /// Builder for a pool of `threads` workers named after `name_format`.
    pub fn new<T: Into<String>>(name_format: T, threads: usize) -> Self {
        Self {
            name_format: name_format.into(),
            threads,
            stack_size: None,
        }
    }

    /// Set the stack size in bytes for every worker.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Validate the configuration and start all workers.
    ///
    /// Fails with [`SpawnError::InvalidPoolSize`] for zero workers and
    /// [`SpawnError::InvalidName`] for an empty template. If a worker fails
    /// to spawn, the ones already started exit on their own.
    pub fn build(self) -> ThreadResult<WorkerPool> {
        if self.threads == 0 {
            return Err(SpawnError::InvalidPoolSize(self.threads).into());
        }
        let format = NameFormat::parse(&self.name_format)?;

        let (sender, queue) = crossbeam_channel::unbounded::<Job>();
        let (exit_tx, exits) = crossbeam_channel::bounded::<()>(0);
        let state = Arc::new(AtomicU8::new(PoolState::Running as u8));

        let mut workers = Vec::with_capacity(self.threads);
        for index in 0..self.threads {
            let worker = Worker {
                jobs: queue.clone(),
                state: Arc::clone(&state),
                _exit: exit_tx.clone(),
            };
            let mut daemon = DaemonThread::named(format.format(index)).run(move || worker.run());
            if let Some(size) = self.stack_size {
                daemon = daemon.stack_size(size);
            }
            let thread = daemon.thread().clone();
            daemon.start()?;
            workers.push(thread);
        }

        log::debug!(
            "started pool {:?} with {} daemon workers",
            self.name_format,
            workers.len()
        );

        Ok(WorkerPool {
            name_format: format,
            workers,
            sender: spin::Mutex::new(Some(sender)),
            queue,
            exits,
            state,
        })
    }
}

/// Handle to a fixed-size pool of daemon workers.
///
/// Dropping the handle closes the queue: workers finish what is already
/// queued and exit. Nothing waits for them.
pub struct WorkerPool {
    name_format: NameFormat,
    workers: Vec<Thread>,
    sender: spin::Mutex<Option<Sender<Job>>>,
    queue: Receiver<Job>,
    exits: Receiver<()>,
    state: Arc<AtomicU8>,
}

impl WorkerPool {
    /// Number of workers, fixed at creation.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// The parsed template the workers were named from.
    pub fn name_format(&self) -> &NameFormat {
        &self.name_format
    }

    /// Handles to the workers, in creation order.
    pub fn workers(&self) -> &[Thread] {
        &self.workers
    }

    /// Number of workers that have not yet exited.
    pub fn live_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.is_alive()).count()
    }

    /// Queue `f` for execution on some worker.
    pub fn execute<F>(&self, f: F) -> ThreadResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.dispatch(Box::new(f))
    }

    /// Queue `f` and return a handle to its result.
    pub fn submit<F, T>(&self, f: F) -> ThreadResult<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (job, handle) = TaskHandle::wrap(f);
        self.dispatch(job)?;
        Ok(handle)
    }

    fn dispatch(&self, job: Job) -> ThreadResult<()> {
        let sender = self.sender.lock().as_ref().cloned().ok_or(PoolError::Rejected)?;
        sender.send(job).map_err(|_| PoolError::Rejected)?;
        Ok(())
    }

    /// Stop accepting jobs. Already queued jobs still run; does not wait.
    pub fn shutdown(&self) {
        let _ = self.state.compare_exchange(
            PoolState::Running as u8,
            PoolState::Shutdown as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.close();
    }

    /// Stop accepting jobs, discard the queue and interrupt every worker.
    ///
    /// Returns the jobs that never started. Running jobs are only asked to
    /// stop; they finish when they observe the interrupt or return.
    pub fn shutdown_now(&self) -> Vec<Job> {
        self.state.store(PoolState::Stop as u8, Ordering::Release);
        self.close();
        let pending: Vec<Job> = self.queue.try_iter().collect();
        for worker in &self.workers {
            worker.interrupt();
        }
        log::debug!("discarded {} queued jobs", pending.len());
        pending
    }

    fn close(&self) {
        if self.sender.lock().take().is_some() {
            log::debug!("pool {:?} shutting down", self.name_format);
        }
    }

    /// `true` once `shutdown` or `shutdown_now` has been called.
    pub fn is_shutdown(&self) -> bool {
        self.state.load(Ordering::Acquire) != PoolState::Running as u8
    }

    /// Whether every worker has exited.
    pub fn is_terminated(&self) -> bool {
        matches!(self.exits.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Block until every worker has exited or `timeout` elapses.
    ///
    /// Returns `true` if the pool terminated.
    pub fn await_termination(&self, timeout: Duration) -> bool {
        matches!(self.exits.recv_timeout(timeout), Err(RecvTimeoutError::Disconnected))
    }
}
