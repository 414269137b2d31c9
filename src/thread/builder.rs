//! The daemon thread base.

use super::{JoinHandle, Thread, ThreadState};
use crate::errors::{SpawnError, ThreadResult};
use portable_atomic::{AtomicUsize, Ordering};

/// Sequence for default names, `Thread-0`, `Thread-1`, ...
static THREAD_INIT_NUMBER: AtomicUsize = AtomicUsize::new(0);

fn next_default_name() -> String {
    format!("Thread-{}", THREAD_INIT_NUMBER.fetch_add(1, Ordering::Relaxed))
}

type Body = Box<dyn FnOnce() + Send + 'static>;

/// A background thread that never blocks process exit.
///
/// Both constructors mark the thread as a daemon before anything else can
/// observe it, and there is no way to clear the flag afterwards. Starting,
/// joining and interrupting behave as for any other thread.
///
/// ```
/// use daemon_threads::DaemonThread;
///
/// let handle = DaemonThread::named("heartbeat")
///     .run(|| {
///         assert!(daemon_threads::thread::current().is_daemon());
///     })
///     .start()
///     .unwrap();
/// handle.join().unwrap();
/// ```
pub struct DaemonThread {
    thread: Thread,
    body: Option<Body>,
    stack_size: Option<usize>,
}

impl DaemonThread {
    /// Create a daemon thread running `body`, named by the default scheme.
    pub fn new<F>(body: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            thread: Thread::new_daemon(next_default_name()),
            body: Some(Box::new(body)),
            stack_size: None,
        }
    }

    /// Create a named daemon thread with no work attached yet.
    ///
    /// Attach work with [`DaemonThread::run`]; a thread started without a
    /// body terminates immediately.
    pub fn named<T: Into<String>>(name: T) -> Self {
        Self {
            thread: Thread::new_daemon(name.into()),
            body: None,
            stack_size: None,
        }
    }

    /// Set the work this thread executes, replacing any previous body.
    pub fn run<F>(mut self, body: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.body = Some(Box::new(body));
        self
    }

    /// Set the stack size in bytes for the OS thread.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    pub fn is_daemon(&self) -> bool {
        self.thread.is_daemon()
    }

    pub fn name(&self) -> &str {
        self.thread.name().unwrap_or_default()
    }

    /// Shared handle to this thread, usable before and after start.
    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// Spawn the OS thread and begin executing the body.
    ///
    /// The thread is alive as soon as this returns `Ok`. Dropping the
    /// returned handle detaches the thread.
    pub fn start(self) -> ThreadResult<JoinHandle> {
        let DaemonThread { thread, body, stack_size } = self;
        let name = thread.name().unwrap_or_default().to_owned();

        if name.contains('\0') {
            return Err(SpawnError::InvalidName(name).into());
        }

        let mut builder = std::thread::Builder::new().name(name);
        if let Some(size) = stack_size {
            if size == 0 {
                return Err(SpawnError::InvalidStackSize(size).into());
            }
            builder = builder.stack_size(size);
        }

        let worker = thread.clone();
        thread.set_state(ThreadState::Running);
        let spawned = builder.spawn(move || {
            worker.bind_current();
            let _terminated = TerminatedOnDrop(&worker);
            if let Some(body) = body {
                body();
            }
        });

        match spawned {
            Ok(inner) => Ok(JoinHandle::new(thread, inner)),
            Err(e) => {
                thread.set_state(ThreadState::New);
                Err(e.into())
            }
        }
    }
}

/// Marks the thread terminated when the body returns or unwinds.
struct TerminatedOnDrop<'a>(&'a Thread);

impl Drop for TerminatedOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set_state(ThreadState::Terminated);
    }
}
