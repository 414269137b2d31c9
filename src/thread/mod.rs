//! Daemon threads and cooperative interruption.
//!
//! Every thread this crate creates goes through [`DaemonThread`], which
//! marks it as a daemon at construction. A daemon is never joined
//! implicitly: dropping its [`DaemonThread`] or [`JoinHandle`] detaches it,
//! so a forgotten background thread cannot hold the process open.
//!
//! Interruption is a per-thread flag. [`Thread::interrupt`] sets it and
//! wakes the target if it is parked in an interruptible wait
//! ([`crate::time::park_for`]); the target decides what to do about it.

use portable_atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::cell::RefCell;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

pub mod builder;
pub mod handle;

pub use builder::DaemonThread;
pub use handle::JoinHandle;

static NEXT_THREAD_ID: AtomicUsize = AtomicUsize::new(1);

thread_local! {
    static CURRENT: RefCell<Option<Thread>> = const { RefCell::new(None) };
}

/// Returns a handle to the calling thread.
///
/// Inside a [`DaemonThread`] body this is the same handle the owner holds.
/// Threads not created by this crate (the main thread, test harness
/// threads) get a non-daemon handle the first time they ask for one.
pub fn current() -> Thread {
    CURRENT
        .try_with(|slot| slot.borrow_mut().get_or_insert_with(Thread::foreign).clone())
        .unwrap_or_else(|_| Thread::foreign())
}

/// Tests whether the calling thread has been interrupted, clearing the flag.
pub fn interrupted() -> bool {
    current().take_interrupt()
}

/// Unique, never reused identifier of a thread handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(NonZeroUsize);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ThreadId {
    fn next() -> Self {
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroUsize::new(id).unwrap_or(NonZeroUsize::MIN))
    }

    /// Get the raw ID value.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Lifecycle state of a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ThreadState {
    /// Constructed, not yet started
    New = 0,
    /// Started and executing its body
    Running = 1,
    /// Body returned or panicked
    Terminated = 2,
}

/// Shared handle to a thread.
///
/// Cloning is cheap; all clones observe the same state and interrupt flag.
#[derive(Clone)]
pub struct Thread {
    inner: Arc<ThreadInner>,
}

struct ThreadInner {
    id: ThreadId,
    name: Option<String>,
    daemon: bool,
    state: AtomicU8,
    interrupted: AtomicBool,
    // OS handle used to wake the thread; known once the thread is running.
    parker: spin::Mutex<Option<std::thread::Thread>>,
}

impl Thread {
    /// Daemon handle. The only constructor that sets `daemon`.
    pub(crate) fn new_daemon(name: String) -> Self {
        Self {
            inner: Arc::new(ThreadInner {
                id: ThreadId::next(),
                name: Some(name),
                daemon: true,
                state: AtomicU8::new(ThreadState::New as u8),
                interrupted: AtomicBool::new(false),
                parker: spin::Mutex::new(None),
            }),
        }
    }

    fn foreign() -> Self {
        let os = std::thread::current();
        Self {
            inner: Arc::new(ThreadInner {
                id: ThreadId::next(),
                name: os.name().map(String::from),
                daemon: false,
                state: AtomicU8::new(ThreadState::Running as u8),
                interrupted: AtomicBool::new(false),
                parker: spin::Mutex::new(Some(os)),
            }),
        }
    }

    /// Unique, never reused id.
    pub fn id(&self) -> ThreadId {
        self.inner.id
    }

    /// Thread name, if any. Daemon threads always have one.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Whether this thread is a daemon. Fixed at construction.
    pub fn is_daemon(&self) -> bool {
        self.inner.daemon
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ThreadState {
        match self.inner.state.load(Ordering::Acquire) {
            0 => ThreadState::New,
            1 => ThreadState::Running,
            _ => ThreadState::Terminated,
        }
    }

    /// `true` between a successful start and the end of the body.
    pub fn is_alive(&self) -> bool {
        self.state() == ThreadState::Running
    }

    /// Signal interruption to this thread.
    ///
    /// Sets the interrupt flag and wakes the thread if it is parked in an
    /// interruptible wait. Advisory only: nothing stops a thread that
    /// never looks at its flag.
    pub fn interrupt(&self) {
        self.inner.interrupted.store(true, Ordering::Release);
        if let Some(os) = self.inner.parker.lock().as_ref() {
            os.unpark();
        }
    }

    /// Tests the interrupt flag without clearing it.
    pub fn is_interrupted(&self) -> bool {
        self.inner.interrupted.load(Ordering::Acquire)
    }

    /// Clears the interrupt flag, returning its previous value.
    pub(crate) fn take_interrupt(&self) -> bool {
        self.inner.interrupted.swap(false, Ordering::AcqRel)
    }

    /// Sets the flag without waking anyone; used to re-assert a consumed interrupt.
    pub(crate) fn reassert_interrupt(&self) {
        self.inner.interrupted.store(true, Ordering::Release);
    }

    pub(crate) fn set_state(&self, state: ThreadState) {
        self.inner.state.store(state as u8, Ordering::Release);
    }

    /// Attach this handle to the calling OS thread.
    pub(crate) fn bind_current(&self) {
        *self.inner.parker.lock() = Some(std::thread::current());
        let _ = CURRENT.try_with(|slot| *slot.borrow_mut() = Some(self.clone()));
    }
}

impl PartialEq for Thread {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Thread {}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("daemon", &self.inner.daemon)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_is_stable_per_thread() {
        let a = current();
        let b = current();
        assert_eq!(a, b);
        assert_eq!(a.state(), ThreadState::Running);
        assert!(!a.is_daemon());
    }

    #[test]
    fn test_foreign_thread_keeps_os_name() {
        let name = std::thread::Builder::new()
            .name("plain-os-thread".into())
            .spawn(|| current().name().map(String::from))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(name.as_deref(), Some("plain-os-thread"));
    }

    #[test]
    fn test_interrupted_clears_flag() {
        let me = current();
        me.interrupt();
        assert!(me.is_interrupted());
        assert!(interrupted());
        assert!(!me.is_interrupted());
        assert!(!interrupted());
    }

    #[test]
    fn test_thread_ids_are_unique() {
        let a = Thread::new_daemon("a".into());
        let b = Thread::new_daemon("a".into());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn test_state_transitions() {
        let thread = Thread::new_daemon("state".into());
        assert_eq!(thread.state(), ThreadState::New);
        assert!(!thread.is_alive());

        thread.set_state(ThreadState::Running);
        assert!(thread.is_alive());

        thread.set_state(ThreadState::Terminated);
        assert_eq!(thread.state(), ThreadState::Terminated);
        assert!(!thread.is_alive());
    }
}
