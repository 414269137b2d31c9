//! Interruptible waiting.

use std::fmt;
use std::time::{Duration, Instant};

/// The wait ended because the thread was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupted;

impl fmt::Display for Interrupted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sleep interrupted")
    }
}

impl std::error::Error for Interrupted {}

/// Park the calling thread for `duration` or until it is interrupted.
///
/// Returns `Err(Interrupted)` as soon as the interrupt flag is observed,
/// including when it was already set on entry. The flag is cleared when
/// reported, so callers that want it to stay visible must set it again.
/// Spurious wakeups are absorbed; an uninterrupted call never returns
/// before `duration` has elapsed.
pub fn park_for(duration: Duration) -> Result<(), Interrupted> {
    let current = crate::thread::current();
    let deadline = Instant::now().checked_add(duration);

    loop {
        if current.take_interrupt() {
            return Err(Interrupted);
        }
        match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(());
                }
                std::thread::park_timeout(deadline - now);
            }
            None => std::thread::park(),
        }
    }
}
