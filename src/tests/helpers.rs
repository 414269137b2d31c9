//! Test helper utilities and common functionality.

use portable_atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Route `log` output through the test harness.
pub(super) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Poll `condition` until it holds or `timeout` elapses.
pub(super) fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}

/// One-shot gate that parks workers until the test releases them.
pub(super) struct TestGate {
    released: AtomicBool,
    arrived: AtomicU64,
}

impl TestGate {
    pub(super) fn new() -> Self {
        Self {
            released: AtomicBool::new(false),
            arrived: AtomicU64::new(0),
        }
    }

    pub(super) fn wait(&self) {
        self.arrived.fetch_add(1, Ordering::SeqCst);
        while !self.released.load(Ordering::Acquire) {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    pub(super) fn arrived(&self) -> u64 {
        self.arrived.load(Ordering::SeqCst)
    }

    pub(super) fn release(&self) {
        self.released.store(true, Ordering::Release);
    }
}

/// Simple linear congruential generator for property testing.
pub(super) struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub(super) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(super) fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    pub(super) fn gen_range(&mut self, min: u64, max: u64) -> u64 {
        min + (self.next_u64() % (max - min))
    }
}
