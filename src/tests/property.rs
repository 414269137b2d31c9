//! Property-based tests for verifying system invariants.

use super::helpers::{init_logging, SimpleRng};
use crate::pool::NameFormat;
use crate::thread::{DaemonThread, ThreadState};
use crate::{new_daemon_fixed_thread_executor, sleep};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[test]
fn property_every_construction_is_daemon() {
    let mut rng = SimpleRng::new(0x5eed);
    for i in 0..200 {
        let thread = if rng.next_u64() & 1 == 0 {
            DaemonThread::new(|| {})
        } else {
            DaemonThread::named(format!("named-{}", i))
        };
        assert!(thread.is_daemon());
        assert!(thread.thread().is_daemon());
        assert_eq!(thread.thread().state(), ThreadState::New);
    }
}

#[test]
fn property_thread_ids_unique() {
    let ids: BTreeSet<_> = (0..500)
        .map(|_| DaemonThread::new(|| {}).thread().id())
        .collect();
    assert_eq!(ids.len(), 500);
}

#[test]
fn property_pool_size_and_names() {
    init_logging();
    let mut rng = SimpleRng::new(42);
    let templates = ["worker-%d", "%d", "svc-%s-pool", "q%%-%d", "worker-%02d", "exec-%3d"];

    for round in 0..12 {
        let threads = rng.gen_range(1, 17) as usize;
        let template = templates[round % templates.len()];
        let pool = new_daemon_fixed_thread_executor(template, threads).unwrap();
        let format = NameFormat::parse(template).unwrap();

        assert_eq!(pool.size(), threads);
        assert_eq!(pool.live_workers(), threads);

        let names: Vec<String> = pool
            .workers()
            .iter()
            .map(|w| w.name().unwrap_or_default().to_owned())
            .collect();
        let expected: Vec<String> = (0..threads).map(|i| format.format(i)).collect();
        assert_eq!(names, expected);

        let distinct: BTreeSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), threads);
        assert!(pool.workers().iter().all(|w| w.is_daemon()));

        pool.shutdown();
        assert!(pool.await_termination(Duration::from_secs(10)));
    }
}

#[test]
fn property_pool_size_stable_under_load() {
    init_logging();
    let pool = new_daemon_fixed_thread_executor("load-%d", 4).unwrap();
    let mut rng = SimpleRng::new(7);

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let pause = rng.gen_range(0, 3);
            pool.submit(move || {
                sleep(pause);
                if i % 9 == 0 {
                    panic!("unlucky job {}", i);
                }
                i
            })
            .unwrap()
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        match handle.get() {
            Ok(value) => assert_eq!(value, i),
            Err(_) => assert_eq!(i % 9, 0),
        }
        assert_eq!(pool.live_workers(), 4);
    }
}

#[test]
fn property_uninterrupted_sleep_is_not_short() {
    let mut rng = SimpleRng::new(1234);
    for _ in 0..8 {
        let millis = rng.gen_range(1, 25);
        let start = Instant::now();
        sleep(millis);
        assert!(start.elapsed() >= Duration::from_millis(millis));
        assert!(!crate::thread::current().is_interrupted());
    }
}
