//! Synchronize specs
//!
//! Verify slots are held for the duration of the work and released after.

use crate::prelude::*;

#[test]
fn single_slot_is_held_during_work_and_empty_after() {
    let s = stock_limiter();
    let pool = s.pool("debian").unwrap();

    s.synchronize(HolderId(1), "debian", || {
        assert_eq!(pool.slots(), vec![SlotState::Held(HolderId(1))]);
        Ok::<_, Infallible>(())
    })
    .unwrap();

    assert_eq!(pool.slots(), vec![SlotState::Empty]);
}

#[test]
fn hosts_hold_only_their_own_pids() {
    let s = limiter(
        SemaphoreConfig::new()
            .with_host("debian", 3)
            .with_host("kde", 2),
    );

    s.synchronize(HolderId(1), "debian", || {
        s.synchronize(HolderId(2), "kde", || {
            assert_eq!(s.pool("debian").unwrap().holders(), vec![HolderId(1)]);
            assert_eq!(s.pool("kde").unwrap().holders(), vec![HolderId(2)]);
            Ok::<_, Infallible>(())
        })
    })
    .unwrap();

    for stats in s.stats() {
        assert_eq!(stats.occupied, 0, "host {}", stats.host);
    }
}

#[test]
fn live_holder_blocks_other_threads_until_release() {
    let s = stock_limiter();
    let me = HolderId::current();
    s.acquire(me, "debian").unwrap();

    std::thread::scope(|scope| {
        let waiter = scope.spawn(|| {
            s.synchronize(HolderId(1), "debian", || Ok::<_, Infallible>("ran"))
        });

        std::thread::sleep(Duration::from_millis(100));
        assert!(!waiter.is_finished(), "live holder must not be reclaimed");

        s.release(me, "debian").unwrap();
        assert_eq!(waiter.join().unwrap().unwrap(), "ran");
    });
}

#[test]
fn full_pool_times_out_when_configured() {
    let s = limiter(
        SemaphoreConfig::new()
            .with_host("debian", 1)
            .with_acquire_timeout(Duration::from_millis(60)),
    );
    s.acquire(HolderId::current(), "debian").unwrap();

    let err = s
        .synchronize(HolderId(1), "debian", || Ok::<_, Infallible>(()))
        .unwrap_err();

    assert!(matches!(err, SyncError::Semaphore(SemaphoreError::Timeout { .. })));
}
