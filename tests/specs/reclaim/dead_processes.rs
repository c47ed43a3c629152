//! Reclamation specs
//!
//! Verify slots of dead processes are reclaimed and that the reclaimed holder
//! learns about it when releasing.

use crate::prelude::*;

#[test]
fn dead_process_slot_goes_to_next_acquirer() {
    let s = stock_limiter();
    let mut crashed = Process::spawn();
    s.acquire(crashed.pid(), "debian").unwrap();

    crashed.die();
    let me = HolderId::current();
    s.acquire(me, "debian").unwrap();

    assert_eq!(s.pool("debian").unwrap().holders(), vec![me]);
}

#[test]
fn blocked_acquirer_takes_over_when_holder_dies() {
    let s = stock_limiter();
    let mut holder = Process::spawn();
    s.acquire(holder.pid(), "debian").unwrap();

    std::thread::scope(|scope| {
        let waiter = scope.spawn(|| s.acquire(HolderId::current(), "debian"));

        std::thread::sleep(Duration::from_millis(60));
        assert!(!waiter.is_finished());

        holder.die();
        assert_eq!(waiter.join().unwrap().unwrap(), 0);
    });

    assert_eq!(s.pool("debian").unwrap().holders(), vec![HolderId::current()]);
}

#[test]
fn stolen_lock_fails_on_release() {
    let s = stock_limiter();
    let mut outer = Process::spawn();
    let outer_pid = outer.pid();

    let result = s.synchronize(outer_pid, "debian", || {
        outer.die();
        s.synchronize(HolderId::current(), "debian", || {
            assert_eq!(s.pool("debian").unwrap().holders(), vec![HolderId::current()]);
            Ok::<_, Infallible>(())
        })
        .unwrap();
        Ok::<_, Infallible>(())
    });

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Semaphore(SemaphoreError::LockRelease { holder, .. }) if holder == outer_pid
    ));
    assert!(!s.pool("debian").unwrap().contains(outer_pid));
}

#[test]
fn cleanup_reclaims_only_dead_processes() {
    let s = limiter(SemaphoreConfig::new().with_host("debian", 2));
    let alive = Process::spawn();
    let mut dead = Process::spawn();
    s.acquire(alive.pid(), "debian").unwrap();
    s.acquire(dead.pid(), "debian").unwrap();

    dead.die();
    let reclaimed = s.cleanup();

    assert_eq!(reclaimed, vec![(Host::new("debian"), dead.pid())]);
    assert_eq!(s.pool("debian").unwrap().holders(), vec![alive.pid()]);
}
