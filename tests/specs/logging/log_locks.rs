//! Lock logging specs
//!
//! Verify log_locks reports every host and sweeps dead holders first.

use crate::prelude::*;

#[test]
fn log_locks_writes_more_lines_than_hosts_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log");
    let s = stock_limiter().with_sink(FileSink::open(&path).unwrap());

    s.log_locks().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.is_empty());
    assert!(content.lines().count() > s.hosts().len());
}

#[test]
fn log_locks_reports_after_sweeping_dead_holders() {
    let sink = MemorySink::new();
    let s = stock_limiter().with_sink(sink.clone());
    let alive = Process::spawn();
    let mut dead = Process::spawn();
    s.acquire(dead.pid(), "debian").unwrap();
    s.acquire(alive.pid(), "kde").unwrap();

    dead.die();
    s.log_locks().unwrap();

    similar_asserts::assert_eq!(
        sink.lines(),
        vec![
            "debian: 0/1 slots held".to_string(),
            "debian[0]: empty".to_string(),
            "kde: 1/1 slots held".to_string(),
            format!("kde[0]: {}", alive.pid()),
        ]
    );
}

#[test]
fn log_locks_inside_work_keeps_running_holder() {
    let sink = MemorySink::new();
    let s = stock_limiter().with_sink(sink.clone());
    let me = HolderId::current();

    s.synchronize(me, "debian", || {
        s.log_locks().unwrap();
        assert!(s.pool("debian").unwrap().contains(me));
        Ok::<_, Infallible>(())
    })
    .unwrap();

    assert!(sink.lines().contains(&format!("debian[0]: {me}")));
    assert!(!s.pool("debian").unwrap().contains(me));
}
