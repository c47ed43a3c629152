//! Configuration specs
//!
//! Verify a limiter built from a TOML file has the configured pools.

use crate::prelude::*;

const HOSTS_TOML: &str = r#"
poll_interval = "20ms"

[[host]]
name = "debian"
capacity = 2

[[host]]
name = "kde"
capacity = 4
"#;

#[test]
fn limiter_from_toml_file_has_configured_pools() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.toml");
    std::fs::write(&path, HOSTS_TOML).unwrap();

    let config = SemaphoreConfig::load(&path).unwrap();
    let s = Semaphore::new(&config, SignalProbe).unwrap();

    assert_eq!(s.hosts(), &[Host::new("debian"), Host::new("kde")]);
    assert_eq!(s.pool("debian").unwrap().capacity(), 2);
    assert_eq!(s.pool("kde").unwrap().capacity(), 4);
}

#[test]
fn unknown_host_is_rejected() {
    let s = stock_limiter();

    let err = s
        .synchronize(HolderId(1), "arch", || Ok::<_, Infallible>(()))
        .unwrap_err();

    assert_eq!(err.to_string(), "unknown host: arch");
}
