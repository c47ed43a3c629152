//! Shared helpers for specs

pub use hostsem_adapters::{FileSink, SignalProbe, TracedProbe};
pub use hostsem_core::{
    HolderId, Host, MemorySink, Semaphore, SemaphoreConfig, SemaphoreError, SlotState, SyncError,
};
pub use std::convert::Infallible;
pub use std::time::Duration;

use std::process::{Child, Command};

/// Limiter over `config` probing real processes
pub fn limiter(config: SemaphoreConfig) -> Semaphore<TracedProbe<SignalProbe>> {
    let config = config.with_poll_interval(Duration::from_millis(20));
    Semaphore::new(&config, TracedProbe::new(SignalProbe)).unwrap()
}

/// Limiter with the stock `debian` and `kde` hosts
pub fn stock_limiter() -> Semaphore<TracedProbe<SignalProbe>> {
    limiter(SemaphoreConfig::default())
}

/// A real process whose pid can hold slots
pub struct Process {
    child: Option<Child>,
    pid: HolderId,
}

impl Process {
    pub fn spawn() -> Self {
        let child = Command::new("sleep").arg("60").spawn().unwrap();
        let pid = HolderId(child.id());
        Self {
            child: Some(child),
            pid,
        }
    }

    pub fn pid(&self) -> HolderId {
        self.pid
    }

    /// Kill and reap the process so its pid stops existing
    pub fn die(&mut self) {
        if let Some(mut child) = self.child.take() {
            child.kill().unwrap();
            child.wait().unwrap();
        }
    }
}

impl Drop for Process {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
