// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness probe backed by the process signal facility

use hostsem_core::{HolderId, ProcessProbe};
use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Probes holders by sending them the null signal
///
/// Only `ESRCH` counts as death. `EPERM` means the process exists but belongs
/// to someone else, and any other failure is inconclusive, so both report the
/// holder alive.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignalProbe;

impl SignalProbe {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessProbe for SignalProbe {
    fn is_alive(&self, holder: HolderId) -> bool {
        // Pid 0 and negative pids address process groups, not a holder
        let Some(pid) = i32::try_from(holder.0).ok().filter(|pid| *pid > 0) else {
            tracing::debug!(%holder, "holder does not name a single process, presuming alive");
            return true;
        };

        signal_outcome_is_alive(holder, kill(Pid::from_raw(pid), None))
    }
}

/// Interpret the result of sending the null signal to `holder`
///
/// Only `ESRCH` means the process is gone.
fn signal_outcome_is_alive(holder: HolderId, outcome: nix::Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(Errno::ESRCH) => false,
        Err(errno) => {
            tracing::debug!(%holder, error = %errno, "liveness inconclusive, presuming alive");
            true
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
