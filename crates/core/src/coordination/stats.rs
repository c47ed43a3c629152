// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Occupancy statistics for host pools

use super::pool::HostSemaphore;
use crate::id::Host;
use crate::probe::ProcessProbe;

/// Statistics about one host's slots
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockStats {
    pub host: Host,
    pub capacity: usize,
    pub occupied: usize,
}

impl LockStats {
    /// Collect statistics from a pool without probing holders
    pub fn collect<P: ProcessProbe>(pool: &HostSemaphore<P>) -> Self {
        let slots = pool.slots();
        Self {
            host: pool.host().clone(),
            capacity: slots.len(),
            occupied: slots.iter().filter(|slot| slot.holder().is_some()).count(),
        }
    }

    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.occupied)
    }

    pub fn is_full(&self) -> bool {
        self.available() == 0
    }
}
