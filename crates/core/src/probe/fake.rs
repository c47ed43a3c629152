// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake process probe for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ProcessProbe;
use crate::id::HolderId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct FakeProbeState {
    dead: HashSet<HolderId>,
    all_dead: bool,
    checks: Vec<HolderId>,
}

/// Fake probe with scriptable process deaths
///
/// Every holder is alive until marked dead with [`FakeProbe::kill`] or
/// [`FakeProbe::kill_all`]. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct FakeProbe {
    state: Arc<Mutex<FakeProbeState>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `holder` as dead from now on
    pub fn kill(&self, holder: HolderId) {
        self.lock().dead.insert(holder);
    }

    /// Report `holder` as alive again
    pub fn revive(&self, holder: HolderId) {
        self.lock().dead.remove(&holder);
    }

    /// Report every holder as dead
    pub fn kill_all(&self) {
        self.lock().all_dead = true;
    }

    /// Undo all deaths
    pub fn revive_all(&self) {
        let mut state = self.lock();
        state.all_dead = false;
        state.dead.clear();
    }

    /// Holders probed so far, in order
    pub fn checks(&self) -> Vec<HolderId> {
        self.lock().checks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeProbeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessProbe for FakeProbe {
    fn is_alive(&self, holder: HolderId) -> bool {
        let mut state = self.lock();
        state.checks.push(holder);
        !(state.all_dead || state.dead.contains(&holder))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
