// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced probe wrapper for consistent observability

use hostsem_core::{HolderId, ProcessProbe};

/// Wrapper that adds tracing to any ProcessProbe
#[derive(Clone, Debug)]
pub struct TracedProbe<P> {
    inner: P,
}

impl<P> TracedProbe<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: ProcessProbe> ProcessProbe for TracedProbe<P> {
    fn is_alive(&self, holder: HolderId) -> bool {
        let start = std::time::Instant::now();
        let alive = self.inner.is_alive(holder);
        let elapsed = start.elapsed();

        if alive {
            tracing::trace!(%holder, elapsed_us = elapsed.as_micros() as u64, "holder alive");
        } else {
            tracing::info!(%holder, elapsed_us = elapsed.as_micros() as u64, "holder dead");
        }
        alive
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
