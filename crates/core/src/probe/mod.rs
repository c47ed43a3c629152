// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Liveness probing of slot holders

use crate::id::HolderId;
use std::sync::Arc;

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProbe;

/// Reports whether a holder still corresponds to a running process
///
/// Implementations must answer `false` only when the process is known to be
/// gone. Inconclusive checks (permission errors and the like) answer `true`
/// so that a live holder is never reclaimed.
pub trait ProcessProbe: Send + Sync {
    fn is_alive(&self, holder: HolderId) -> bool;
}

impl<P: ProcessProbe + ?Sized> ProcessProbe for Arc<P> {
    fn is_alive(&self, holder: HolderId) -> bool {
        (**self).is_alive(holder)
    }
}

impl<P: ProcessProbe + ?Sized> ProcessProbe for &P {
    fn is_alive(&self, holder: HolderId) -> bool {
        (**self).is_alive(holder)
    }
}
