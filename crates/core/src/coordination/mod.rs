// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives for per-host concurrency limiting
//!
//! This module provides:
//! - **HostSemaphore** - Fixed slot table for one host with dead-holder reclamation
//! - **Semaphore** - Host registry with scoped `synchronize` and lock reporting
//! - **LockStats** - Read-only occupancy figures per host

pub mod pool;
pub mod semaphore;
pub mod stats;

pub use pool::{HostSemaphore, SlotState, MIN_POLL_INTERVAL};
pub use semaphore::Semaphore;
pub use stats::LockStats;
