// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! hostsem-core: per-host concurrency limiting that survives crashed holders
//!
//! This crate provides:
//! - Fixed-size slot tables per host, reclaiming slots of dead processes
//! - A release check that reports locks stolen during their critical section
//! - TOML configuration of hosts and capacities
//! - Probe and log sink traits for the process table and report output

pub mod config;
pub mod coordination;
pub mod error;
pub mod id;
pub mod probe;
pub mod sink;

pub use config::{ConfigError, HostConfig, SemaphoreConfig, DEFAULT_POLL_INTERVAL};
pub use coordination::{HostSemaphore, LockStats, Semaphore, SlotState, MIN_POLL_INTERVAL};
pub use error::{SemaphoreError, SyncError};
pub use id::{HolderId, Host};
pub use probe::ProcessProbe;
pub use sink::{LogSink, SinkError, TracingSink};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use probe::FakeProbe;
#[cfg(any(test, feature = "test-support"))]
pub use sink::{with_tracing, CapturedLogs, MemorySink};
