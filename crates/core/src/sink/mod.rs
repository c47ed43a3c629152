// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Destinations for lock report lines

use thiserror::Error;

#[cfg(any(test, feature = "test-support"))]
mod capture;
#[cfg(any(test, feature = "test-support"))]
mod memory;

#[cfg(any(test, feature = "test-support"))]
pub use capture::{with_tracing, CapturedLogs};
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemorySink;

/// Errors from writing to a log sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepts report lines in order, with append semantics
///
/// The limiter only writes; opening, rotating and closing the destination is
/// up to whoever owns the sink.
pub trait LogSink: Send + Sync {
    fn write_line(&self, line: &str) -> Result<(), SinkError>;
}

/// Sink that forwards each line as a tracing event on `hostsem::locks`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        tracing::info!(target: "hostsem::locks", "{line}");
        Ok(())
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
