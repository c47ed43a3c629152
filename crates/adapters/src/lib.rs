// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the process table, log files and tracing output

pub mod file_sink;
pub mod logging;
pub mod process;
pub mod traced;

pub use file_sink::FileSink;
pub use logging::{init_logging, LoggingError};
pub use process::SignalProbe;
pub use traced::TracedProbe;
