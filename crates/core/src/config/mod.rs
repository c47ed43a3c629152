// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host and capacity configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! poll_interval = "250ms"
//! acquire_timeout = "10m"
//!
//! [[host]]
//! name = "debian"
//! capacity = 1
//! ```

use crate::id::Host;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default interval between liveness re-checks while waiting for a slot
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no hosts configured")]
    NoHosts,
    #[error("host {0} has zero capacity")]
    ZeroCapacity(Host),
    #[error("host {0} is configured more than once")]
    DuplicateHost(Host),
    #[error("poll_interval must be greater than zero")]
    ZeroPollInterval,
}

/// A single host and its slot count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub name: Host,
    pub capacity: usize,
}

impl HostConfig {
    pub fn new(name: impl Into<Host>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Semaphore configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemaphoreConfig {
    /// How often a blocked acquire re-probes holders
    #[serde(with = "humantime_serde", default = "default_poll_interval")]
    pub poll_interval: Duration,
    /// Give up on a blocked acquire after this long
    #[serde(with = "humantime_serde", default)]
    pub acquire_timeout: Option<Duration>,
    /// Hosts in report order
    #[serde(rename = "host", default)]
    pub hosts: Vec<HostConfig>,
}

fn default_poll_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

impl Default for SemaphoreConfig {
    fn default() -> Self {
        Self::new().with_host("debian", 1).with_host("kde", 1)
    }
}

impl SemaphoreConfig {
    /// Empty configuration; add hosts with [`SemaphoreConfig::with_host`]
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            acquire_timeout: None,
            hosts: Vec::new(),
        }
    }

    pub fn with_host(mut self, name: impl Into<Host>, capacity: usize) -> Self {
        self.hosts.push(HostConfig::new(name, capacity));
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject empty host lists, zero capacities, duplicate hosts and a zero
    /// poll interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.hosts.is_empty() {
            return Err(ConfigError::NoHosts);
        }

        let mut seen = HashSet::new();
        for host in &self.hosts {
            if host.capacity == 0 {
                return Err(ConfigError::ZeroCapacity(host.name.clone()));
            }
            if !seen.insert(&host.name) {
                return Err(ConfigError::DuplicateHost(host.name.clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
