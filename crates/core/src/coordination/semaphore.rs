// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-host semaphore registry
//!
//! Routes holders to their host's slot table and runs work while a slot is
//! held. A lock stolen during the work surfaces when the slot is released.

use super::pool::HostSemaphore;
use super::stats::LockStats;
use crate::config::{ConfigError, SemaphoreConfig};
use crate::error::{SemaphoreError, SyncError};
use crate::id::{HolderId, Host};
use crate::probe::ProcessProbe;
use crate::sink::{LogSink, SinkError, TracingSink};
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;

/// Bounded concurrency limiter over a fixed set of hosts
pub struct Semaphore<P> {
    /// Hosts in configured order
    hosts: Vec<Host>,
    pools: HashMap<Host, HostSemaphore<P>>,
    sink: Box<dyn LogSink>,
}

impl<P: ProcessProbe + Clone> Semaphore<P> {
    /// Build one pool per configured host, each sharing `probe`
    pub fn new(config: &SemaphoreConfig, probe: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut hosts = Vec::with_capacity(config.hosts.len());
        let mut pools = HashMap::with_capacity(config.hosts.len());
        for host in &config.hosts {
            let capacity = NonZeroUsize::new(host.capacity)
                .ok_or_else(|| ConfigError::ZeroCapacity(host.name.clone()))?;
            let pool = HostSemaphore::new(host.name.clone(), capacity, probe.clone())
                .with_poll_interval(config.poll_interval)
                .with_acquire_timeout(config.acquire_timeout);
            hosts.push(host.name.clone());
            pools.insert(host.name.clone(), pool);
        }

        Ok(Self {
            hosts,
            pools,
            sink: Box::new(TracingSink),
        })
    }
}

impl<P: ProcessProbe> Semaphore<P> {
    /// Send `log_locks` output to `sink` instead of tracing
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// The slot table for `host`
    pub fn pool(&self, host: &str) -> Result<&HostSemaphore<P>, SemaphoreError> {
        self.pools
            .get(host)
            .ok_or_else(|| SemaphoreError::UnknownHost(host.to_string()))
    }

    /// Pools in configured host order
    pub fn pools(&self) -> impl Iterator<Item = &HostSemaphore<P>> {
        self.hosts.iter().filter_map(|host| self.pools.get(host))
    }

    pub fn acquire(&self, holder: HolderId, host: &str) -> Result<usize, SemaphoreError> {
        self.pool(host)?.acquire(holder)
    }

    pub fn release(&self, holder: HolderId, host: &str) -> Result<(), SemaphoreError> {
        self.pool(host)?.release(holder)
    }

    /// Run `work` while `holder` occupies a slot of `host`
    ///
    /// The slot is released on every exit path. If the release finds the slot
    /// reclaimed, that error wins over the work's result.
    pub fn synchronize<T, E, F>(
        &self,
        holder: HolderId,
        host: &str,
        work: F,
    ) -> Result<T, SyncError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let pool = self.pool(host)?;
        pool.acquire(holder)?;
        let guard = SlotGuard::new(pool, holder);

        let outcome = work();
        settle(outcome, guard.release())
    }

    /// Async form of [`Semaphore::synchronize`]
    ///
    /// Dropping the returned future while the work is pending releases the
    /// slot.
    pub async fn synchronize_async<T, E, F, Fut>(
        &self,
        holder: HolderId,
        host: &str,
        work: F,
    ) -> Result<T, SyncError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let pool = self.pool(host)?;
        pool.acquire_async(holder).await?;
        let guard = SlotGuard::new(pool, holder);

        let outcome = work().await;
        settle(outcome, guard.release())
    }

    /// Reclaim dead holders' slots on every host
    pub fn cleanup(&self) -> Vec<(Host, HolderId)> {
        self.pools()
            .flat_map(|pool| {
                pool.cleanup()
                    .into_iter()
                    .map(move |holder| (pool.host().clone(), holder))
            })
            .collect()
    }

    /// Clean up every host, then write its report to the sink
    ///
    /// Each host gets a summary line followed by one line per slot.
    pub fn log_locks(&self) -> Result<(), SinkError> {
        let mut lines = Vec::new();
        for pool in self.pools() {
            pool.cleanup();
            lines.extend(pool.summary());
        }

        for line in &lines {
            self.sink.write_line(line)?;
        }
        Ok(())
    }

    /// Occupancy of every host, without probing or reclaiming
    pub fn stats(&self) -> Vec<LockStats> {
        self.pools().map(LockStats::collect).collect()
    }
}

impl<P> std::fmt::Debug for Semaphore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Semaphore")
            .field("hosts", &self.hosts)
            .field("pools", &self.pools)
            .finish_non_exhaustive()
    }
}

fn settle<T, E>(
    outcome: Result<T, E>,
    released: Result<(), SemaphoreError>,
) -> Result<T, SyncError<E>> {
    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release)) => Err(SyncError::Semaphore(release)),
        (Err(work), Ok(())) => Err(SyncError::Work(work)),
        (Err(work), Err(release)) => Err(SyncError::Unprotected { release, work }),
    }
}

/// Releases the slot if the work unwinds or is dropped before finishing
struct SlotGuard<'a, P: ProcessProbe> {
    pool: &'a HostSemaphore<P>,
    holder: HolderId,
    released: bool,
}

impl<'a, P: ProcessProbe> SlotGuard<'a, P> {
    fn new(pool: &'a HostSemaphore<P>, holder: HolderId) -> Self {
        Self {
            pool,
            holder,
            released: false,
        }
    }

    fn release(mut self) -> Result<(), SemaphoreError> {
        self.released = true;
        self.pool.release(self.holder)
    }
}

impl<P: ProcessProbe> Drop for SlotGuard<'_, P> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.pool.release(self.holder) {
            tracing::error!(
                host = %self.pool.host(),
                holder = %self.holder,
                error = %e,
                "release failed while abandoning work"
            );
        }
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
