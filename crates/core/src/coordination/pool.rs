// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size slot table for a single host
//!
//! Slots are claimed lowest index first: an empty slot wins over a dead
//! holder's slot, and among dead holders the lowest slot is reclaimed. A
//! reclaimed holder is never told; it finds out when its release fails.

use crate::config::DEFAULT_POLL_INTERVAL;
use crate::error::SemaphoreError;
use crate::id::{HolderId, Host};
use crate::probe::ProcessProbe;
use std::num::NonZeroUsize;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::Notify;

/// Shortest wait between re-scans of a full pool
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Occupancy of one slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Held(HolderId),
}

impl SlotState {
    pub fn holder(&self) -> Option<HolderId> {
        match self {
            SlotState::Empty => None,
            SlotState::Held(holder) => Some(*holder),
        }
    }
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotState::Empty => write!(f, "empty"),
            SlotState::Held(holder) => write!(f, "{holder}"),
        }
    }
}

/// Concurrency slots for one host, with dead-holder reclamation
pub struct HostSemaphore<P> {
    host: Host,
    probe: P,
    slots: Mutex<Vec<Option<HolderId>>>,
    /// Wakes blocking waiters
    freed: Condvar,
    /// Wakes async waiters
    notify: Notify,
    poll_interval: Duration,
    acquire_timeout: Option<Duration>,
}

impl<P: ProcessProbe> HostSemaphore<P> {
    pub fn new(host: impl Into<Host>, capacity: NonZeroUsize, probe: P) -> Self {
        Self {
            host: host.into(),
            probe,
            slots: Mutex::new(vec![None; capacity.get()]),
            freed: Condvar::new(),
            notify: Notify::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            acquire_timeout: None,
        }
    }

    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn capacity(&self) -> usize {
        self.lock_slots().len()
    }

    /// Snapshot of every slot in index order
    pub fn slots(&self) -> Vec<SlotState> {
        self.lock_slots()
            .iter()
            .map(|slot| slot.map_or(SlotState::Empty, SlotState::Held))
            .collect()
    }

    /// Current holders in slot order
    pub fn holders(&self) -> Vec<HolderId> {
        self.lock_slots().iter().flatten().copied().collect()
    }

    pub fn occupied(&self) -> usize {
        self.lock_slots().iter().flatten().count()
    }

    pub fn contains(&self, holder: HolderId) -> bool {
        self.lock_slots().contains(&Some(holder))
    }

    /// Claim a slot without waiting
    ///
    /// Returns `Ok(None)` when every slot is held by a live process.
    pub fn try_acquire(&self, holder: HolderId) -> Result<Option<usize>, SemaphoreError> {
        let mut slots = self.lock_slots();
        self.claim(&mut slots, holder)
    }

    /// Claim a slot, blocking the thread until one is empty or reclaimable
    ///
    /// Holders are re-probed every poll interval while waiting, since a dead
    /// process never releases.
    pub fn acquire(&self, holder: HolderId) -> Result<usize, SemaphoreError> {
        let started = Instant::now();
        let mut slots = self.lock_slots();
        loop {
            if let Some(index) = self.claim(&mut slots, holder)? {
                return Ok(index);
            }
            let wait = self.next_wait(started)?;
            tracing::trace!(host = %self.host, %holder, ?wait, "pool full, waiting");
            slots = match self.freed.wait_timeout(slots, wait) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }

    /// Claim a slot, suspending the task until one is empty or reclaimable
    pub async fn acquire_async(&self, holder: HolderId) -> Result<usize, SemaphoreError> {
        let started = Instant::now();
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            let claimed = {
                let mut slots = self.lock_slots();
                self.claim(&mut slots, holder)?
            };
            if let Some(index) = claimed {
                return Ok(index);
            }

            let wait = self.next_wait(started)?;
            tracing::trace!(host = %self.host, %holder, ?wait, "pool full, waiting");
            let _ = tokio::time::timeout(wait, notified).await;
        }
    }

    /// Give up `holder`'s slot
    ///
    /// Fails with [`SemaphoreError::LockRelease`] if the slot was reclaimed
    /// while the holder still believed it owned it.
    pub fn release(&self, holder: HolderId) -> Result<(), SemaphoreError> {
        let mut slots = self.lock_slots();
        let Some(index) = slots.iter().position(|slot| *slot == Some(holder)) else {
            tracing::warn!(host = %self.host, %holder, "lock was reclaimed before release");
            return Err(SemaphoreError::LockRelease {
                host: self.host.clone(),
                holder,
            });
        };
        slots[index] = None;
        drop(slots);

        tracing::debug!(host = %self.host, %holder, slot = index, "released");
        self.wake();
        Ok(())
    }

    /// Clear every slot whose holder is dead
    ///
    /// Returns the reclaimed holders. Calling it again without intervening
    /// deaths reclaims nothing.
    pub fn cleanup(&self) -> Vec<HolderId> {
        let mut slots = self.lock_slots();
        let mut reclaimed = Vec::new();
        for (index, slot) in slots.iter_mut().enumerate() {
            let Some(holder) = *slot else { continue };
            if !self.probe.is_alive(holder) {
                tracing::warn!(host = %self.host, %holder, slot = index, "cleared dead holder");
                *slot = None;
                reclaimed.push(holder);
            }
        }
        drop(slots);

        if !reclaimed.is_empty() {
            tracing::info!(host = %self.host, count = reclaimed.len(), "cleanup reclaimed slots");
            self.wake();
        }
        reclaimed
    }

    /// One line per slot: the holder, or `empty`
    pub fn report(&self) -> Vec<String> {
        self.slot_lines(&self.slots()).collect()
    }

    /// An `occupied/capacity` header followed by [`HostSemaphore::report`]'s
    /// lines, all taken from one snapshot so the header matches the slots
    pub fn summary(&self) -> Vec<String> {
        let slots = self.slots();
        let occupied = slots.iter().filter_map(SlotState::holder).count();
        let header = format!("{}: {occupied}/{} slots held", self.host, slots.len());
        std::iter::once(header).chain(self.slot_lines(&slots)).collect()
    }

    fn slot_lines<'a>(&'a self, slots: &'a [SlotState]) -> impl Iterator<Item = String> + 'a {
        slots
            .iter()
            .enumerate()
            .map(move |(index, slot)| format!("{}[{index}]: {slot}", self.host))
    }

    fn claim(
        &self,
        slots: &mut [Option<HolderId>],
        holder: HolderId,
    ) -> Result<Option<usize>, SemaphoreError> {
        if let Some(slot) = slots.iter().position(|s| *s == Some(holder)) {
            return Err(SemaphoreError::AlreadyHeld {
                host: self.host.clone(),
                holder,
                slot,
            });
        }

        if let Some(index) = slots.iter().position(Option::is_none) {
            slots[index] = Some(holder);
            tracing::debug!(host = %self.host, %holder, slot = index, "acquired");
            return Ok(Some(index));
        }

        let dead = slots
            .iter()
            .position(|slot| slot.is_some_and(|h| !self.probe.is_alive(h)));
        let Some(index) = dead else {
            return Ok(None);
        };
        if let Some(previous) = slots[index].replace(holder) {
            tracing::warn!(
                host = %self.host,
                %holder,
                %previous,
                slot = index,
                "reclaimed slot from dead holder"
            );
        }
        Ok(Some(index))
    }

    fn next_wait(&self, started: Instant) -> Result<Duration, SemaphoreError> {
        let Some(timeout) = self.acquire_timeout else {
            return Ok(self.poll_interval);
        };
        match timeout.checked_sub(started.elapsed()) {
            Some(remaining) if !remaining.is_zero() => Ok(remaining.min(self.poll_interval)),
            _ => Err(SemaphoreError::Timeout {
                host: self.host.clone(),
                waited: started.elapsed(),
            }),
        }
    }

    fn wake(&self) {
        self.freed.notify_all();
        self.notify.notify_waiters();
    }

    fn lock_slots(&self) -> MutexGuard<'_, Vec<Option<HolderId>>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<P> std::fmt::Debug for HostSemaphore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostSemaphore")
            .field("host", &self.host)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
