// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for slot acquisition and release

use crate::id::{HolderId, Host};
use std::time::Duration;
use thiserror::Error;

/// Errors from semaphore operations
#[derive(Debug, Error)]
pub enum SemaphoreError {
    #[error("unknown host: {0}")]
    UnknownHost(String),
    /// The holder's slot was reclaimed while its work was still running,
    /// so the critical section ran unprotected for some interval.
    #[error("lock of holder {holder} on host {host} was reclaimed before release")]
    LockRelease { host: Host, holder: HolderId },
    #[error("holder {holder} already occupies slot {slot} on host {host}")]
    AlreadyHeld {
        host: Host,
        holder: HolderId,
        slot: usize,
    },
    #[error("timed out after {waited:?} waiting for a slot on host {host}")]
    Timeout { host: Host, waited: Duration },
}

impl SemaphoreError {
    /// True if this error reports a stolen lock
    pub fn is_lock_release(&self) -> bool {
        matches!(self, SemaphoreError::LockRelease { .. })
    }
}

/// Errors from a synchronized unit of work
///
/// A failed release outranks the work's own error. When both fail the work
/// error is carried along in [`SyncError::Unprotected`].
#[derive(Debug, Error)]
pub enum SyncError<E> {
    #[error(transparent)]
    Semaphore(#[from] SemaphoreError),
    #[error("{0}")]
    Work(E),
    #[error("{release} (work also failed: {work})")]
    Unprotected { release: SemaphoreError, work: E },
}

impl<E> SyncError<E> {
    /// The semaphore error, if the limiter itself failed
    pub fn semaphore_error(&self) -> Option<&SemaphoreError> {
        match self {
            SyncError::Semaphore(e) | SyncError::Unprotected { release: e, .. } => Some(e),
            SyncError::Work(_) => None,
        }
    }

    /// The work's own error, if the work failed
    pub fn work_error(&self) -> Option<&E> {
        match self {
            SyncError::Work(e) | SyncError::Unprotected { work: e, .. } => Some(e),
            SyncError::Semaphore(_) => None,
        }
    }

    /// True if the holder's lock was stolen during the work
    pub fn is_lock_release(&self) -> bool {
        self.semaphore_error()
            .is_some_and(SemaphoreError::is_lock_release)
    }
}
