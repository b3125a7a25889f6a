//! Reentrancy guard
//!
//! One shared "operation in progress" flag covers every state-mutating entry
//! point. An external transfer that calls back into the registry before the
//! current operation finishes trips the flag and fails with
//! [`Error::Reentrancy`](crate::Error::Reentrancy).

use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared operation-in-progress flag
#[derive(Debug, Clone, Default)]
pub struct ReentrancyFlag(Arc<AtomicBool>);

impl ReentrancyFlag {
    /// Create a released flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the flag for the duration of one entry point.
    ///
    /// The returned guard releases on drop, covering every exit path.
    pub fn enter(&self) -> Result<EntryGuard> {
        if self
            .0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::Reentrancy);
        }
        Ok(EntryGuard(self.0.clone()))
    }
}

/// Scoped acquisition of the reentrancy flag
#[derive(Debug)]
pub struct EntryGuard(Arc<AtomicBool>);

impl Drop for EntryGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
