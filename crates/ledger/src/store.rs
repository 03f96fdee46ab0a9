//! Transactional wrapper around [`LedgerState`].
//!
//! Writers stage their changes on a clone of the state while holding the
//! write lock; the clone replaces the live state only when the closure
//! succeeds. Any error drops the staged copy, so a unit of work is
//! all-or-nothing. Holding the lock for the whole closure serializes
//! writers, which is what keeps concurrent stock and balance updates from
//! losing increments.
//!
//! A SQL-backed store would discharge the same contract with row locks and
//! unique constraints instead.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anvil_core::DomainResult;

use crate::state::LedgerState;

#[derive(Debug, Default)]
pub struct LedgerStore {
    state: RwLock<LedgerState>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState::new()),
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, LedgerState> {
        // A poisoned lock means a writer panicked mid-closure; the live
        // state was never touched, so it is still consistent.
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, LedgerState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Run a unit of work. Commits only when `f` returns `Ok`.
    pub fn transaction<T>(
        &self,
        f: impl FnOnce(&mut LedgerState) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let mut guard = self.write_guard();
        let mut staged = guard.clone();
        let value = f(&mut staged)?;
        *guard = staged;
        Ok(value)
    }

    /// Snapshot read.
    pub fn read<T>(&self, f: impl FnOnce(&LedgerState) -> T) -> T {
        f(&self.read_guard())
    }
}
