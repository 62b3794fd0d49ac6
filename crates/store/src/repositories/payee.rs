//! In-memory payee store.

use dashmap::DashMap;
use maplebank_shared::types::{PayeeId, UserId};
use maplebank_core::ledger::{Payee, PayeeStore, StoreError};

/// Payee store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryPayeeStore {
    payees: DashMap<PayeeId, Payee>,
}

impl MemoryPayeeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayeeStore for MemoryPayeeStore {
    fn get(&self, id: PayeeId) -> Result<Option<Payee>, StoreError> {
        Ok(self.payees.get(&id).map(|entry| entry.value().clone()))
    }

    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Payee>, StoreError> {
        Ok(self
            .payees
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn insert(&self, payee: Payee) -> Result<(), StoreError> {
        self.payees.insert(payee.id, payee);
        Ok(())
    }

    fn remove(&self, id: PayeeId) -> Result<(), StoreError> {
        self.payees
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
