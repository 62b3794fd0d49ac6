//! In-memory account store with atomic conditional balance updates.

use dashmap::DashMap;
use maplebank_shared::types::{AccountId, UserId};
use maplebank_core::ledger::{Account, AccountStore, StoreError};
use rust_decimal::Decimal;

/// Account store backed by a concurrent map.
///
/// `apply_delta` runs its read-check-write while holding the map's
/// per-key write guard, so two concurrent debits against one account are
/// serialized and can never both pass the sufficient-funds check against
/// the same stale balance. The engine never holds two guards at once (it
/// issues its deltas sequentially), so no lock-ordering rule is needed.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<AccountId, Account>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn get_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().account_number == account_number)
            .map(|entry| entry.value().clone()))
    }

    fn insert(&self, account: Account) -> Result<(), StoreError> {
        // Account numbers are globally unique.
        if self
            .accounts
            .iter()
            .any(|entry| entry.value().account_number == account.account_number)
        {
            return Err(StoreError::Backend(format!(
                "duplicate account number {}",
                account.account_number
            )));
        }
        self.accounts.insert(account.id, account);
        Ok(())
    }

    fn apply_delta(&self, id: AccountId, delta: Decimal) -> Result<Decimal, StoreError> {
        // The guard from get_mut keeps the whole read-check-write atomic.
        let mut account = self.accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
        let new_balance = account.balance + delta;
        if new_balance < Decimal::ZERO {
            return Err(StoreError::InsufficientFunds {
                balance: account.balance,
            });
        }
        account.balance = new_balance;
        Ok(new_balance)
    }
}
