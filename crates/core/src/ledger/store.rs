//! Storage contracts the engine orchestrates.
//!
//! Persistence is an external collaborator: the engine is written against
//! these traits and never against a concrete backend. The one contract with
//! real teeth is [`AccountStore::apply_delta`], the single atomic
//! conditional write through which every balance mutation flows.

use maplebank_shared::types::{AccountId, PayeeId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::account::Account;
use super::entry::{JournalEntryInput, Transaction};
use super::payee::Payee;

/// Errors reported by storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("record not found")]
    NotFound,

    /// The delta would take the balance below zero.
    #[error("insufficient funds: balance is {balance}")]
    InsufficientFunds {
        /// The balance observed at rejection time.
        balance: Decimal,
    },

    /// The backend could not complete the read/write.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Durable keyed storage of [`Account`] records.
pub trait AccountStore: Send + Sync {
    /// Point lookup by identifier. Absence is not an error.
    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError>;

    /// All accounts owned by a customer, order insignificant.
    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Account>, StoreError>;

    /// Lookup by globally unique account number.
    fn get_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError>;

    /// Stores a newly opened account.
    fn insert(&self, account: Account) -> Result<(), StoreError>;

    /// Atomically adds `delta` to the balance of account `id`.
    ///
    /// The read-check-write must be one critical section per account:
    /// two concurrent debits must never both pass the sufficient-funds
    /// check against the same stale balance. Rejects with
    /// [`StoreError::InsufficientFunds`] when `balance + delta < 0`,
    /// leaving the balance untouched. Returns the new balance on success.
    fn apply_delta(&self, id: AccountId, delta: Decimal) -> Result<Decimal, StoreError>;
}

/// Durable keyed storage of [`Payee`] records.
pub trait PayeeStore: Send + Sync {
    /// Point lookup by identifier.
    fn get(&self, id: PayeeId) -> Result<Option<Payee>, StoreError>;

    /// All payees registered by a customer.
    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Payee>, StoreError>;

    /// Stores a newly registered payee.
    fn insert(&self, payee: Payee) -> Result<(), StoreError>;

    /// Deletes a payee. The ownership check happens in the engine.
    fn remove(&self, id: PayeeId) -> Result<(), StoreError>;
}

/// Append-only durable storage of journal entries.
pub trait TransactionJournal: Send + Sync {
    /// Durably stores one immutable entry, assigning its id.
    fn append(&self, entry: JournalEntryInput) -> Result<Transaction, StoreError>;

    /// All entries for an account, newest first. Two calls with no
    /// intervening append return identical sequences.
    fn list_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, StoreError>;
}
