//! In-memory append-only transaction journal.

use dashmap::DashMap;
use maplebank_shared::types::{AccountId, TransactionId};
use maplebank_core::ledger::{JournalEntryInput, StoreError, Transaction, TransactionJournal};

/// Journal backed by per-account append-only vectors.
///
/// Entries are kept in commit order per account; `list_by_account` returns
/// that order reversed. Appends happen strictly after the corresponding
/// balance mutation commits, so commit order and timestamp order agree,
/// and the insertion position deterministically breaks ties between the
/// two legs of one transfer (which share a timestamp).
#[derive(Debug, Default)]
pub struct MemoryJournal {
    entries: DashMap<AccountId, Vec<Transaction>>,
}

impl MemoryJournal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionJournal for MemoryJournal {
    fn append(&self, entry: JournalEntryInput) -> Result<Transaction, StoreError> {
        let transaction = Transaction {
            id: TransactionId::new(),
            account_id: entry.account_id,
            entry_type: entry.entry_type,
            amount: entry.amount,
            description: entry.description,
            timestamp: entry.timestamp,
        };
        self.entries
            .entry(transaction.account_id)
            .or_default()
            .push(transaction.clone());
        Ok(transaction)
    }

    fn list_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .entries
            .get(&account_id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}
