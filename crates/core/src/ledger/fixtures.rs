//! Hand-rolled in-memory collaborators for engine tests.
//!
//! The real reference backend lives in `maplebank-store`; these minimal
//! stores exist so the core crate can test the engine's orchestration and
//! compensation logic without any outside dependency, including wrappers
//! that inject storage faults at a chosen call.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use maplebank_shared::types::{AccountId, PayeeId, TransactionId, UserId};
use rust_decimal::Decimal;

use super::account::{Account, AccountType};
use super::entry::{JournalEntryInput, Transaction};
use super::payee::Payee;
use super::store::{AccountStore, PayeeStore, StoreError, TransactionJournal};

/// Builds a chequing account with the given owner, number, and balance.
pub fn account_with_balance(owner: UserId, number: &str, balance: Decimal) -> Account {
    Account {
        id: AccountId::new(),
        account_number: number.to_string(),
        account_type: AccountType::Chequing,
        balance,
        description: None,
        owner_id: owner,
    }
}

/// Builds a payee registered by `owner`.
pub fn payee_for(owner: UserId, name: &str) -> Payee {
    Payee {
        id: PayeeId::new(),
        name: name.to_string(),
        account_number: None,
        category: Some("UTILITY".to_string()),
        owner_id: owner,
    }
}

/// Mutex-guarded map of accounts; `apply_delta` is one critical section.
#[derive(Default)]
pub struct MemAccounts {
    inner: Mutex<HashMap<AccountId, Account>>,
}

impl AccountStore for MemAccounts {
    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.inner.lock().unwrap().get(&id).cloned())
    }

    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn get_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .values()
            .find(|a| a.account_number == account_number)
            .cloned())
    }

    fn insert(&self, account: Account) -> Result<(), StoreError> {
        self.inner.lock().unwrap().insert(account.id, account);
        Ok(())
    }

    fn apply_delta(&self, id: AccountId, delta: Decimal) -> Result<Decimal, StoreError> {
        let mut accounts = self.inner.lock().unwrap();
        let account = accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
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

/// Mutex-guarded map of payees.
#[derive(Default)]
pub struct MemPayees {
    inner: Mutex<HashMap<PayeeId, Payee>>,
}

impl PayeeStore for MemPayees {
    fn get(&self, id: PayeeId) -> Result<Option<Payee>, StoreError> {
        Ok(self.inner.lock().unwrap().get(&id).cloned())
    }

    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Payee>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn insert(&self, payee: Payee) -> Result<(), StoreError> {
        self.inner.lock().unwrap().insert(payee.id, payee);
        Ok(())
    }

    fn remove(&self, id: PayeeId) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

/// Append-only journal keeping per-account insertion order.
#[derive(Default)]
pub struct MemJournal {
    inner: Mutex<HashMap<AccountId, Vec<Transaction>>>,
}

impl TransactionJournal for MemJournal {
    fn append(&self, entry: JournalEntryInput) -> Result<Transaction, StoreError> {
        let transaction = Transaction {
            id: TransactionId::new(),
            account_id: entry.account_id,
            entry_type: entry.entry_type,
            amount: entry.amount,
            description: entry.description,
            timestamp: entry.timestamp,
        };
        self.inner
            .lock()
            .unwrap()
            .entry(transaction.account_id)
            .or_default()
            .push(transaction.clone());
        Ok(transaction)
    }

    fn list_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .get(&account_id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}

/// Account store wrapper that fails chosen `apply_delta` calls.
pub struct FailingAccounts<S> {
    inner: Arc<S>,
    calls: AtomicUsize,
    fail_start: usize,
    fail_end: usize,
}

impl<S: AccountStore> FailingAccounts<S> {
    /// Fails only the `n`-th `apply_delta` call (1-based).
    pub fn fail_on(inner: Arc<S>, n: usize) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_start: n,
            fail_end: n,
        }
    }

    /// Fails every `apply_delta` call from the `n`-th onward (1-based).
    pub fn fail_from(inner: Arc<S>, n: usize) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_start: n,
            fail_end: usize::MAX,
        }
    }
}

impl<S: AccountStore> AccountStore for FailingAccounts<S> {
    fn get(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        self.inner.get(id)
    }

    fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Account>, StoreError> {
        self.inner.get_by_owner(owner_id)
    }

    fn get_by_number(&self, account_number: &str) -> Result<Option<Account>, StoreError> {
        self.inner.get_by_number(account_number)
    }

    fn insert(&self, account: Account) -> Result<(), StoreError> {
        self.inner.insert(account)
    }

    fn apply_delta(&self, id: AccountId, delta: Decimal) -> Result<Decimal, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call >= self.fail_start && call <= self.fail_end {
            return Err(StoreError::Backend("injected fault".to_string()));
        }
        self.inner.apply_delta(id, delta)
    }
}

/// Journal wrapper that fails chosen `append` calls.
pub struct FailingJournal<J> {
    inner: Arc<J>,
    calls: AtomicUsize,
    fail_on: usize,
}

impl<J: TransactionJournal> FailingJournal<J> {
    /// Fails only the `n`-th `append` call (1-based).
    pub fn fail_on(inner: Arc<J>, n: usize) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            fail_on: n,
        }
    }
}

impl<J: TransactionJournal> TransactionJournal for FailingJournal<J> {
    fn append(&self, entry: JournalEntryInput) -> Result<Transaction, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(StoreError::Backend("injected fault".to_string()));
        }
        self.inner.append(entry)
    }

    fn list_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, StoreError> {
        self.inner.list_by_account(account_id)
    }
}
