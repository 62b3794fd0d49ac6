//! Money movement and ledger consistency.
//!
//! This module implements the core ledger functionality:
//! - Account and payee domain types
//! - Journal entries (deposits, debits, credits)
//! - Storage contracts for the account store, payee store, and journal
//! - Ownership guards
//! - Description fallback resolution
//! - The money-movement engine (transfers, bill payments, Interac e-Transfers)
//! - Error types for ledger operations

pub mod account;
pub mod description;
pub mod engine;
pub mod entry;
pub mod error;
pub mod guard;
pub mod payee;
pub mod store;

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod engine_props;

pub use account::{Account, AccountType};
pub use description::resolve_description;
pub use engine::{
    AddPayeeInput, BillPaymentInput, InteracRequestInput, InteracSendInput, MoneyMovementEngine,
    PaymentReceipt, TransferInput, TransferReceipt,
};
pub use entry::{EntryType, JournalEntryInput, Transaction};
pub use error::LedgerError;
pub use guard::{owns_account, owns_payee};
pub use payee::Payee;
pub use store::{AccountStore, PayeeStore, StoreError, TransactionJournal};
