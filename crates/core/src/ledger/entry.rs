//! Journal entry domain types.

use chrono::{DateTime, Utc};
use maplebank_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Money entering the system from outside (payroll, cash deposit).
    Deposit,
    /// Money leaving the account (transfer out, bill payment, e-Transfer).
    Debit,
    /// Money arriving at the account from another account.
    Credit,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "DEPOSIT"),
            Self::Debit => write!(f, "DEBIT"),
            Self::Credit => write!(f, "CREDIT"),
        }
    }
}

/// An immutable journal entry describing one balance-affecting event.
///
/// Entries belong to exactly one account; a two-account transfer produces
/// one debit entry on the source and one credit entry on the destination,
/// never a shared record. Entries are created once and never updated or
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the journal at append time.
    pub id: TransactionId,
    /// The account this entry belongs to.
    pub account_id: AccountId,
    /// Whether this entry deposits, debits, or credits the account.
    pub entry_type: EntryType,
    /// Entry amount, strictly positive.
    pub amount: Decimal,
    /// Human-readable description; the engine supplies a default when the
    /// caller gives none.
    pub description: String,
    /// When the entry was committed, used for newest-first ordering.
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Returns the signed effect of this entry on the account balance.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.entry_type {
            EntryType::Deposit | EntryType::Credit => self.amount,
            EntryType::Debit => -self.amount,
        }
    }
}

/// Input for appending one journal entry.
///
/// The engine fills in the timestamp so that both legs of a transfer carry
/// the same commit instant; the journal assigns the id.
#[derive(Debug, Clone)]
pub struct JournalEntryInput {
    /// The account to record the entry against.
    pub account_id: AccountId,
    /// Entry type.
    pub entry_type: EntryType,
    /// Entry amount, strictly positive.
    pub amount: Decimal,
    /// Resolved description.
    pub description: String,
    /// Commit instant.
    pub timestamp: DateTime<Utc>,
}
