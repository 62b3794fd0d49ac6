//! Deposit account domain types.

use maplebank_shared::types::{AccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of deposit account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Everyday chequing account.
    Chequing,
    /// Interest-bearing savings account.
    Savings,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chequing => write!(f, "CHEQUING"),
            Self::Savings => write!(f, "SAVINGS"),
        }
    }
}

/// A customer deposit account.
///
/// The balance is a fixed-point decimal at scale 2 and is never persisted
/// negative: the account store's conditional write rejects any delta that
/// would overdraw it. Every field other than `balance` is immutable after
/// account opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Globally unique account number (e.g. "BCA001234567").
    pub account_number: String,
    /// Account type.
    pub account_type: AccountType,
    /// Current balance, scale 2, non-negative at rest.
    pub balance: Decimal,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// The customer who owns this account.
    pub owner_id: UserId,
}
