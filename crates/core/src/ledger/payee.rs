//! Registered bill-payment payees.

use maplebank_shared::types::{PayeeId, UserId};
use serde::{Deserialize, Serialize};

/// A payee registered by a customer for bill payments.
///
/// Payees are per-customer: a bill payment is only permitted against a
/// payee the caller registered themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payee {
    /// Unique identifier.
    pub id: PayeeId,
    /// Display name of the biller (e.g. "Hydro Quebec").
    pub name: String,
    /// Account number at the biller, if known.
    pub account_number: Option<String>,
    /// Free-text category (e.g. "UTILITY", "CREDIT_CARD").
    pub category: Option<String>,
    /// The customer who registered this payee.
    pub owner_id: UserId,
}
