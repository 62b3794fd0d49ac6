//! Error types for ledger operations.
//!
//! Business-level rejections (not-found, forbidden, insufficient funds,
//! invalid amounts) are ordinary negative outcomes; only storage faults
//! and failed compensation are fatal for the in-flight operation.

use maplebank_shared::types::{AccountId, PayeeId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Operation amount must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    // ========== Lookup Errors ==========
    /// Referenced account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced payee does not exist.
    #[error("Payee not found: {0}")]
    PayeeNotFound(PayeeId),

    // ========== Ownership Errors ==========
    /// The caller does not own the account.
    #[error("Account {account_id} is not owned by caller {caller}")]
    NotAccountOwner {
        /// The account the caller tried to operate on.
        account_id: AccountId,
        /// The authenticated caller.
        caller: UserId,
    },

    /// The caller did not register the payee.
    #[error("Payee {payee_id} is not owned by caller {caller}")]
    NotPayeeOwner {
        /// The payee the caller tried to pay.
        payee_id: PayeeId,
        /// The authenticated caller.
        caller: UserId,
    },

    // ========== Funds Errors ==========
    /// The debit would take the balance below zero.
    #[error(
        "Insufficient funds in account {account_id}: balance {balance}, requested {requested}"
    )]
    InsufficientFunds {
        /// The account that rejected the debit.
        account_id: AccountId,
        /// The balance observed at rejection time.
        balance: Decimal,
        /// The amount the operation tried to remove.
        requested: Decimal,
    },

    // ========== Storage Errors ==========
    /// The storage backend could not complete a read/write.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// A multi-step operation partially committed and its compensation
    /// also failed; the account needs manual reconciliation.
    #[error("Account {account_id} requires reconciliation: {amount} could not be restored")]
    ReconciliationRequired {
        /// The account left in an inconsistent state.
        account_id: AccountId,
        /// The signed amount that could not be restored.
        amount: Decimal,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::PayeeNotFound(_) => "PAYEE_NOT_FOUND",
            Self::NotAccountOwner { .. } => "NOT_ACCOUNT_OWNER",
            Self::NotPayeeOwner { .. } => "NOT_PAYEE_OWNER",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Storage(_) => "STORAGE_FAILURE",
            Self::ReconciliationRequired { .. } => "RECONCILIATION_REQUIRED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::NonPositiveAmount(_) => 400,

            // 403 Forbidden - ownership errors
            Self::NotAccountOwner { .. } | Self::NotPayeeOwner { .. } => 403,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::PayeeNotFound(_) => 404,

            // 422 Unprocessable Entity - business rejection
            Self::InsufficientFunds { .. } => 422,

            // 500 Internal Server Error
            Self::Storage(_) | Self::ReconciliationRequired { .. } => 500,
        }
    }

    /// Returns true for normal business-level rejections: outcomes the
    /// caller handles as operation failure rather than a fault.
    #[must_use]
    pub const fn is_business_rejection(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::ReconciliationRequired { .. })
    }
}

impl From<StoreError> for LedgerError {
    /// Context-free fallback mapping for storage errors.
    ///
    /// The engine maps `NotFound` and `InsufficientFunds` explicitly where
    /// it knows which account was involved; this impl covers backend
    /// faults surfacing through `?`.
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
