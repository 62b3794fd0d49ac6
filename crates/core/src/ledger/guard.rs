//! Ownership guards binding accounts and payees to their owning customer.

use maplebank_shared::types::UserId;

use super::account::Account;
use super::payee::Payee;

/// Returns true if `caller` owns the account.
#[must_use]
pub fn owns_account(account: &Account, caller: UserId) -> bool {
    account.owner_id == caller
}

/// Returns true if `caller` registered the payee.
#[must_use]
pub fn owns_payee(payee: &Payee, caller: UserId) -> bool {
    payee.owner_id == caller
}
