//! The money-movement engine.
//!
//! Orchestrates the three operation families — internal transfer, bill
//! payment, and Interac e-Transfer send — on top of the storage contracts
//! and the ownership guards. Each operation applies its balance delta and
//! its journal entries as one logical unit: the store's conditional write
//! serializes per-account mutation, and the engine owns the compensation
//! logic that restores atomicity when the second leg of a transfer fails.

use std::sync::Arc;

use chrono::Utc;
use maplebank_shared::types::{AccountId, PayeeId, UserId};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::account::Account;
use super::description::resolve_description;
use super::entry::{EntryType, JournalEntryInput, Transaction};
use super::error::LedgerError;
use super::guard;
use super::payee::Payee;
use super::store::{AccountStore, PayeeStore, StoreError, TransactionJournal};

/// Input for an internal account-to-account transfer.
#[derive(Debug, Clone)]
pub struct TransferInput {
    /// Source account; must be owned by the caller.
    pub from_account_id: AccountId,
    /// Destination account; may belong to another customer.
    pub to_account_id: AccountId,
    /// Amount to move, strictly positive.
    pub amount: Decimal,
    /// Optional caller-supplied description for both legs.
    pub description: Option<String>,
    /// The authenticated caller.
    pub caller: UserId,
}

/// Input for a bill payment to a registered payee.
#[derive(Debug, Clone)]
pub struct BillPaymentInput {
    /// Account to debit; must be owned by the caller.
    pub account_id: AccountId,
    /// Payee to pay; must be registered by the caller.
    pub payee_id: PayeeId,
    /// Amount to pay, strictly positive.
    pub amount: Decimal,
    /// Optional caller-supplied memo.
    pub memo: Option<String>,
    /// The authenticated caller.
    pub caller: UserId,
}

/// Input for an outbound Interac e-Transfer.
#[derive(Debug, Clone)]
pub struct InteracSendInput {
    /// Account to debit; must be owned by the caller.
    pub account_id: AccountId,
    /// Recipient e-mail address.
    pub recipient_email: String,
    /// Amount to send, strictly positive.
    pub amount: Decimal,
    /// Optional caller-supplied message.
    pub message: Option<String>,
    /// The authenticated caller.
    pub caller: UserId,
}

/// Input for an Interac request-money authorization.
#[derive(Debug, Clone)]
pub struct InteracRequestInput {
    /// Account the requested funds would land in; must be owned by the caller.
    pub account_id: AccountId,
    /// The party the money is requested from.
    pub requestor_email: String,
    /// Amount requested.
    pub amount: Decimal,
    /// Optional message.
    pub message: Option<String>,
    /// The authenticated caller.
    pub caller: UserId,
}

/// Input for registering a new bill-payment payee.
#[derive(Debug, Clone)]
pub struct AddPayeeInput {
    /// Display name of the biller.
    pub name: String,
    /// Account number at the biller, if known.
    pub account_number: Option<String>,
    /// Free-text category.
    pub category: Option<String>,
    /// The authenticated caller; becomes the payee's owner.
    pub caller: UserId,
}

/// Result of a committed transfer.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// The debit entry recorded on the source account.
    pub debit: Transaction,
    /// The credit entry recorded on the destination account.
    pub credit: Transaction,
    /// Source balance after the transfer.
    pub from_balance: Decimal,
    /// Destination balance after the transfer.
    pub to_balance: Decimal,
}

/// Result of a committed single-debit operation (bill payment, e-Transfer).
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// The debit entry recorded on the account.
    pub debit: Transaction,
    /// Account balance after the debit.
    pub balance: Decimal,
}

/// Money-movement engine over injected storage handles.
///
/// Holds no state of its own beyond the store handles; all mutation goes
/// through [`AccountStore::apply_delta`], so the engine never reads a
/// balance and writes it back in separate steps.
pub struct MoneyMovementEngine<A, P, J> {
    accounts: Arc<A>,
    payees: Arc<P>,
    journal: Arc<J>,
}

impl<A, P, J> MoneyMovementEngine<A, P, J>
where
    A: AccountStore,
    P: PayeeStore,
    J: TransactionJournal,
{
    /// Creates an engine over the given storage handles.
    pub fn new(accounts: Arc<A>, payees: Arc<P>, journal: Arc<J>) -> Self {
        Self {
            accounts,
            payees,
            journal,
        }
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Moves `amount` from one account to another.
    ///
    /// Only the source account must be owned by the caller; transfers to
    /// another customer's account are permitted. On success exactly one
    /// debit entry and one credit entry are journaled, both carrying the
    /// same amount and the same commit timestamp.
    ///
    /// # Errors
    ///
    /// Business rejections (`NonPositiveAmount`, `AccountNotFound`,
    /// `NotAccountOwner`, `InsufficientFunds`) leave no side effects.
    /// If the credit leg fails after the debit leg committed, the engine
    /// reverses the debit before reporting the failure; if that reversal
    /// itself fails, `ReconciliationRequired` is returned instead.
    pub fn transfer(&self, input: &TransferInput) -> Result<TransferReceipt, LedgerError> {
        Self::require_positive(input.amount)?;
        let from = self.load_account(input.from_account_id)?;
        let to = self.load_account(input.to_account_id)?;
        Self::require_account_owner(&from, input.caller)?;

        // Debit leg. The store's conditional write is the serialization
        // point: a stale-balance double debit cannot pass here.
        let from_balance = self.withdraw(&from, input.amount)?;

        // Credit leg, with compensation of the debit when it cannot commit.
        let to_balance = match self.accounts.apply_delta(to.id, input.amount) {
            Ok(balance) => balance,
            Err(err) => {
                warn!(
                    from = %from.id,
                    to = %to.id,
                    amount = %input.amount,
                    error = %err,
                    "credit leg failed, reversing debit leg"
                );
                let cause = match err {
                    StoreError::NotFound => LedgerError::AccountNotFound(to.id),
                    other => LedgerError::Storage(other.to_string()),
                };
                return Err(self.reverse_or_reconcile(from.id, input.amount, cause));
            }
        };

        // Both legs share one commit instant.
        let now = Utc::now();
        let debit_entry = JournalEntryInput {
            account_id: from.id,
            entry_type: EntryType::Debit,
            amount: input.amount,
            description: resolve_description(input.description.as_deref(), || {
                format!("Transfer to {}", to.account_number)
            }),
            timestamp: now,
        };
        let credit_entry = JournalEntryInput {
            account_id: to.id,
            entry_type: EntryType::Credit,
            amount: input.amount,
            description: resolve_description(input.description.as_deref(), || {
                format!("Transfer from {}", from.account_number)
            }),
            timestamp: now,
        };

        let debit = match self.journal.append(debit_entry) {
            Ok(entry) => entry,
            Err(err) => return Err(self.unwind_transfer(from.id, to.id, input.amount, &err)),
        };
        let credit = match self.journal.append(credit_entry) {
            Ok(entry) => entry,
            Err(err) => return Err(self.unwind_transfer(from.id, to.id, input.amount, &err)),
        };

        info!(
            from = %from.id,
            to = %to.id,
            amount = %input.amount,
            "transfer committed"
        );
        Ok(TransferReceipt {
            debit,
            credit,
            from_balance,
            to_balance,
        })
    }

    /// Pays a registered payee from the caller's account.
    ///
    /// Requires ownership of both the account and the payee. Money is
    /// modeled as leaving the system: one debit entry, no compensating
    /// credit anywhere.
    ///
    /// # Errors
    ///
    /// Business rejections leave no side effects; a journal fault after
    /// the committed debit triggers the same compensation as transfers.
    pub fn bill_payment(&self, input: &BillPaymentInput) -> Result<PaymentReceipt, LedgerError> {
        Self::require_positive(input.amount)?;
        let account = self.load_account(input.account_id)?;
        let payee = self.load_payee(input.payee_id)?;
        Self::require_account_owner(&account, input.caller)?;
        Self::require_payee_owner(&payee, input.caller)?;

        let balance = self.withdraw(&account, input.amount)?;

        let entry = JournalEntryInput {
            account_id: account.id,
            entry_type: EntryType::Debit,
            amount: input.amount,
            description: resolve_description(input.memo.as_deref(), || {
                format!("Bill payment to {}", payee.name)
            }),
            timestamp: Utc::now(),
        };
        let debit = match self.journal.append(entry) {
            Ok(entry) => entry,
            Err(err) => {
                return Err(self.reverse_or_reconcile(account.id, input.amount, err.into()));
            }
        };

        info!(
            account = %account.id,
            payee = %payee.id,
            amount = %input.amount,
            "bill payment committed"
        );
        Ok(PaymentReceipt { debit, balance })
    }

    /// Sends an outbound Interac e-Transfer from the caller's account.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::bill_payment`], without the payee checks.
    pub fn interac_send(&self, input: &InteracSendInput) -> Result<PaymentReceipt, LedgerError> {
        Self::require_positive(input.amount)?;
        let account = self.load_account(input.account_id)?;
        Self::require_account_owner(&account, input.caller)?;

        let balance = self.withdraw(&account, input.amount)?;

        let entry = JournalEntryInput {
            account_id: account.id,
            entry_type: EntryType::Debit,
            amount: input.amount,
            description: resolve_description(input.message.as_deref(), || {
                format!("Interac e-Transfer to {}", input.recipient_email)
            }),
            timestamp: Utc::now(),
        };
        let debit = match self.journal.append(entry) {
            Ok(entry) => entry,
            Err(err) => {
                return Err(self.reverse_or_reconcile(account.id, input.amount, err.into()));
            }
        };

        info!(
            account = %account.id,
            recipient = %input.recipient_email,
            amount = %input.amount,
            "interac send committed"
        );
        Ok(PaymentReceipt { debit, balance })
    }

    /// Authorizes an Interac request-money operation.
    ///
    /// Checks ownership of the receiving account and nothing else: no
    /// balance mutation, no journal entry. Notifying the requestor is an
    /// external collaborator's responsibility.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` or `NotAccountOwner` only.
    pub fn interac_request(&self, input: &InteracRequestInput) -> Result<(), LedgerError> {
        let account = self.load_account(input.account_id)?;
        Self::require_account_owner(&account, input.caller)?;
        info!(
            account = %account.id,
            requestor = %input.requestor_email,
            amount = %input.amount,
            "interac request authorized"
        );
        Ok(())
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    /// All accounts owned by the caller.
    pub fn accounts_for(&self, caller: UserId) -> Result<Vec<Account>, LedgerError> {
        Ok(self.accounts.get_by_owner(caller)?)
    }

    /// Point lookup of one account.
    pub fn account(&self, id: AccountId) -> Result<Option<Account>, LedgerError> {
        Ok(self.accounts.get(id)?)
    }

    /// Lookup by globally unique account number.
    pub fn account_by_number(&self, number: &str) -> Result<Option<Account>, LedgerError> {
        Ok(self.accounts.get_by_number(number)?)
    }

    /// Journal entries for an account, newest first.
    pub fn transactions_for(&self, account_id: AccountId) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.journal.list_by_account(account_id)?)
    }

    // ========================================================================
    // Payee management
    // ========================================================================

    /// All payees registered by the caller.
    pub fn payees_for(&self, caller: UserId) -> Result<Vec<Payee>, LedgerError> {
        Ok(self.payees.get_by_owner(caller)?)
    }

    /// Registers a new payee for the caller.
    pub fn add_payee(&self, input: AddPayeeInput) -> Result<Payee, LedgerError> {
        let payee = Payee {
            id: PayeeId::new(),
            name: input.name,
            account_number: input.account_number,
            category: input.category,
            owner_id: input.caller,
        };
        self.payees.insert(payee.clone())?;
        Ok(payee)
    }

    /// Deletes a payee the caller registered.
    ///
    /// # Errors
    ///
    /// `PayeeNotFound` or `NotPayeeOwner`.
    pub fn remove_payee(&self, payee_id: PayeeId, caller: UserId) -> Result<(), LedgerError> {
        let payee = self.load_payee(payee_id)?;
        Self::require_payee_owner(&payee, caller)?;
        self.payees.remove(payee_id).map_err(|err| match err {
            StoreError::NotFound => LedgerError::PayeeNotFound(payee_id),
            other => other.into(),
        })
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn require_positive(amount: Decimal) -> Result<(), LedgerError> {
        // The request layer validates this too; the engine re-checks as its
        // own invariant and never trusts the caller exclusively.
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        Ok(())
    }

    fn load_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn load_payee(&self, id: PayeeId) -> Result<Payee, LedgerError> {
        self.payees.get(id)?.ok_or(LedgerError::PayeeNotFound(id))
    }

    fn require_account_owner(account: &Account, caller: UserId) -> Result<(), LedgerError> {
        if guard::owns_account(account, caller) {
            Ok(())
        } else {
            warn!(account = %account.id, %caller, "account ownership check failed");
            Err(LedgerError::NotAccountOwner {
                account_id: account.id,
                caller,
            })
        }
    }

    fn require_payee_owner(payee: &Payee, caller: UserId) -> Result<(), LedgerError> {
        if guard::owns_payee(payee, caller) {
            Ok(())
        } else {
            warn!(payee = %payee.id, %caller, "payee ownership check failed");
            Err(LedgerError::NotPayeeOwner {
                payee_id: payee.id,
                caller,
            })
        }
    }

    /// Debits `amount` through the store's conditional write.
    fn withdraw(&self, account: &Account, amount: Decimal) -> Result<Decimal, LedgerError> {
        self.accounts
            .apply_delta(account.id, -amount)
            .map_err(|err| match err {
                StoreError::InsufficientFunds { balance } => LedgerError::InsufficientFunds {
                    account_id: account.id,
                    balance,
                    requested: amount,
                },
                StoreError::NotFound => LedgerError::AccountNotFound(account.id),
                StoreError::Backend(msg) => LedgerError::Storage(msg),
            })
    }

    /// Applies `delta` back to restore an already-committed leg.
    ///
    /// Returns `cause` when the reversal commits; upgrades to
    /// `ReconciliationRequired` when the ledger cannot be restored.
    fn reverse_or_reconcile(
        &self,
        account_id: AccountId,
        delta: Decimal,
        cause: LedgerError,
    ) -> LedgerError {
        match self.accounts.apply_delta(account_id, delta) {
            Ok(_) => cause,
            Err(err) => {
                error!(
                    account = %account_id,
                    amount = %delta,
                    error = %err,
                    "compensation failed, account requires reconciliation"
                );
                LedgerError::ReconciliationRequired { account_id, amount: delta }
            }
        }
    }

    /// Reverses both committed balance legs of a transfer after a journal
    /// fault. The credited amount is pulled back first so the source
    /// reversal cannot be affected by the destination draining meanwhile.
    fn unwind_transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        fault: &StoreError,
    ) -> LedgerError {
        error!(
            %from,
            %to,
            %amount,
            error = %fault,
            "journal append failed after committed balance legs, unwinding"
        );
        if let Err(err) = self.accounts.apply_delta(to, -amount) {
            error!(
                account = %to,
                error = %err,
                "credit reversal failed, account requires reconciliation"
            );
            return LedgerError::ReconciliationRequired {
                account_id: to,
                amount: -amount,
            };
        }
        self.reverse_or_reconcile(from, amount, LedgerError::Storage(fault.to_string()))
    }
}
