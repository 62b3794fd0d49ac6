//! Property tests for the money-movement engine.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use maplebank_shared::types::{AccountId, UserId};

use super::engine::{BillPaymentInput, MoneyMovementEngine, TransferInput};
use super::entry::EntryType;
use super::fixtures::{account_with_balance, payee_for, MemAccounts, MemJournal, MemPayees};
use super::store::{AccountStore, PayeeStore};

type Engine = MoneyMovementEngine<MemAccounts, MemPayees, MemJournal>;

struct Pair {
    engine: Engine,
    accounts: Arc<MemAccounts>,
    user: UserId,
    a: AccountId,
    b: AccountId,
}

fn cents(n: i64) -> Decimal {
    Decimal::new(n, 2)
}

/// Two accounts for one user with the given balances (in cents).
fn pair(a_cents: i64, b_cents: i64) -> Pair {
    let user = UserId::new();
    let a = account_with_balance(user, "BCA001234567", cents(a_cents));
    let b = account_with_balance(user, "BCA007654321", cents(b_cents));
    let accounts = Arc::new(MemAccounts::default());
    accounts.insert(a.clone()).unwrap();
    accounts.insert(b.clone()).unwrap();
    let engine = MoneyMovementEngine::new(
        Arc::clone(&accounts),
        Arc::new(MemPayees::default()),
        Arc::new(MemJournal::default()),
    );
    Pair {
        engine,
        accounts,
        user,
        a: a.id,
        b: b.id,
    }
}

fn balance(accounts: &MemAccounts, id: AccountId) -> Decimal {
    accounts.get(id).unwrap().unwrap().balance
}

/// Source balance, destination balance, and an affordable amount.
fn funded_transfer() -> impl Strategy<Value = (i64, i64, i64)> {
    (1i64..1_000_000, 0i64..1_000_000)
        .prop_flat_map(|(a, b)| (Just(a), Just(b), 1i64..=a))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// **Conservation**: a funded transfer moves exactly `amount` from
    /// source to destination and the pair sum is unchanged.
    #[test]
    fn prop_transfer_conserves_pair_sum((a_bal, b_bal, amount) in funded_transfer()) {
        let fx = pair(a_bal, b_bal);
        fx.engine.transfer(&TransferInput {
            from_account_id: fx.a,
            to_account_id: fx.b,
            amount: cents(amount),
            description: None,
            caller: fx.user,
        }).unwrap();

        prop_assert_eq!(balance(&fx.accounts, fx.a), cents(a_bal - amount));
        prop_assert_eq!(balance(&fx.accounts, fx.b), cents(b_bal + amount));
        prop_assert_eq!(
            balance(&fx.accounts, fx.a) + balance(&fx.accounts, fx.b),
            cents(a_bal + b_bal)
        );
    }

    /// **No negative balance**: under any sequence of transfers in both
    /// directions, neither persisted balance ever ends below zero and the
    /// pair sum is conserved.
    #[test]
    fn prop_no_negative_balance_under_any_sequence(
        ops in prop::collection::vec((any::<bool>(), 1i64..300_000), 1..40)
    ) {
        let fx = pair(100_000, 50_000);
        for (a_to_b, amount) in ops {
            let (from, to) = if a_to_b { (fx.a, fx.b) } else { (fx.b, fx.a) };
            // Overdrawing attempts are expected to fail; that is the point.
            let _ = fx.engine.transfer(&TransferInput {
                from_account_id: from,
                to_account_id: to,
                amount: cents(amount),
                description: None,
                caller: fx.user,
            });
        }

        let a = balance(&fx.accounts, fx.a);
        let b = balance(&fx.accounts, fx.b);
        prop_assert!(a >= Decimal::ZERO);
        prop_assert!(b >= Decimal::ZERO);
        prop_assert_eq!(a + b, cents(150_000));
    }

    /// **Journal pairing**: every successful transfer appends exactly one
    /// debit on the source and one credit on the destination with equal
    /// amounts; failed attempts append nothing.
    #[test]
    fn prop_journal_pairing(amounts in prop::collection::vec(1i64..250_000, 1..30)) {
        let fx = pair(100_000, 0);
        let mut committed = Vec::new();
        for amount in amounts {
            let result = fx.engine.transfer(&TransferInput {
                from_account_id: fx.a,
                to_account_id: fx.b,
                amount: cents(amount),
                description: None,
                caller: fx.user,
            });
            if result.is_ok() {
                committed.push(cents(amount));
            }
        }

        let debits = fx.engine.transactions_for(fx.a).unwrap();
        let credits = fx.engine.transactions_for(fx.b).unwrap();
        prop_assert_eq!(debits.len(), committed.len());
        prop_assert_eq!(credits.len(), committed.len());
        prop_assert!(debits.iter().all(|t| t.entry_type == EntryType::Debit));
        prop_assert!(credits.iter().all(|t| t.entry_type == EntryType::Credit));

        // Newest-first listing mirrors the commit order reversed.
        let debit_amounts: Vec<_> = debits.iter().rev().map(|t| t.amount).collect();
        let credit_amounts: Vec<_> = credits.iter().rev().map(|t| t.amount).collect();
        prop_assert_eq!(&debit_amounts, &committed);
        prop_assert_eq!(&credit_amounts, &committed);
    }

    /// **Single-debit removal**: each successful bill payment appends
    /// exactly one debit entry and the final balance reflects only the
    /// committed payments.
    #[test]
    fn prop_bill_payments_append_one_debit_each(
        amounts in prop::collection::vec(1i64..80_000, 1..25)
    ) {
        let fx = pair(100_000, 0);
        let payee = payee_for(fx.user, "Hydro Quebec");
        let payees = Arc::new(MemPayees::default());
        payees.insert(payee.clone()).unwrap();
        let engine = MoneyMovementEngine::new(
            Arc::clone(&fx.accounts),
            payees,
            Arc::new(MemJournal::default()),
        );

        let mut paid = Decimal::ZERO;
        let mut successes = 0usize;
        for amount in amounts {
            let result = engine.bill_payment(&BillPaymentInput {
                account_id: fx.a,
                payee_id: payee.id,
                amount: cents(amount),
                memo: None,
                caller: fx.user,
            });
            if result.is_ok() {
                paid += cents(amount);
                successes += 1;
            }
        }

        let entries = engine.transactions_for(fx.a).unwrap();
        prop_assert_eq!(entries.len(), successes);
        prop_assert!(entries.iter().all(|t| t.entry_type == EntryType::Debit));
        prop_assert_eq!(balance(&fx.accounts, fx.a), cents(100_000) - paid);
    }
}
