//! Maplebank demo binary.
//!
//! Seeds the in-memory stores with the sample ledger (one demo customer,
//! two accounts with transaction history, four registered payees) and runs
//! one operation of each family through the engine, logging the outcomes.
//!
//! Usage: cargo run --bin demo

use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Utc};
use maplebank_core::ledger::{
    Account, AccountStore, AccountType, AddPayeeInput, BillPaymentInput, EntryType,
    InteracRequestInput, InteracSendInput, JournalEntryInput, MoneyMovementEngine,
    TransactionJournal, TransferInput,
};
use maplebank_shared::config::AppConfig;
use maplebank_shared::types::{AccountId, UserId};
use maplebank_store::{MemoryAccountStore, MemoryJournal, MemoryPayeeStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type DemoEngine = MoneyMovementEngine<MemoryAccountStore, MemoryPayeeStore, MemoryJournal>;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let accounts = Arc::new(MemoryAccountStore::new());
    let payees = Arc::new(MemoryPayeeStore::new());
    let journal = Arc::new(MemoryJournal::new());
    let engine = MoneyMovementEngine::new(
        Arc::clone(&accounts),
        Arc::clone(&payees),
        Arc::clone(&journal),
    );

    let demo_user = UserId::new();
    if config.demo.seed_sample_data {
        seed_sample_ledger(&accounts, &journal, &engine, demo_user)?;
    } else {
        info!("sample data seeding disabled, nothing to demonstrate");
        return Ok(());
    }

    run_demo_operations(&engine, demo_user)?;
    Ok(())
}

/// Seeds the demo customer's two accounts, their history, and four payees.
fn seed_sample_ledger(
    accounts: &MemoryAccountStore,
    journal: &MemoryJournal,
    engine: &DemoEngine,
    owner: UserId,
) -> anyhow::Result<()> {
    info!("seeding sample ledger for demo customer John Doe");

    let chequing = seed_account(
        accounts,
        owner,
        "BCA001234567",
        AccountType::Chequing,
        dec!(5000.00),
        "Main Chequing Account",
    )?;
    let savings = seed_account(
        accounts,
        owner,
        "BCA007654321",
        AccountType::Savings,
        dec!(15000.50),
        "Savings Account",
    )?;

    let now = Utc::now();
    seed_history_entry(journal, chequing, EntryType::Deposit, dec!(1000.00), "Salary Deposit", now - Duration::days(5))?;
    seed_history_entry(journal, chequing, EntryType::Debit, dec!(250.00), "Grocery Store Purchase", now - Duration::days(3))?;
    seed_history_entry(journal, chequing, EntryType::Credit, dec!(500.00), "Transfer from Savings", now - Duration::days(1))?;
    seed_history_entry(journal, savings, EntryType::Deposit, dec!(2000.00), "Initial Deposit", now - Duration::days(10))?;

    for (name, number, category) in [
        ("Hydro Quebec", "HQ123456789", "UTILITY"),
        ("Visa Credit Card", "****1234", "CREDIT_CARD"),
        ("Rogers Communications", "RG987654321", "UTILITY"),
        ("Bell Canada", "BC456789012", "UTILITY"),
    ] {
        engine.add_payee(AddPayeeInput {
            name: name.to_string(),
            account_number: Some(number.to_string()),
            category: Some(category.to_string()),
            caller: owner,
        })?;
        info!(payee = name, "registered payee");
    }

    info!("sample ledger seeded");
    Ok(())
}

fn seed_account(
    accounts: &MemoryAccountStore,
    owner: UserId,
    number: &str,
    account_type: AccountType,
    balance: Decimal,
    description: &str,
) -> anyhow::Result<AccountId> {
    let account = Account {
        id: AccountId::new(),
        account_number: number.to_string(),
        account_type,
        balance,
        description: Some(description.to_string()),
        owner_id: owner,
    };
    let id = account.id;
    accounts
        .insert(account)
        .with_context(|| format!("failed to seed account {number}"))?;
    info!(account = number, %account_type, %balance, "opened account");
    Ok(id)
}

fn seed_history_entry(
    journal: &MemoryJournal,
    account_id: AccountId,
    entry_type: EntryType,
    amount: Decimal,
    description: &str,
    timestamp: chrono::DateTime<Utc>,
) -> anyhow::Result<()> {
    journal
        .append(JournalEntryInput {
            account_id,
            entry_type,
            amount,
            description: description.to_string(),
            timestamp,
        })
        .context("failed to seed history entry")?;
    Ok(())
}

/// Runs one operation of each family and prints the resulting statements.
fn run_demo_operations(engine: &DemoEngine, customer: UserId) -> anyhow::Result<()> {
    let chequing = engine
        .account_by_number("BCA001234567")?
        .context("seeded chequing account missing")?;
    let savings = engine
        .account_by_number("BCA007654321")?
        .context("seeded savings account missing")?;
    let hydro = engine
        .payees_for(customer)?
        .into_iter()
        .find(|p| p.name == "Hydro Quebec")
        .context("seeded payee missing")?;

    let receipt = engine.transfer(&TransferInput {
        from_account_id: chequing.id,
        to_account_id: savings.id,
        amount: dec!(500.00),
        description: None,
        caller: customer,
    })?;
    info!(
        from_balance = %receipt.from_balance,
        to_balance = %receipt.to_balance,
        "moved $500.00 from chequing to savings"
    );

    let receipt = engine.bill_payment(&BillPaymentInput {
        account_id: chequing.id,
        payee_id: hydro.id,
        amount: dec!(100.00),
        memo: None,
        caller: customer,
    })?;
    info!(balance = %receipt.balance, "paid $100.00 to Hydro Quebec");

    let receipt = engine.interac_send(&InteracSendInput {
        account_id: chequing.id,
        recipient_email: "friend@example.com".to_string(),
        amount: dec!(75.00),
        message: Some("Dinner split".to_string()),
        caller: customer,
    })?;
    info!(balance = %receipt.balance, "sent $75.00 by Interac e-Transfer");

    engine.interac_request(&InteracRequestInput {
        account_id: chequing.id,
        requestor_email: "roommate@example.com".to_string(),
        amount: dec!(40.00),
        message: Some("Internet bill".to_string()),
        caller: customer,
    })?;

    for transaction in engine.transactions_for(chequing.id)? {
        info!(
            entry = %transaction.entry_type,
            amount = %transaction.amount,
            description = %transaction.description,
            "chequing statement line"
        );
    }
    Ok(())
}
