//! Ledger core for Maplebank.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, the money-movement engine, and the
//! storage contracts it orchestrates live here.
//!
//! # Modules
//!
//! - `ledger` - Accounts, payees, the journal, and the money-movement engine

pub mod ledger;
