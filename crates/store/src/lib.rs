//! In-memory reference storage backend for Maplebank.
//!
//! Implements the ledger core's storage contracts (`AccountStore`,
//! `PayeeStore`, `TransactionJournal`) on concurrent maps. The account
//! store performs its conditional balance write as a single critical
//! section per account, which is the property the engine's concurrency
//! model depends on.

pub mod repositories;

pub use repositories::{MemoryAccountStore, MemoryJournal, MemoryPayeeStore};
