//! Common type definitions shared across crates.

pub mod id;

pub use id::{AccountId, PayeeId, TransactionId, UserId};
