//! Repository implementations of the core storage contracts.

pub mod account;
pub mod journal;
pub mod payee;


pub use account::MemoryAccountStore;
pub use journal::MemoryJournal;
pub use payee::MemoryPayeeStore;
