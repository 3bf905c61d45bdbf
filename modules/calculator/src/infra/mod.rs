//! Infrastructure layer for the calculator module.

pub mod storage;

pub use storage::InMemoryInstanceStore;
