//! Storage implementations for instance histories.

mod in_memory_repo;

pub use in_memory_repo::{DEFAULT_MAX_INSTANCE_ID, InMemoryInstanceStore};
