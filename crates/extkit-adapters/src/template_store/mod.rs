//! Template store adapters.

mod memory;

pub use memory::{InMemoryStore, InMemoryStoreBuilder};
