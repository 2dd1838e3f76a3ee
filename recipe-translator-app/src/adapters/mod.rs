//! Platform-agnostic storage adapters.

mod memory;

pub use memory::InMemoryStore;

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
