pub mod json_backend;
pub mod memory;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the key-value store holding month records and the
/// template list. Independent single-key reads and writes; no
/// cross-key transactions.
pub trait KeyValueStore: Send + Sync {
    /// Returns the serialized value for the key, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removes the key. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
    /// Keys currently present that start with `prefix`.
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}

pub use json_backend::JsonStore;
pub use memory::MemoryStore;
