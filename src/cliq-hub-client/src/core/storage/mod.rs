// src/core/storage/mod.rs
//! Persistent key-value adapters.
//!
//! The session layer only needs synchronous string get/set/remove. Every
//! call may fail (disabled storage, full disk, a file someone hand-edited);
//! callers decide how to degrade.

use crate::error::StorageError;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
