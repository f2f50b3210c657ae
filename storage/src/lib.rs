//! Treasury Storage Layer - Ordered Key-Value Backends
//!
//! The treasury keeps all of its state behind a small byte-oriented
//! key-value contract:
//! - `MemoryStore` for tests and replay
//! - `SledStore` for durable on-disk state
//!
//! Both backends iterate keys in ascending byte order and apply a
//! `WriteBatch` atomically.

use thiserror::Error;

pub mod memory;
pub mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Staged writes, applied all together or not at all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<(Vec<u8>, Option<Vec<u8>>)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push((key.to_vec(), Some(value.to_vec())));
    }

    pub fn delete(&mut self, key: &[u8]) {
        self.ops.push((key.to_vec(), None));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations in staging order; `None` marks a delete.
    pub fn into_ops(self) -> impl Iterator<Item = (Vec<u8>, Option<Vec<u8>>)> {
        self.ops.into_iter()
    }
}

/// Ordered key-value contract used by the treasury state
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Apply every staged write, later writes to a key winning. On error
    /// none of them is visible.
    fn apply_batch(&mut self, batch: WriteBatch) -> Result<()>;

    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        (**self).scan_prefix(prefix)
    }

    fn apply_batch(&mut self, batch: WriteBatch) -> Result<()> {
        (**self).apply_batch(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn KvStore> = Box::new(MemoryStore::new());

        assert!(!store.contains(b"k").unwrap());
        store.set(b"k", b"v").unwrap();
        assert!(store.contains(b"k").unwrap());
        assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_batch_applies_in_order() {
        let mut store: Box<dyn KvStore> = Box::new(MemoryStore::new());
        store.set(b"gone", b"x").unwrap();

        let mut batch = WriteBatch::new();
        batch.set(b"k", b"1");
        batch.set(b"k", b"2");
        batch.delete(b"gone");
        assert_eq!(batch.len(), 3);

        store.apply_batch(batch).unwrap();
        assert_eq!(store.get(b"k").unwrap(), Some(b"2".to_vec()));
        assert!(!store.contains(b"gone").unwrap());
    }
}
