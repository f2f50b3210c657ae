//! Sled-based persistence for treasury state
use std::path::Path;

use crate::{KvStore, Result, StorageError, WriteBatch};

#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open or create the database
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(&path)
            .map_err(|e| StorageError::Backend(format!("Failed to open database: {}", e)))?;

        log::debug!("opened treasury store at {}", path.as_ref().display());
        Ok(SledStore { db })
    }

    pub fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| StorageError::Backend(format!("Failed to flush to disk: {}", e)))?;
        Ok(())
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match self.db.get(key) {
            Ok(Some(data)) => Ok(Some(data.to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Backend(format!("Failed to load key: {}", e))),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db
            .insert(key, value)
            .map_err(|e| StorageError::Backend(format!("Failed to save key: {}", e)))?;

        // Every committed indicator must survive a restart
        self.flush()
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.db
            .remove(key)
            .map_err(|e| StorageError::Backend(format!("Failed to remove key: {}", e)))?;
        self.flush()
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut entries = Vec::new();
        for item in self.db.scan_prefix(prefix) {
            let (key, value) = item
                .map_err(|e| StorageError::Backend(format!("Failed to scan keys: {}", e)))?;
            entries.push((key.to_vec(), value.to_vec()));
        }
        Ok(entries)
    }

    fn apply_batch(&mut self, batch: WriteBatch) -> Result<()> {
        let mut staged = sled::Batch::default();
        for (key, value) in batch.into_ops() {
            match value {
                Some(value) => staged.insert(key, value),
                None => staged.remove(key),
            }
        }

        self.db
            .apply_batch(staged)
            .map_err(|e| StorageError::Backend(format!("Failed to apply batch: {}", e)))?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut store = SledStore::open(dir.path()).unwrap();

        store.set(b"tr:1", b"100").unwrap();
        assert_eq!(store.get(b"tr:1").unwrap(), Some(b"100".to_vec()));
        assert_eq!(store.get(b"tr:2").unwrap(), None);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = SledStore::open(dir.path()).unwrap();
            store.set(&[3, 0, 7], b"v").unwrap();
        }

        let store = SledStore::open(dir.path()).unwrap();
        assert_eq!(store.get(&[3, 0, 7]).unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.scan_prefix(&[3]).unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let mut store = SledStore::open(dir.path()).unwrap();

        store.set(b"k", b"v").unwrap();
        store.delete(b"k").unwrap();
        assert!(!store.contains(b"k").unwrap());
    }

    #[test]
    fn test_batch_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let mut store = SledStore::open(dir.path()).unwrap();
            store.set(b"old", b"x").unwrap();

            let mut batch = WriteBatch::new();
            batch.set(b"a", b"1");
            batch.set(b"b", b"2");
            batch.delete(b"old");
            store.apply_batch(batch).unwrap();
        }

        let store = SledStore::open(dir.path()).unwrap();
        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(store.get(b"b").unwrap(), Some(b"2".to_vec()));
        assert!(!store.contains(b"old").unwrap());
    }
}
