//! # In-Memory Engine
//!
//! Ordered in-memory key-value engine over a `BTreeMap`, used in tests
//! and as the reference implementation of the engine contract.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::errors::EngineError;
use crate::ports::outbound::{BatchOperation, KvEngine, WriteBatch};

/// In-memory ordered key-value engine.
///
/// Batches are applied under a single write lock, so they are atomic
/// with respect to concurrent readers.
#[derive(Default)]
pub struct MemDb {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemDb {
    /// An empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl KvEngine for MemDb {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set_sync(&self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete_sync(&self, key: &[u8]) -> Result<(), EngineError> {
        self.data.write().remove(key);
        Ok(())
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<(), EngineError> {
        let mut data = self.data.write();
        for op in batch.into_ops() {
            match op {
                BatchOperation::Set { key, value } => {
                    data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, EngineError> {
        let data = self.data.read();
        Ok(data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_delete() {
        let db = MemDb::new();
        assert!(db.is_empty());

        db.set_sync(b"key1", b"value1").unwrap();
        db.set_sync(b"key2", b"value2").unwrap();
        assert_eq!(db.len(), 2);

        assert_eq!(db.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(db.get(b"key3").unwrap(), None);

        db.delete_sync(b"key1").unwrap();
        assert_eq!(db.get(b"key1").unwrap(), None);
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn batch_applies_all_operations() {
        let db = MemDb::new();
        db.set_sync(b"stale", b"x").unwrap();

        let mut batch = WriteBatch::new();
        batch.set(b"a".to_vec(), b"1".to_vec());
        batch.set(b"b".to_vec(), b"2".to_vec());
        batch.delete(b"stale".to_vec());
        db.write_batch(batch).unwrap();

        assert_eq!(db.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(db.get(b"b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(db.get(b"stale").unwrap(), None);
    }

    #[test]
    fn prefix_scan_is_ordered() {
        let db = MemDb::new();
        db.set_sync(b"p:2", b"two").unwrap();
        db.set_sync(b"p:1", b"one").unwrap();
        db.set_sync(b"q:1", b"other").unwrap();

        let hits = db.prefix_scan(b"p:").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, b"p:1".to_vec());
        assert_eq!(hits[1].0, b"p:2".to_vec());
    }
}
