//! # Outbound Ports (Driven Ports)
//!
//! The ordered key-value engine the store persists through. The store
//! never looks inside values and never relies on engine behavior beyond
//! this contract: point reads, durable point writes, and atomic durable
//! batches. Engines provide their own internal concurrency; every
//! method takes `&self`.

use crate::domain::errors::EngineError;

/// Abstract interface over an ordered key-value engine.
///
/// Ordering contract: `prefix_scan` yields entries in ascending
/// lexicographic key order. The store's key codec renders integers so
/// that lexicographic order equals numeric order.
pub trait KvEngine: Send + Sync {
    /// Point read. Absent keys are `Ok(None)`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError>;

    /// Durable point write; the value is on stable storage on return.
    fn set_sync(&self, key: &[u8], value: &[u8]) -> Result<(), EngineError>;

    /// Durable point delete.
    fn delete_sync(&self, key: &[u8]) -> Result<(), EngineError>;

    /// Apply a batch atomically and durably: either every operation in
    /// the batch is applied, or none is.
    fn write_batch(&self, batch: WriteBatch) -> Result<(), EngineError>;

    /// All entries whose key starts with `prefix`, in ascending key
    /// order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, EngineError>;
}

/// A single operation inside a [`WriteBatch`].
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Write a key-value pair.
    Set {
        /// Key to write.
        key: Vec<u8>,
        /// Value to write.
        value: Vec<u8>,
    },
    /// Remove a key.
    Delete {
        /// Key to remove.
        key: Vec<u8>,
    },
}

/// An ordered group of writes and deletes committed atomically via
/// [`KvEngine::write_batch`].
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOperation>,
}

impl WriteBatch {
    /// An empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a write.
    pub fn set(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.ops.push(BatchOperation::Set {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Queue a delete.
    pub fn delete(&mut self, key: impl Into<Vec<u8>>) {
        self.ops.push(BatchOperation::Delete { key: key.into() });
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consume the batch, yielding its operations in queue order.
    pub fn into_ops(self) -> Vec<BatchOperation> {
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_preserves_operation_order() {
        let mut batch = WriteBatch::new();
        batch.set(b"a".to_vec(), b"1".to_vec());
        batch.delete(b"b".to_vec());
        batch.set(b"c".to_vec(), b"3".to_vec());

        assert_eq!(batch.len(), 3);
        let ops = batch.into_ops();
        assert!(matches!(&ops[0], BatchOperation::Set { key, .. } if key == b"a"));
        assert!(matches!(&ops[1], BatchOperation::Delete { key } if key == b"b"));
        assert!(matches!(&ops[2], BatchOperation::Set { key, .. } if key == b"c"));
    }
}
