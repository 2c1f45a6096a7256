//! # Pruner
//!
//! Bounded-batch deletion of a contiguous height prefix. Deletions are
//! flushed in capped batches so memory and engine commit latency stay
//! flat no matter how many heights are pruned; the window's base (and
//! so reader visibility) advances only once all batches are down.

use crate::domain::errors::StoreError;
use crate::domain::keys;
use crate::ports::outbound::{KvEngine, WriteBatch};

use super::BlockStore;

impl<E: KvEngine> BlockStore<E> {
    /// Delete every height in `[base, target)` and advance the base to
    /// `target`. Returns the number of heights pruned; `target == base`
    /// on a non-empty store is a no-op returning 0.
    ///
    /// Readers that bound their queries by [`BlockStore::base`] never
    /// observe a partially deleted height: the state record keeps
    /// advertising the old base until every batch has been flushed.
    ///
    /// # Panics
    ///
    /// When a height inside the window has no meta record (corruption),
    /// or an engine write fails.
    pub fn prune_blocks(&self, target: u64) -> Result<u64, StoreError> {
        if target == 0 {
            return Err(StoreError::PruneHeightZero);
        }
        let (base, height) = {
            let window = self.window.read();
            (window.base, window.height)
        };
        if height == 0 {
            return Err(StoreError::EmptyStore);
        }
        if target < base {
            return Err(StoreError::PruneBelowBase { target, base });
        }
        if target > height {
            return Err(StoreError::PruneBeyondHeight { height });
        }

        let mut batch = WriteBatch::new();
        for h in base..target {
            let meta = self.load_block_meta(h).unwrap_or_else(|| {
                panic!("missing block meta at height {h} inside the stored window")
            });
            batch.delete(keys::block_hash_key(&meta.block_id.hash));
            batch.delete(keys::block_meta_key(h));
            batch.delete(keys::block_commit_key(h));
            batch.delete(keys::seen_commit_key(h));
            for index in 0..meta.block_id.part_set_header.total {
                batch.delete(keys::block_part_key(h, index));
            }

            if batch.len() >= self.config.prune_batch_size {
                self.flush_prune_batch(std::mem::take(&mut batch));
            }
        }
        if !batch.is_empty() {
            self.flush_prune_batch(batch);
        }

        {
            let mut window = self.window.write();
            window.base = target;
        }
        self.save_state();

        let pruned = target - base;
        tracing::info!(pruned, new_base = target, "pruned block store");
        Ok(pruned)
    }

    fn flush_prune_batch(&self, batch: WriteBatch) {
        self.engine
            .write_batch(batch)
            .unwrap_or_else(|e| panic!("failed to flush prune batch: {e}"));
    }
}
