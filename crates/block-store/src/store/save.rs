//! # Writer
//!
//! Splitting a block into its persisted records and committing them as
//! one atomic engine batch, then advancing the window.

use shared_types::{Block, BlockMeta, Commit, PartSet};

use crate::domain::{codec, keys};
use crate::ports::outbound::{KvEngine, WriteBatch};

use super::BlockStore;

impl<E: KvEngine> BlockStore<E> {
    /// Persist a block together with its complete part set and the
    /// commit this node observed for it.
    ///
    /// All records for the block (every part, the meta, the hash
    /// index, the canonical commit for the previous height, and the
    /// seen commit) land in a single engine batch, so a crash leaves
    /// the block either fully stored or entirely absent. The window
    /// (and with it reader visibility) advances only after the batch
    /// has committed, via the synchronously persisted state record.
    ///
    /// # Panics
    ///
    /// - the part set is incomplete or declares zero parts
    /// - the height does not extend the window by exactly one, unless
    ///   the store is empty, in which case any positive height starts
    ///   the window
    /// - any engine write fails
    pub fn save_block(&self, block: &Block, parts: &PartSet, seen_commit: &Commit) {
        if parts.total() == 0 || !parts.is_complete() {
            panic!(
                "block store can only save complete block part sets: have {} of {}",
                parts.count(),
                parts.total(),
            );
        }

        let height = block.header.height;
        if height == 0 {
            panic!("block store cannot save a block at height 0");
        }
        {
            let window = self.window.read();
            if window.height > 0 && height != window.height + 1 {
                panic!(
                    "block store can only save contiguous blocks: wanted {}, got {}",
                    window.height + 1,
                    height,
                );
            }
        }

        let meta = BlockMeta::new(block, parts);
        let hash = block.hash();

        let mut batch = WriteBatch::new();
        for index in 0..parts.total() {
            // Completeness was checked above; a hole here is a PartSet bug.
            let part = parts
                .get_part(index)
                .unwrap_or_else(|| panic!("complete part set is missing part {index}"));
            batch.set(keys::block_part_key(height, index), codec::encode(part));
        }
        batch.set(keys::block_meta_key(height), codec::encode(&meta));
        batch.set(keys::block_hash_key(&hash), codec::encode_height(height));
        // The canonical commit for the previous height rides in this
        // block; it is empty (never absent) for the first block.
        batch.set(
            keys::block_commit_key(height - 1),
            codec::encode(&block.last_commit),
        );
        batch.set(keys::seen_commit_key(height), codec::encode(seen_commit));

        self.engine
            .write_batch(batch)
            .unwrap_or_else(|e| panic!("failed to write block at height {height}: {e}"));

        {
            let mut window = self.window.write();
            window.height = height;
            if window.base == 0 {
                window.base = height;
            }
        }
        self.save_state();

        tracing::debug!(
            height,
            hash = %hex::encode(&hash[..8]),
            parts = parts.total(),
            "saved block"
        );
    }
}
