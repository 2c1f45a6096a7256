//! # Reader
//!
//! Point lookups, window accessors, and block reassembly. Every load
//! returns `None` for absence; bytes that fail to decode panic, since a
//! key inside the window that does not decode means the store under
//! this process is corrupt.

use tokio_util::sync::CancellationToken;

use shared_types::{Block, BlockMeta, Commit, Hash, Part};

use crate::domain::errors::StoreError;
use crate::domain::{codec, keys};
use crate::ports::outbound::KvEngine;

use super::BlockStore;

impl<E: KvEngine> BlockStore<E> {
    /// Greatest stored height; 0 when the store is empty.
    pub fn height(&self) -> u64 {
        self.window.read().height
    }

    /// Smallest retained height; 0 when the store is empty.
    pub fn base(&self) -> u64 {
        self.window.read().base
    }

    /// Number of retained heights.
    pub fn size(&self) -> u64 {
        let window = self.window.read();
        if window.height == 0 {
            0
        } else {
            window.height - window.base + 1
        }
    }

    /// The metadata for `height`, if stored.
    pub fn load_block_meta(&self, height: u64) -> Option<BlockMeta> {
        let bytes = self.engine_get(&keys::block_meta_key(height))?;
        let meta = codec::decode(&bytes)
            .unwrap_or_else(|e| panic!("unmarshal to BlockMeta failed: {e}"));
        Some(meta)
    }

    /// The metadata of the base block, if the store is non-empty.
    pub fn load_base_meta(&self) -> Option<BlockMeta> {
        let base = self.base();
        if base == 0 {
            return None;
        }
        self.load_block_meta(base)
    }

    /// Part `index` of the block at `height`, if stored.
    pub fn load_block_part(&self, height: u64, index: u32) -> Option<Part> {
        let bytes = self.engine_get(&keys::block_part_key(height, index))?;
        let part =
            codec::decode(&bytes).unwrap_or_else(|e| panic!("unmarshal to Part failed: {e}"));
        Some(part)
    }

    /// Reassemble and decode the block at `height`.
    ///
    /// The cancellation token is polled before each engine read; on
    /// cancellation the read aborts with [`StoreError::Canceled`] and no
    /// partial result.
    ///
    /// # Panics
    ///
    /// When a part inside the meta's declared range is missing, or the
    /// reassembled bytes fail to decode.
    pub fn load_block(
        &self,
        height: u64,
        token: &CancellationToken,
    ) -> Result<Option<Block>, StoreError> {
        if token.is_cancelled() {
            return Err(StoreError::Canceled);
        }
        let Some(meta) = self.load_block_meta(height) else {
            return Ok(None);
        };

        let total = meta.block_id.part_set_header.total;
        let mut bytes = Vec::with_capacity(meta.block_size as usize);
        for index in 0..total {
            if token.is_cancelled() {
                return Err(StoreError::Canceled);
            }
            let part = self.load_block_part(height, index).unwrap_or_else(|| {
                panic!("missing block part {index} of {total} at height {height}")
            });
            bytes.extend_from_slice(&part.bytes);
        }

        let block =
            codec::decode(&bytes).unwrap_or_else(|e| panic!("error reading block: {e}"));
        Ok(Some(block))
    }

    /// Look up a block by hash via the hash-to-height index.
    pub fn load_block_by_hash(
        &self,
        hash: &Hash,
        token: &CancellationToken,
    ) -> Result<Option<Block>, StoreError> {
        if token.is_cancelled() {
            return Err(StoreError::Canceled);
        }
        let Some(bytes) = self.engine_get(&keys::block_hash_key(hash)) else {
            return Ok(None);
        };
        let height = codec::decode_height(&bytes)
            .unwrap_or_else(|e| panic!("error reading block hash index: {e}"));
        self.load_block(height, token)
    }

    /// The canonical commit for `height`, if stored. For the topmost
    /// height it is not yet available; use [`Self::load_seen_commit`].
    pub fn load_block_commit(&self, height: u64) -> Option<Commit> {
        let bytes = self.engine_get(&keys::block_commit_key(height))?;
        let commit =
            codec::decode(&bytes).unwrap_or_else(|e| panic!("error reading block commit: {e}"));
        Some(commit)
    }

    /// The commit this node itself observed for `height`, if stored.
    pub fn load_seen_commit(&self, height: u64) -> Option<Commit> {
        let bytes = self.engine_get(&keys::seen_commit_key(height))?;
        let commit = codec::decode(&bytes)
            .unwrap_or_else(|e| panic!("error reading block seen commit: {e}"));
        Some(commit)
    }
}
