//! # Block Store Service
//!
//! [`BlockStore`] keeps every persisted record derived from a block
//! (parts, meta, commits, the hash index) under height-ordered keys in a
//! pluggable engine, and maintains the `[base, height]` window that
//! tells readers which heights are fully present.
//!
//! Writes and prunes are expected to be serialized by the caller (one
//! consensus thread, one pruning task); reads are safe against both at
//! any time. The window lock is never held across an engine call.

mod load;
mod prune;
mod save;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use shared_types::{Block, BlockMeta, Commit, Hash, Part, PartSet};

use crate::domain::errors::StoreError;
use crate::domain::state::{load_block_store_state, save_block_store_state, BlockStoreState};
use crate::domain::StoreConfig;
use crate::ports::inbound::BlockStoreApi;
use crate::ports::outbound::KvEngine;

/// The in-memory projection of the persisted state record.
///
/// This is the authoritative visibility window; readers never compute
/// it from the engine.
pub(crate) struct WindowState {
    pub(crate) base: u64,
    pub(crate) height: u64,
}

/// Height-indexed block persistence over a key-value engine.
///
/// One instance per engine handle; no process-global state.
pub struct BlockStore<E: KvEngine> {
    pub(crate) engine: E,
    pub(crate) config: StoreConfig,
    pub(crate) window: RwLock<WindowState>,
}

impl<E: KvEngine> BlockStore<E> {
    /// Open a store over `engine` with the default configuration,
    /// loading the persisted window.
    ///
    /// # Panics
    ///
    /// When the persisted state record is present but malformed.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, StoreConfig::default())
    }

    /// Open a store with an explicit configuration.
    pub fn with_config(engine: E, config: StoreConfig) -> Self {
        let state = load_block_store_state(&engine);
        tracing::debug!(base = state.base, height = state.height, "opened block store");
        Self {
            engine,
            config,
            window: RwLock::new(WindowState {
                base: state.base,
                height: state.height,
            }),
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Persist the current window through the engine's synchronous put.
    pub(crate) fn save_state(&self) {
        let state = {
            let window = self.window.read();
            BlockStoreState {
                base: window.base,
                height: window.height,
            }
        };
        save_block_store_state(&state, &self.engine);
    }

    /// Point read with engine failures escalated; the store sits below
    /// consensus and must not convert I/O failure into absence.
    pub(crate) fn engine_get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.engine
            .get(key)
            .unwrap_or_else(|e| panic!("block store read failed: {e}"))
    }
}

impl<E: KvEngine> BlockStoreApi for BlockStore<E> {
    fn height(&self) -> u64 {
        BlockStore::height(self)
    }

    fn base(&self) -> u64 {
        BlockStore::base(self)
    }

    fn size(&self) -> u64 {
        BlockStore::size(self)
    }

    fn save_block(&self, block: &Block, parts: &PartSet, seen_commit: &Commit) {
        BlockStore::save_block(self, block, parts, seen_commit)
    }

    fn load_block_meta(&self, height: u64) -> Option<BlockMeta> {
        BlockStore::load_block_meta(self, height)
    }

    fn load_base_meta(&self) -> Option<BlockMeta> {
        BlockStore::load_base_meta(self)
    }

    fn load_block_part(&self, height: u64, index: u32) -> Option<Part> {
        BlockStore::load_block_part(self, height, index)
    }

    fn load_block(
        &self,
        height: u64,
        token: &CancellationToken,
    ) -> Result<Option<Block>, StoreError> {
        BlockStore::load_block(self, height, token)
    }

    fn load_block_by_hash(
        &self,
        hash: &Hash,
        token: &CancellationToken,
    ) -> Result<Option<Block>, StoreError> {
        BlockStore::load_block_by_hash(self, hash, token)
    }

    fn load_block_commit(&self, height: u64) -> Option<Commit> {
        BlockStore::load_block_commit(self, height)
    }

    fn load_seen_commit(&self, height: u64) -> Option<Commit> {
        BlockStore::load_seen_commit(self, height)
    }

    fn prune_blocks(&self, target: u64) -> Result<u64, StoreError> {
        BlockStore::prune_blocks(self, target)
    }
}
