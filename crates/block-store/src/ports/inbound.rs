//! # Inbound Ports (Driving Ports)
//!
//! The public API of the block store, as consumed by consensus, gossip,
//! and sync. Absence is `None` from every load; malformed persisted
//! bytes panic rather than masquerading as absence.

use tokio_util::sync::CancellationToken;

use shared_types::{Block, BlockMeta, Commit, Hash, Part, PartSet};

use crate::domain::errors::StoreError;

/// Height-indexed persistence for full blocks, their parts, their
/// metadata, and their commits.
///
/// Implementations maintain a monotonic `[base(), height()]` window:
/// every height inside it has a complete record set, and no record
/// exists below `base()`.
pub trait BlockStoreApi {
    /// Greatest stored height; 0 when empty.
    fn height(&self) -> u64;

    /// Smallest retained height; 0 when empty.
    fn base(&self) -> u64;

    /// Number of retained heights.
    fn size(&self) -> u64;

    /// Persist a block with its complete part set and the commit this
    /// node observed for it. The write is atomic: a crash leaves the
    /// block either fully stored or entirely absent.
    ///
    /// # Panics
    ///
    /// When the part set is incomplete or empty, or the height does not
    /// extend the window by exactly one (unless the store is empty).
    fn save_block(&self, block: &Block, parts: &PartSet, seen_commit: &Commit);

    /// The metadata for `height`, if stored.
    fn load_block_meta(&self, height: u64) -> Option<BlockMeta>;

    /// The metadata of the base block, if the store is non-empty.
    fn load_base_meta(&self) -> Option<BlockMeta>;

    /// Part `index` of the block at `height`, if stored.
    fn load_block_part(&self, height: u64, index: u32) -> Option<Part>;

    /// Reassemble and decode the block at `height`.
    ///
    /// The token is polled between engine reads; cancellation yields
    /// `Err(StoreError::Canceled)` without partial results.
    fn load_block(
        &self,
        height: u64,
        token: &CancellationToken,
    ) -> Result<Option<Block>, StoreError>;

    /// Look up a block by its hash and delegate to [`Self::load_block`].
    fn load_block_by_hash(
        &self,
        hash: &Hash,
        token: &CancellationToken,
    ) -> Result<Option<Block>, StoreError>;

    /// The canonical commit for `height`, extracted from the block at
    /// `height + 1` when that block was saved.
    fn load_block_commit(&self, height: u64) -> Option<Commit>;

    /// The commit this node itself observed when finalizing `height`.
    fn load_seen_commit(&self, height: u64) -> Option<Commit>;

    /// Delete every height in `[base(), target)` and advance the base
    /// to `target`. Returns the number of heights pruned.
    fn prune_blocks(&self, target: u64) -> Result<u64, StoreError>;
}
