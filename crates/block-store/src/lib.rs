//! # Block Store
//!
//! Persistent, height-indexed storage for the chain's blocks: the parts
//! they are gossiped in, their summary metadata, and the commits that
//! finalize them, all kept in a pluggable ordered key-value engine.
//!
//! ## Architecture
//!
//! - `ports/`: the boundary. [`BlockStoreApi`] exposed inbound, the
//!   [`KvEngine`] contract required outbound.
//! - `adapters/`: engine implementations ([`MemDb`], [`FileDb`]).
//! - `domain/`: key codec, record codec, the persisted state record,
//!   configuration, and errors.
//! - `store/`: the [`BlockStore`] service (writer, reader, pruner).
//!
//! ## Semantics
//!
//! The store maintains a monotonic window `[base, height]`: every height
//! inside it carries a complete record set, nothing exists below `base`,
//! and the window only moves forward. Saving a block is one atomic
//! engine batch; pruning deletes in bounded batches and advances the
//! base only once all of them are flushed. Absent records load as
//! `None`; bytes that fail to decode panic, since corruption below
//! consensus must be loud, never mistaken for absence.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::{FileDb, MemDb};
pub use domain::{
    load_block_store_state, save_block_store_state, BlockStoreState, CodecError, EngineError,
    StoreConfig, StoreError,
};
pub use ports::{BatchOperation, BlockStoreApi, KvEngine, WriteBatch};
pub use store::BlockStore;
