//! # Shared Types Crate
//!
//! Core chain entities shared by every subsystem that touches blocks:
//! the block itself, its header, the commits that finalize it, the
//! part-set form in which it is gossiped and persisted, and the summary
//! metadata kept per height.
//!
//! ## Clusters
//!
//! - **Chain**: [`Block`], [`Header`], [`Data`], [`Tx`], [`BlockId`]
//! - **Consensus**: [`Commit`], [`CommitSig`], [`BlockIdFlag`]
//! - **Gossip / Storage**: [`Part`], [`PartSet`], [`PartSetHeader`],
//!   [`BlockMeta`]

pub mod commit;
pub mod entities;
pub mod meta;
pub mod parts;

pub use commit::{BlockIdFlag, Commit, CommitSig};
pub use entities::{Address, Block, BlockId, Data, Hash, Header, Signature, Tx};
pub use meta::BlockMeta;
pub use parts::{Part, PartSet, PartSetError, PartSetHeader, BLOCK_PART_SIZE_BYTES};
