//! # Core Chain Entities
//!
//! The block and its constituent pieces, as exchanged between consensus,
//! gossip, and storage.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::commit::Commit;
use crate::parts::{PartSet, PartSetHeader};

// =============================================================================
// PRIMITIVE ALIASES
// =============================================================================

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 20-byte validator address.
pub type Address = [u8; 20];

// =============================================================================
// THE CHAIN
// =============================================================================

/// A reference to a block: its hash plus the header of the part set it
/// was split into. Two nodes agree on a block exactly when they agree on
/// both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockId {
    /// Hash of the block header.
    pub hash: Hash,
    /// Header of the part set carrying the serialized block.
    pub part_set_header: PartSetHeader,
}

impl BlockId {
    /// Create a block id from its components.
    pub fn new(hash: Hash, part_set_header: PartSetHeader) -> Self {
        Self {
            hash,
            part_set_header,
        }
    }

    /// True when this id references no block (all fields zero).
    pub fn is_zero(&self) -> bool {
        self.hash == [0u8; 32] && self.part_set_header.is_zero()
    }
}

/// A raw transaction payload. The store treats transactions as opaque
/// bytes; execution lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx(pub Vec<u8>);

impl Tx {
    /// Hash of the raw transaction bytes.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(&self.0);
        hasher.finalize().into()
    }
}

/// The transaction payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Data {
    /// Transactions in canonical order.
    pub txs: Vec<Tx>,
}

impl Data {
    /// Root hash over the transaction hashes.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        for tx in &self.txs {
            hasher.update(tx.hash());
        }
        hasher.finalize().into()
    }
}

/// The header of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Header {
    /// Block protocol version.
    pub version: u64,
    /// Identifier of the chain this block belongs to.
    pub chain_id: String,
    /// Block height in the chain (1 = first block).
    pub height: u64,
    /// Unix timestamp (seconds) when the block was proposed.
    pub time: u64,
    /// Id of the previous block; zero for the first block.
    pub last_block_id: BlockId,
    /// Hash of the commit that finalized the previous block.
    pub last_commit_hash: Hash,
    /// Root hash of the block's transaction data.
    pub data_hash: Hash,
    /// Address of the validator that proposed this block.
    pub proposer_address: Address,
}

impl Header {
    /// Compute the header hash, which doubles as the block hash.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.chain_id.as_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.time.to_le_bytes());
        hasher.update(self.last_block_id.hash);
        hasher.update(self.last_block_id.part_set_header.total.to_le_bytes());
        hasher.update(self.last_block_id.part_set_header.hash);
        hasher.update(self.last_commit_hash);
        hasher.update(self.data_hash);
        hasher.update(self.proposer_address);
        hasher.finalize().into()
    }
}

/// A complete block: header, transaction data, and the commit that
/// finalized the previous height.
///
/// `last_commit` is empty for the first block but never absent, so the
/// canonical commit for height `h - 1` can always be extracted from the
/// block at height `h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    /// The block header.
    pub header: Header,
    /// The transaction payload.
    pub data: Data,
    /// Commit certifying the previous block.
    pub last_commit: Commit,
}

impl Block {
    /// The block hash (the header hash).
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Height shorthand.
    pub fn height(&self) -> u64 {
        self.header.height
    }

    /// Serialize the block and split it into `part_size`-byte parts.
    ///
    /// This is the form in which the block is gossiped to peers and the
    /// form in which it is persisted; reassembling the parts by
    /// concatenation reproduces the serialized block byte-for-byte.
    ///
    /// CONTRACT: `part_size` is greater than zero.
    pub fn make_part_set(&self, part_size: u32) -> PartSet {
        let bytes =
            bincode::serialize(self).expect("in-memory block serialization cannot fail");
        PartSet::from_data(&bytes, part_size)
    }

    /// Basic internal-consistency validation that needs no chain state:
    /// the last commit must be well formed and the header's root hashes
    /// must match the block contents.
    pub fn validate_basic(&self) -> Result<(), String> {
        self.last_commit
            .validate_basic()
            .map_err(|e| format!("wrong last commit: {e}"))?;

        let want = self.last_commit.hash();
        if want != self.header.last_commit_hash {
            return Err(format!(
                "wrong last_commit_hash: expected {}, got {}",
                fmt_hash(&want),
                fmt_hash(&self.header.last_commit_hash),
            ));
        }

        let want = self.data.hash();
        if want != self.header.data_hash {
            return Err(format!(
                "wrong data_hash: expected {}, got {}",
                fmt_hash(&want),
                fmt_hash(&self.header.data_hash),
            ));
        }

        Ok(())
    }
}

fn fmt_hash(hash: &Hash) -> String {
    hash.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
