//! # Commits
//!
//! The quorum certificate for a block: one [`CommitSig`] per validator
//! slot, in validator-set order. A commit is *empty* (zero height, no
//! signatures) for the first block, but never absent.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};

use crate::entities::{Address, BlockId, Hash, Signature};

/// How a validator's slot in a commit was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockIdFlag {
    /// The validator did not vote.
    Absent = 1,
    /// The validator voted for the committed block.
    Commit = 2,
    /// The validator voted for nil.
    Nil = 3,
}

impl Default for BlockIdFlag {
    fn default() -> Self {
        BlockIdFlag::Absent
    }
}

/// A single validator's contribution to a commit.
///
/// Signatures are kept in validator-set order so peers can gossip them
/// by index without recomputing the active validator set.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSig {
    /// Whether the slot holds a commit vote, a nil vote, or nothing.
    pub flag: BlockIdFlag,
    /// Address of the validator owning this slot.
    pub validator_address: Address,
    /// Unix timestamp (seconds) of the vote.
    pub timestamp: u64,
    /// The vote signature; all zeros for absent slots.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl Default for CommitSig {
    fn default() -> Self {
        Self::absent()
    }
}

impl CommitSig {
    /// A slot for a validator that did not vote.
    pub fn absent() -> Self {
        Self {
            flag: BlockIdFlag::Absent,
            validator_address: [0u8; 20],
            timestamp: 0,
            signature: [0u8; 64],
        }
    }

    /// A slot holding a vote for the committed block.
    pub fn for_block(validator_address: Address, timestamp: u64, signature: Signature) -> Self {
        Self {
            flag: BlockIdFlag::Commit,
            validator_address,
            timestamp,
            signature,
        }
    }

    /// True when the validator's vote is counted toward the commit.
    pub fn is_for_block(&self) -> bool {
        self.flag == BlockIdFlag::Commit
    }

    /// True when the slot holds no vote.
    pub fn is_absent(&self) -> bool {
        self.flag == BlockIdFlag::Absent
    }

    /// Internal consistency of a single slot.
    pub fn validate_basic(&self) -> Result<(), String> {
        if self.is_absent() {
            if self.validator_address != [0u8; 20] {
                return Err("absent commit sig has a validator address".into());
            }
            if self.signature != [0u8; 64] {
                return Err("absent commit sig has a signature".into());
            }
            return Ok(());
        }

        if self.validator_address == [0u8; 20] {
            return Err("commit sig missing validator address".into());
        }
        if self.signature == [0u8; 64] {
            return Err("commit sig missing signature".into());
        }
        Ok(())
    }
}

/// Evidence that a block was committed by a set of validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Commit {
    /// Height of the committed block; 0 for the empty commit.
    pub height: u64,
    /// Consensus round in which the block was committed.
    pub round: u32,
    /// Id of the committed block.
    pub block_id: BlockId,
    /// One entry per validator slot, in validator-set order.
    pub signatures: Vec<CommitSig>,
}

impl Commit {
    /// Create a commit from its components.
    pub fn new(height: u64, round: u32, block_id: BlockId, signatures: Vec<CommitSig>) -> Self {
        Self {
            height,
            round,
            block_id,
            signatures,
        }
    }

    /// Hash of the commit contents, bound into the next block's header.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.round.to_le_bytes());
        hasher.update(self.block_id.hash);
        hasher.update(self.block_id.part_set_header.total.to_le_bytes());
        hasher.update(self.block_id.part_set_header.hash);
        for sig in &self.signatures {
            hasher.update([sig.flag as u8]);
            hasher.update(sig.validator_address);
            hasher.update(sig.timestamp.to_le_bytes());
            hasher.update(sig.signature);
        }
        hasher.finalize().into()
    }

    /// Internal consistency; the empty commit (height 0) passes.
    pub fn validate_basic(&self) -> Result<(), String> {
        if self.height == 0 {
            return Ok(());
        }
        if self.block_id.is_zero() {
            return Err("commit cannot be for a nil block".into());
        }
        if self.signatures.is_empty() {
            return Err("no signatures in commit".into());
        }
        for (i, sig) in self.signatures.iter().enumerate() {
            sig.validate_basic()
                .map_err(|e| format!("wrong commit sig #{i}: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::PartSetHeader;

    fn test_commit(height: u64) -> Commit {
        Commit::new(
            height,
            0,
            BlockId::new([0xCC; 32], PartSetHeader::new(2, [0xDD; 32])),
            vec![CommitSig::for_block([0x01; 20], 1_700_000_000, [0x02; 64])],
        )
    }

    #[test]
    fn empty_commit_is_valid() {
        assert!(Commit::default().validate_basic().is_ok());
    }

    #[test]
    fn commit_with_vote_is_valid() {
        let commit = test_commit(5);
        assert!(commit.validate_basic().is_ok());
        assert!(commit.signatures[0].is_for_block());
        assert!(!commit.signatures[0].is_absent());
    }

    #[test]
    fn commit_for_nil_block_is_rejected() {
        let mut commit = test_commit(5);
        commit.block_id = BlockId::default();
        let err = commit.validate_basic().unwrap_err();
        assert!(err.contains("nil block"));
    }

    #[test]
    fn commit_without_signatures_is_rejected() {
        let mut commit = test_commit(5);
        commit.signatures.clear();
        let err = commit.validate_basic().unwrap_err();
        assert!(err.contains("no signatures"));
    }

    #[test]
    fn absent_sig_with_signature_is_rejected() {
        let mut commit = test_commit(5);
        commit.signatures.push(CommitSig {
            signature: [0x55; 64],
            ..CommitSig::absent()
        });
        assert!(commit.validate_basic().is_err());
    }

    #[test]
    fn commit_hash_covers_signatures() {
        let commit = test_commit(5);
        let mut other = commit.clone();
        other.signatures[0].timestamp += 1;
        assert_ne!(commit.hash(), other.hash());
    }
}
