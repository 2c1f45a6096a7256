//! # Key Codec
//!
//! Deterministic keys for every record kind the store persists. Heights
//! and part indexes are rendered as fixed-width zero-padded decimal so
//! the engine's lexicographic order equals numeric order over the whole
//! `u64`/`u32` range. The keyspaces are disjoint by prefix; no key is
//! ever reused for another kind.

use shared_types::Hash;

/// The record kinds persisted by the store, one key prefix each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Block meta by height: `H:<height>`.
    BlockMeta,
    /// Block part by height and index: `P:<height>:<index>`.
    BlockPart,
    /// Canonical commit by height: `C:<height>`.
    BlockCommit,
    /// Locally observed commit by height: `SC:<height>`.
    SeenCommit,
    /// Height by block hash: `BH:<hash>`.
    BlockHash,
}

impl KeyPrefix {
    /// The byte prefix for this record kind.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::BlockMeta => b"H:",
            KeyPrefix::BlockPart => b"P:",
            KeyPrefix::BlockCommit => b"C:",
            KeyPrefix::SeenCommit => b"SC:",
            KeyPrefix::BlockHash => b"BH:",
        }
    }
}

/// The single key under which the `(base, height)` state record lives.
pub const BLOCK_STORE_STATE_KEY: &[u8] = b"BSS";

fn height_key(prefix: KeyPrefix, height: u64) -> Vec<u8> {
    let mut key = prefix.as_bytes().to_vec();
    key.extend_from_slice(format!("{height:020}").as_bytes());
    key
}

/// Key of the block meta record for `height`.
pub fn block_meta_key(height: u64) -> Vec<u8> {
    height_key(KeyPrefix::BlockMeta, height)
}

/// Key of part `index` of the block at `height`.
pub fn block_part_key(height: u64, index: u32) -> Vec<u8> {
    let mut key = height_key(KeyPrefix::BlockPart, height);
    key.extend_from_slice(format!(":{index:010}").as_bytes());
    key
}

/// Key of the canonical commit for `height`.
pub fn block_commit_key(height: u64) -> Vec<u8> {
    height_key(KeyPrefix::BlockCommit, height)
}

/// Key of the locally observed commit for `height`.
pub fn seen_commit_key(height: u64) -> Vec<u8> {
    height_key(KeyPrefix::SeenCommit, height)
}

/// Key of the hash-to-height index entry for `hash`.
pub fn block_hash_key(hash: &Hash) -> Vec<u8> {
    let mut key = KeyPrefix::BlockHash.as_bytes().to_vec();
    key.extend_from_slice(hex::encode(hash).as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_keys_sort_numerically() {
        let heights = [0u64, 1, 9, 10, 99, 1_000, 1_000_000, u64::MAX];
        let mut keys: Vec<Vec<u8>> = heights.iter().map(|h| block_meta_key(*h)).collect();
        let sorted = keys.clone();
        keys.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn part_keys_sort_by_height_then_index() {
        let a = block_part_key(5, 999);
        let b = block_part_key(6, 0);
        assert!(a < b);

        let c = block_part_key(5, 1);
        let d = block_part_key(5, 10);
        assert!(c < d);
    }

    #[test]
    fn keyspaces_are_disjoint() {
        let keys = [
            block_meta_key(1),
            block_part_key(1, 0),
            block_commit_key(1),
            seen_commit_key(1),
            block_hash_key(&[0u8; 32]),
            BLOCK_STORE_STATE_KEY.to_vec(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for (j, b) in keys.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn builders_carry_their_prefixes() {
        assert!(block_meta_key(7).starts_with(KeyPrefix::BlockMeta.as_bytes()));
        assert!(block_part_key(7, 0).starts_with(KeyPrefix::BlockPart.as_bytes()));
        assert!(block_commit_key(7).starts_with(KeyPrefix::BlockCommit.as_bytes()));
        assert!(seen_commit_key(7).starts_with(KeyPrefix::SeenCommit.as_bytes()));
        assert!(block_hash_key(&[0u8; 32]).starts_with(KeyPrefix::BlockHash.as_bytes()));
    }

    #[test]
    fn hash_key_is_hex_of_hash() {
        let key = block_hash_key(&[0xAB; 32]);
        let text = String::from_utf8(key).unwrap();
        assert!(text.starts_with("BH:abab"));
    }
}
