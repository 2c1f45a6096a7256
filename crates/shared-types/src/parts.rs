//! # Block Parts
//!
//! A serialized block is split into fixed-size parts for gossip; the
//! same parts are persisted verbatim, so the bytes a node serves are the
//! bytes it stores. A [`PartSet`] is either built complete from data
//! (the proposer side) or assembled part-by-part from a header (the
//! receiver side).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::entities::Hash;

/// Default size of a block part in bytes.
pub const BLOCK_PART_SIZE_BYTES: u32 = 65_536;

/// Errors from incremental part-set assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartSetError {
    /// The part's index does not fit the declared total.
    #[error("part index {index} out of bounds for part set with total {total}")]
    UnexpectedIndex {
        /// Index carried by the rejected part.
        index: u32,
        /// Declared total of the part set.
        total: u32,
    },
}

/// The fixed summary of a part set: how many parts, and the hash that
/// binds them. Carried inside [`crate::BlockId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PartSetHeader {
    /// Number of parts in the set.
    pub total: u32,
    /// Hash binding the set contents.
    pub hash: Hash,
}

impl PartSetHeader {
    /// Create a part set header.
    pub fn new(total: u32, hash: Hash) -> Self {
        Self { total, hash }
    }

    /// True when the header describes no part set.
    pub fn is_zero(&self) -> bool {
        self.total == 0 && self.hash == [0u8; 32]
    }
}

/// One fragment of a serialized block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Position of this part within the set.
    pub index: u32,
    /// The raw fragment bytes.
    pub bytes: Vec<u8>,
}

/// An ordered collection of parts with a declared total.
///
/// The set is *complete* when every slot is filled; only complete sets
/// may be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSet {
    total: u32,
    hash: Hash,
    parts: Vec<Option<Part>>,
    count: u32,
}

impl PartSet {
    /// Split serialized data into a complete part set.
    ///
    /// CONTRACT: `part_size` is greater than zero.
    pub fn from_data(data: &[u8], part_size: u32) -> Self {
        assert!(part_size > 0, "part size must be greater than zero");

        let mut hasher = Sha256::new();
        hasher.update(data);
        let hash: Hash = hasher.finalize().into();

        let parts: Vec<Option<Part>> = data
            .chunks(part_size as usize)
            .enumerate()
            .map(|(i, chunk)| {
                Some(Part {
                    index: i as u32,
                    bytes: chunk.to_vec(),
                })
            })
            .collect();
        let total = parts.len() as u32;

        Self {
            total,
            hash,
            parts,
            count: total,
        }
    }

    /// Start an empty set to be filled via [`PartSet::add_part`].
    pub fn from_header(header: PartSetHeader) -> Self {
        Self {
            total: header.total,
            hash: header.hash,
            parts: vec![None; header.total as usize],
            count: 0,
        }
    }

    /// Add a part to the set.
    ///
    /// Returns `Ok(true)` if the part was added, `Ok(false)` if the slot
    /// was already filled, and an error if the index does not fit the
    /// declared total.
    pub fn add_part(&mut self, part: Part) -> Result<bool, PartSetError> {
        if part.index >= self.total {
            return Err(PartSetError::UnexpectedIndex {
                index: part.index,
                total: self.total,
            });
        }
        let slot = &mut self.parts[part.index as usize];
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(part);
        self.count += 1;
        Ok(true)
    }

    /// The part at `index`, if present.
    pub fn get_part(&self, index: u32) -> Option<&Part> {
        self.parts.get(index as usize).and_then(Option::as_ref)
    }

    /// Declared number of parts.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of parts currently present.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// True when every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.count == self.total
    }

    /// The fixed header of this set.
    pub fn header(&self) -> PartSetHeader {
        PartSetHeader::new(self.total, self.hash)
    }

    /// Total byte size of the present parts.
    pub fn byte_size(&self) -> u64 {
        self.parts
            .iter()
            .flatten()
            .map(|p| p.bytes.len() as u64)
            .sum()
    }
}
