//! # Block Metadata
//!
//! The per-height summary kept by the block store: enough to identify
//! the block, reassemble it from parts, and answer header queries
//! without loading the full block.

use serde::{Deserialize, Serialize};

use crate::entities::{Block, BlockId, Header};
use crate::parts::PartSet;

/// Summary of one stored block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockMeta {
    /// Id of the block (hash + part set header).
    pub block_id: BlockId,
    /// Size of the serialized block in bytes.
    pub block_size: u64,
    /// The full block header.
    pub header: Header,
    /// Number of transactions in the block.
    pub num_txs: u64,
}

impl BlockMeta {
    /// Build the metadata for a block and the part set it was split into.
    pub fn new(block: &Block, parts: &PartSet) -> Self {
        Self {
            block_id: BlockId::new(block.hash(), parts.header()),
            block_size: parts.byte_size(),
            header: block.header.clone(),
            num_txs: block.data.txs.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Data, Tx};

    #[test]
    fn meta_reflects_block_and_parts() {
        let block = Block {
            data: Data {
                txs: vec![Tx(vec![1]), Tx(vec![2]), Tx(vec![3])],
            },
            ..Block::default()
        };
        let parts = block.make_part_set(32);
        let meta = BlockMeta::new(&block, &parts);

        assert_eq!(meta.block_id.hash, block.hash());
        assert_eq!(meta.block_id.part_set_header, parts.header());
        assert_eq!(meta.block_size, parts.byte_size());
        assert_eq!(meta.num_txs, 3);
        assert_eq!(meta.header, block.header);
    }
}
