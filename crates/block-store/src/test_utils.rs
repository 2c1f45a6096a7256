//! Test fixtures shared by the store tests.

use shared_types::{
    Address, Block, BlockId, Commit, CommitSig, Data, Header, PartSetHeader, Tx,
};

/// Chain id used by all test fixtures.
pub const TEST_CHAIN_ID: &str = "block-store-test";

pub fn rand_address() -> Address {
    rand::random()
}

/// A commit with a single vote carrying just the height and timestamp.
pub fn make_test_commit(height: u64, timestamp: u64) -> Commit {
    let sig = CommitSig::for_block(rand_address(), timestamp, [0x5A; 64]);
    Commit::new(
        height,
        0,
        BlockId::new([0xC0; 32], PartSetHeader::new(2, [0u8; 32])),
        vec![sig],
    )
}

pub fn make_test_txs(height: u64) -> Vec<Tx> {
    (0..10).map(|i| Tx(vec![height as u8, i as u8])).collect()
}

/// A block at `height` whose header hashes are consistent with its
/// contents, carrying `last_commit` for the previous height.
pub fn make_test_block(height: u64, last_commit: Commit) -> Block {
    let data = Data {
        txs: make_test_txs(height),
    };
    let header = Header {
        version: 1,
        chain_id: TEST_CHAIN_ID.into(),
        height,
        time: 1_700_000_000 + height,
        last_block_id: BlockId::default(),
        last_commit_hash: last_commit.hash(),
        data_hash: data.hash(),
        proposer_address: rand_address(),
    };
    Block {
        header,
        data,
        last_commit,
    }
}
