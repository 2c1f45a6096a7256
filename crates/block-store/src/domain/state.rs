//! # State Record
//!
//! The persisted `(base, height)` envelope. It is the durability
//! boundary of the store: a height is visible to readers only once the
//! state record advertising it has been written. Saved through the
//! engine's synchronous put.

use serde::{Deserialize, Serialize};

use super::codec;
use super::keys::BLOCK_STORE_STATE_KEY;
use crate::ports::outbound::KvEngine;

/// The retained window of the block store.
///
/// `base` is the smallest height still present, `height` the greatest;
/// both zero means the store is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BlockStoreState {
    /// Smallest retained height; 0 when empty.
    pub base: u64,
    /// Greatest stored height; 0 when empty.
    pub height: u64,
}

/// Load the state record from the engine.
///
/// An absent or empty record is an empty store. Stores written before
/// `base` existed persisted `base == 0` with a non-zero height; those
/// are normalized to `base = 1`.
///
/// # Panics
///
/// When the record is present but fails to decode, or the engine read
/// fails.
pub fn load_block_store_state<E: KvEngine>(engine: &E) -> BlockStoreState {
    let bytes = engine
        .get(BLOCK_STORE_STATE_KEY)
        .unwrap_or_else(|e| panic!("failed to read block store state: {e}"));

    let mut state = match bytes {
        None => return BlockStoreState::default(),
        Some(bytes) if bytes.is_empty() => return BlockStoreState::default(),
        Some(bytes) => codec::decode::<BlockStoreState>(&bytes)
            .unwrap_or_else(|e| panic!("could not unmarshal bytes: {e}")),
    };

    if state.base == 0 && state.height > 0 {
        state.base = 1;
    }
    state
}

/// Persist the state record through the engine's synchronous put.
///
/// # Panics
///
/// When the engine write fails.
pub fn save_block_store_state<E: KvEngine>(state: &BlockStoreState, engine: &E) {
    let bytes = codec::encode(state);
    engine
        .set_sync(BLOCK_STORE_STATE_KEY, &bytes)
        .unwrap_or_else(|e| panic!("failed to save block store state: {e}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemDb;

    #[test]
    fn state_round_trips() {
        let cases = [
            BlockStoreState {
                base: 100,
                height: 1000,
            },
            BlockStoreState::default(),
        ];
        for state in cases {
            let db = MemDb::new();
            save_block_store_state(&state, &db);
            assert_eq!(load_block_store_state(&db), state);
        }
    }

    #[test]
    fn missing_base_is_normalized_to_one() {
        let db = MemDb::new();
        save_block_store_state(
            &BlockStoreState {
                base: 0,
                height: 1000,
            },
            &db,
        );
        assert_eq!(
            load_block_store_state(&db),
            BlockStoreState {
                base: 1,
                height: 1000,
            }
        );
    }

    #[test]
    fn absent_and_empty_records_mean_empty_store() {
        let db = MemDb::new();
        assert_eq!(load_block_store_state(&db), BlockStoreState::default());

        db.set_sync(BLOCK_STORE_STATE_KEY, b"").unwrap();
        assert_eq!(load_block_store_state(&db), BlockStoreState::default());
    }

    #[test]
    #[should_panic(expected = "unmarshal bytes")]
    fn corrupt_state_record_is_fatal() {
        let db = MemDb::new();
        db.set_sync(BLOCK_STORE_STATE_KEY, b"artful-doger").unwrap();
        load_block_store_state(&db);
    }
}
