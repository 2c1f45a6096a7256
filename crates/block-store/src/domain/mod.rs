//! # Domain Module
//!
//! Pure building blocks of the store: key and record codecs, the
//! persisted state record, configuration, and error types.

pub mod codec;
pub mod config;
pub mod errors;
pub mod keys;
pub mod state;

pub use config::StoreConfig;
pub use errors::{CodecError, EngineError, StoreError};
pub use state::{load_block_store_state, save_block_store_state, BlockStoreState};
