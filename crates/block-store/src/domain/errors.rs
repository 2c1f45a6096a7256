//! # Store Errors
//!
//! Three disjoint outcomes leave this crate: absence (`None` from any
//! load), ordinary caller errors ([`StoreError`]), and fatal corruption,
//! which panics. A missing key is data; a key that fails to decode is a
//! programmer error and must never be silently converted to absence.

use thiserror::Error;

/// Recoverable errors returned to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Prune target of zero.
    #[error("cannot prune to height 0: height must be greater than 0")]
    PruneHeightZero,

    /// Prune requested on a store holding no blocks.
    #[error("cannot prune an empty block store")]
    EmptyStore,

    /// Prune target below the retained window.
    #[error("cannot prune to height {target}: it is lower than base height {base}")]
    PruneBelowBase {
        /// Requested prune target.
        target: u64,
        /// Current base of the window.
        base: u64,
    },

    /// Prune target above the stored window.
    #[error("cannot prune beyond the latest height {height}")]
    PruneBeyondHeight {
        /// Current top of the window.
        height: u64,
    },

    /// A block read was abandoned via its cancellation token.
    #[error("block read cancelled")]
    Canceled,
}

/// Errors surfaced by key-value engine implementations.
///
/// The store treats every engine failure as fatal; this type exists so
/// engine adapters can report failures without deciding policy.
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O failure in the engine.
    #[error("engine i/o error: {0}")]
    Io(String),

    /// The engine detected corruption in its own structures.
    #[error("engine corruption: {0}")]
    Corruption(String),
}

/// A persisted record whose bytes did not decode.
#[derive(Debug, Error)]
#[error("malformed record: {0}")]
pub struct CodecError(pub String);
