//! # Ports
//!
//! The store's boundary: the API it exposes (inbound) and the engine it
//! requires (outbound).

pub mod inbound;
pub mod outbound;

pub use inbound::BlockStoreApi;
pub use outbound::{BatchOperation, KvEngine, WriteBatch};
