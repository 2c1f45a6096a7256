//! # Record Codec
//!
//! Byte-exact encoding of persisted records. Encoding is total on the
//! crate's record types; decoding returns a [`CodecError`] that call
//! sites escalate to a panic, since bytes that fail to decode are
//! corruption, not absence.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::CodecError;

/// Encode a record for persistence.
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    match bincode::serialize(value) {
        Ok(bytes) => bytes,
        // Only reachable for types bincode cannot represent; never for
        // the record types this store persists.
        Err(e) => panic!("failed to encode record: {e}"),
    }
}

/// Decode a persisted record.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(bytes).map_err(|e| CodecError(e.to_string()))
}

/// Encode a height for the hash-to-height index value.
pub fn encode_height(height: u64) -> Vec<u8> {
    height.to_le_bytes().to_vec()
}

/// Decode a hash-to-height index value.
pub fn decode_height(bytes: &[u8]) -> Result<u64, CodecError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| CodecError(format!("height value has {} bytes, want 8", bytes.len())))?;
    Ok(u64::from_le_bytes(arr))
}
