use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};

/// AES-GCM nonce size in bytes
pub const NONCE_SIZE: usize = 12;

/// Everything a recipient needs to open a hybrid-encrypted message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridCipherData {
    /// OID of the composite algorithm the message was sealed with
    pub algorithm_oid: String,
    /// Composite KEM ciphertext
    pub kem_ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_SIZE],
    /// AES-256-GCM ciphertext with the authentication tag appended
    pub ciphertext: Vec<u8>,
}

impl HybridCipherData {
    /// Serialize to bytes
    pub fn to_bytes(&self) -> CryptoResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CryptoError::SerializationError(e.to_string()))
    }

    /// Deserialize from bytes produced by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        bincode::deserialize(bytes).map_err(|e| CryptoError::SerializationError(e.to_string()))
    }
}
