//! Hybrid encryption over a composite key
//!
//! Seals arbitrary data to a composite encapsulation key: the composite KEM
//! supplies a fresh shared secret, HKDF-SHA256 turns it into an AES-256-GCM
//! key, and the result travels as a self-describing [`HybridCipherData`]
//! block.

mod cipher_data;
mod encryption;

pub use cipher_data::{HybridCipherData, NONCE_SIZE};
pub use encryption::{decrypt_hybrid, encrypt_hybrid};
