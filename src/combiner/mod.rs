//! Composite shared-secret combiner
//!
//! Merges the ML-KEM and ECDH secrets, the two classical points and the
//! algorithm label into one 32-byte secret with SHA3-256. The feed order is
//! part of the wire contract: both sides must hash exactly the same sequence.

mod combine;
mod point;

pub use combine::combine;
pub use point::{EcPoint, UNCOMPRESSED_POINT_TAG};
