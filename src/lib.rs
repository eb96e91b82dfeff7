/*!
 * Composite ML-KEM Key Encapsulation
 *
 * This crate binds a lattice-based KEM and an elliptic-curve Diffie-Hellman
 * exchange into one composite key encapsulation mechanism, following the
 * IETF LAMPS composite KEM construction:
 *
 * - ML-KEM-768 / ML-KEM-1024 (FIPS 203) for the post-quantum half
 * - ECDH over NIST P-256, P-384 or P-521 for the classical half
 * - SHA3-256 to combine both secrets with the ciphertext, the public key
 *   and a per-algorithm label
 *
 * The combined secret stays secure as long as either half does.
 *
 * # Example
 *
 * ```
 * use composite_mlkem::prelude::*;
 *
 * fn main() -> Result<(), CryptoError> {
 *     let receiver = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256)?;
 *     let encapsulation_key = receiver.export_encapsulation_key()?;
 *
 *     let sender = CompositeMlKem::import_encapsulation_key_by_oid(
 *         "1.3.6.1.5.5.7.6.59",
 *         &encapsulation_key,
 *     )?;
 *     let (ciphertext, shared_secret) = sender.encapsulate()?;
 *
 *     assert_eq!(receiver.decapsulate(&ciphertext)?, shared_secret);
 *     Ok(())
 * }
 * ```
 */

/// Catalog of composite parameter sets
pub mod registry;

/// ML-KEM and ECDH backends behind capability traits
pub mod backend;

/// SHA3-256 secret combiner and point encoding
pub mod combiner;

/// The composite key object
pub mod composite;

/// Seal/open data to a composite key
#[cfg(feature = "encryption")]
pub mod hybrid_encryption;

/// Common error types
pub mod error;

/// Secure memory handling utilities
pub mod secure_memory;

pub use composite::CompositeMlKem;
pub use error::{CryptoError, CryptoResult};
pub use registry::{CompositeMlKemAlgorithm, EcCurve, MlKemVariant};

/// The commonly used types and algorithm constants in one import
pub mod prelude {
    pub use crate::backend::{EllipticDiffieHellman, LatticeKem, MlKemBackend, NistEcdh};
    pub use crate::composite::CompositeMlKem;
    pub use crate::error::{CryptoError, CryptoResult};
    #[cfg(feature = "encryption")]
    pub use crate::hybrid_encryption::{decrypt_hybrid, encrypt_hybrid, HybridCipherData};
    pub use crate::registry::{
        CompositeMlKemAlgorithm, EcCurve, MlKemVariant, MLKEM1024_ECDH_P384_SHA3_256,
        MLKEM1024_ECDH_P521_SHA3_256, MLKEM768_ECDH_P256_SHA3_256, MLKEM768_ECDH_P384_SHA3_256,
    };
    pub use crate::secure_memory::{with_secure_scope, SecureBuffer, SecureBytes};
}
