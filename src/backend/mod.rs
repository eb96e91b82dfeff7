/*!
 * Subcomponent backends
 *
 * The composite key talks to its two halves only through the
 * [`LatticeKem`] and [`EllipticDiffieHellman`] capability traits. The
 * default implementations wrap the RustCrypto `ml-kem` crate and the
 * `p256`/`p384`/`p521` curve crates; tests and alternative providers can
 * plug in their own.
 */

mod ecdh;
mod mlkem;
mod traits;

pub use ecdh::{NistEcdh, NistPrivateKey, NistPublicKey};
pub use mlkem::{MlKemBackend, MlKemKey};
pub use traits::{EllipticDiffieHellman, LatticeKem};

#[cfg(test)]
mod tests;
