use crate::combiner::EcPoint;
use crate::error::CryptoResult;
use crate::registry::{EcCurve, MlKemVariant};
use crate::secure_memory::SecureBytes;

/// Lattice KEM capability consumed by the composite key
///
/// Implementations are stateless factories; all key state lives in
/// [`LatticeKem::Key`]. A key may hold only the encapsulation half, in which
/// case the private operations fail with `MissingPrivateKey`.
pub trait LatticeKem {
    /// Key handle, private or public-only
    type Key;

    /// Generate a fresh key pair
    fn generate(&self, variant: MlKemVariant) -> CryptoResult<Self::Key>;

    /// Rebuild a key pair from its 64-byte private seed `d || z`
    fn import_private_seed(&self, variant: MlKemVariant, seed: &[u8]) -> CryptoResult<Self::Key>;

    /// Wrap an encoded encapsulation key
    fn import_encapsulation_key(
        &self,
        variant: MlKemVariant,
        encapsulation_key: &[u8],
    ) -> CryptoResult<Self::Key>;

    fn export_private_seed(&self, key: &Self::Key) -> CryptoResult<SecureBytes>;

    fn export_encapsulation_key(&self, key: &Self::Key) -> Vec<u8>;

    /// Returns `(ciphertext, shared_secret)`
    fn encapsulate(&self, key: &Self::Key) -> CryptoResult<(Vec<u8>, SecureBytes)>;

    fn decapsulate(&self, key: &Self::Key, ciphertext: &[u8]) -> CryptoResult<SecureBytes>;
}

/// Elliptic-curve Diffie-Hellman capability consumed by the composite key
pub trait EllipticDiffieHellman {
    type PrivateKey;
    type PublicKey;

    /// Generate a fresh key pair on `curve`
    fn generate(&self, curve: EcCurve) -> CryptoResult<Self::PrivateKey>;

    /// Public half of a private key
    fn public_key(&self, key: &Self::PrivateKey) -> Self::PublicKey;

    /// Parse the SEC1 `ECPrivateKey` DER encoding of a key on `curve`
    fn import_private_key(&self, curve: EcCurve, encoded: &[u8]) -> CryptoResult<Self::PrivateKey>;

    /// SEC1 `ECPrivateKey` DER with named-curve parameters and no public key
    fn export_private_key(&self, key: &Self::PrivateKey) -> CryptoResult<SecureBytes>;

    /// Raw ECDH agreement: the X coordinate of the shared point
    fn derive_raw_secret(
        &self,
        key: &Self::PrivateKey,
        peer: &Self::PublicKey,
    ) -> CryptoResult<SecureBytes>;

    /// Affine coordinates of a public key, fixed-width
    fn export_point(&self, key: &Self::PublicKey) -> EcPoint;

    /// Build a public key from coordinates
    ///
    /// Fails with `InvalidCurvePoint` if the point is not on `curve`.
    fn import_point(&self, curve: EcCurve, point: &EcPoint) -> CryptoResult<Self::PublicKey>;

    /// Check that `point` satisfies the equation of `curve`
    fn validate_on_curve(&self, curve: EcCurve, point: &EcPoint) -> bool {
        self.import_point(curve, point).is_ok()
    }
}
