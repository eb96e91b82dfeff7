use std::fmt;

use crate::backend::{EllipticDiffieHellman, LatticeKem, MlKemBackend, NistEcdh};
use crate::combiner::{combine, EcPoint};
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::registry::CompositeMlKemAlgorithm;
use crate::secure_memory::SecureBytes;

/// A composite ML-KEM + ECDH key
///
/// Owns one ML-KEM key and one EC key for a fixed
/// [`CompositeMlKemAlgorithm`]. A key built from an encapsulation key only
/// carries the public halves: it can encapsulate and export its
/// encapsulation key, nothing else.
///
/// The backends default to [`MlKemBackend`] and [`NistEcdh`]; the `*_with`
/// constructors accept any other implementation of the capability traits.
///
/// # Example
///
/// ```
/// use composite_mlkem::composite::CompositeMlKem;
/// use composite_mlkem::registry::MLKEM768_ECDH_P256_SHA3_256;
///
/// let receiver = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256).unwrap();
/// let sender = CompositeMlKem::import_encapsulation_key(
///     &MLKEM768_ECDH_P256_SHA3_256,
///     &receiver.export_encapsulation_key().unwrap(),
/// )
/// .unwrap();
///
/// let (ciphertext, sent) = sender.encapsulate().unwrap();
/// let received = receiver.decapsulate(&ciphertext).unwrap();
/// assert_eq!(sent, received);
/// ```
pub struct CompositeMlKem<L = MlKemBackend, E = NistEcdh>
where
    L: LatticeKem,
    E: EllipticDiffieHellman,
{
    algorithm: &'static CompositeMlKemAlgorithm,
    lattice: L,
    ecdh: E,
    keys: Option<Subkeys<L::Key, E::PrivateKey, E::PublicKey>>,
}

struct Subkeys<K, P, Q> {
    lattice_key: K,
    ec_private: Option<P>,
    ec_public: Q,
    ec_point: EcPoint,
}

impl CompositeMlKem {
    /// Generate a fresh composite key pair with the default backends
    pub fn generate_key(algorithm: &'static CompositeMlKemAlgorithm) -> CryptoResult<Self> {
        Self::generate_key_with(algorithm, MlKemBackend, NistEcdh)
    }

    /// Import `seed || ec_private_key_der`
    pub fn import_private_key(
        algorithm: &'static CompositeMlKemAlgorithm,
        private_key: &[u8],
    ) -> CryptoResult<Self> {
        Self::import_private_key_with(algorithm, MlKemBackend, NistEcdh, private_key)
    }

    /// Import `mlkem_encapsulation_key || 0x04 || X || Y`
    pub fn import_encapsulation_key(
        algorithm: &'static CompositeMlKemAlgorithm,
        encapsulation_key: &[u8],
    ) -> CryptoResult<Self> {
        Self::import_encapsulation_key_with(algorithm, MlKemBackend, NistEcdh, encapsulation_key)
    }

    /// [`import_private_key`](Self::import_private_key) for the algorithm
    /// registered under `oid`
    pub fn import_private_key_by_oid(oid: &str, private_key: &[u8]) -> CryptoResult<Self> {
        Self::import_private_key(CompositeMlKemAlgorithm::require(oid)?, private_key)
    }

    /// [`import_encapsulation_key`](Self::import_encapsulation_key) for the
    /// algorithm registered under `oid`
    pub fn import_encapsulation_key_by_oid(
        oid: &str,
        encapsulation_key: &[u8],
    ) -> CryptoResult<Self> {
        Self::import_encapsulation_key(CompositeMlKemAlgorithm::require(oid)?, encapsulation_key)
    }
}

impl<L, E> CompositeMlKem<L, E>
where
    L: LatticeKem,
    E: EllipticDiffieHellman,
{
    pub fn generate_key_with(
        algorithm: &'static CompositeMlKemAlgorithm,
        lattice: L,
        ecdh: E,
    ) -> CryptoResult<Self> {
        let lattice_key = lattice.generate(algorithm.ml_kem())?;
        let ec_private = ecdh.generate(algorithm.curve())?;
        let ec_public = ecdh.public_key(&ec_private);

        log::debug!("Generated {} key pair", algorithm);
        Ok(Self::assemble(algorithm, lattice, ecdh, lattice_key, Some(ec_private), ec_public))
    }

    pub fn import_private_key_with(
        algorithm: &'static CompositeMlKemAlgorithm,
        lattice: L,
        ecdh: E,
        private_key: &[u8],
    ) -> CryptoResult<Self> {
        if private_key.len() != algorithm.private_key_size() {
            return Err(CryptoError::invalid_length(
                &format!("{} private key", algorithm),
                algorithm.private_key_size(),
                private_key.len(),
                error_codes::INVALID_KEY_LENGTH,
            ));
        }

        let (seed, ec_der) = private_key.split_at(algorithm.ml_kem().private_seed_size());
        let lattice_key = lattice.import_private_seed(algorithm.ml_kem(), seed)?;
        let ec_private = ecdh.import_private_key(algorithm.curve(), ec_der)?;
        let ec_public = ecdh.public_key(&ec_private);

        log::debug!("Imported {} private key", algorithm);
        Ok(Self::assemble(algorithm, lattice, ecdh, lattice_key, Some(ec_private), ec_public))
    }

    pub fn import_encapsulation_key_with(
        algorithm: &'static CompositeMlKemAlgorithm,
        lattice: L,
        ecdh: E,
        encapsulation_key: &[u8],
    ) -> CryptoResult<Self> {
        if encapsulation_key.len() != algorithm.encapsulation_key_size() {
            return Err(CryptoError::invalid_length(
                &format!("{} encapsulation key", algorithm),
                algorithm.encapsulation_key_size(),
                encapsulation_key.len(),
                error_codes::INVALID_KEY_LENGTH,
            ));
        }

        let (ek, point) = encapsulation_key.split_at(algorithm.ml_kem().encapsulation_key_size());
        let lattice_key = lattice.import_encapsulation_key(algorithm.ml_kem(), ek)?;
        let point = EcPoint::from_uncompressed(algorithm.curve(), point)?;
        let ec_public = ecdh.import_point(algorithm.curve(), &point)?;

        log::debug!("Imported {} encapsulation key", algorithm);
        Ok(Self::assemble(algorithm, lattice, ecdh, lattice_key, None, ec_public))
    }

    fn assemble(
        algorithm: &'static CompositeMlKemAlgorithm,
        lattice: L,
        ecdh: E,
        lattice_key: L::Key,
        ec_private: Option<E::PrivateKey>,
        ec_public: E::PublicKey,
    ) -> Self {
        let ec_point = ecdh.export_point(&ec_public);
        Self {
            algorithm,
            lattice,
            ecdh,
            keys: Some(Subkeys {
                lattice_key,
                ec_private,
                ec_public,
                ec_point,
            }),
        }
    }

    fn subkeys(
        &self,
        operation: &str,
    ) -> CryptoResult<&Subkeys<L::Key, E::PrivateKey, E::PublicKey>> {
        self.keys
            .as_ref()
            .ok_or_else(|| CryptoError::not_initialized(operation))
    }

    pub fn algorithm(&self) -> &'static CompositeMlKemAlgorithm {
        self.algorithm
    }

    /// Whether the key can decapsulate and export its private half
    pub fn has_private_key(&self) -> bool {
        self.keys
            .as_ref()
            .map_or(false, |keys| keys.ec_private.is_some())
    }

    /// `seed || ec_private_key_der`
    pub fn export_private_key(&self) -> CryptoResult<SecureBytes> {
        let keys = self.subkeys("export_private_key")?;
        let ec_private = keys
            .ec_private
            .as_ref()
            .ok_or_else(|| CryptoError::missing_private_key("export_private_key"))?;

        let seed = self.lattice.export_private_seed(&keys.lattice_key)?;
        let ec_der = self.ecdh.export_private_key(ec_private)?;

        let mut out = SecureBytes::with_capacity(self.algorithm.private_key_size());
        out.extend_from_slice(seed.as_bytes());
        out.extend_from_slice(ec_der.as_bytes());
        Ok(out)
    }

    /// `mlkem_encapsulation_key || 0x04 || X || Y`
    pub fn export_encapsulation_key(&self) -> CryptoResult<Vec<u8>> {
        let keys = self.subkeys("export_encapsulation_key")?;

        let mut out = Vec::with_capacity(self.algorithm.encapsulation_key_size());
        out.extend_from_slice(&self.lattice.export_encapsulation_key(&keys.lattice_key));
        keys.ec_point.write_uncompressed(&mut out);
        Ok(out)
    }

    /// Encapsulate a fresh shared secret to this key
    ///
    /// Returns `(ciphertext, shared_secret)`; the ciphertext is
    /// `mlkem_ciphertext || 0x04 || X || Y` of a one-time EC key.
    pub fn encapsulate(&self) -> CryptoResult<(Vec<u8>, SecureBytes)> {
        let keys = self.subkeys("encapsulate")?;
        let curve = self.algorithm.curve();

        let ephemeral = self.ecdh.generate(curve)?;
        let ephemeral_point = self.ecdh.export_point(&self.ecdh.public_key(&ephemeral));
        let ecdh_secret = self.ecdh.derive_raw_secret(&ephemeral, &keys.ec_public)?;
        drop(ephemeral);

        let (mut ciphertext, mlkem_secret) = self.lattice.encapsulate(&keys.lattice_key)?;
        ciphertext.reserve(curve.public_key_size());
        ephemeral_point.write_uncompressed(&mut ciphertext);

        let shared_secret = combine(
            mlkem_secret.as_bytes(),
            ecdh_secret.as_bytes(),
            &ephemeral_point,
            &keys.ec_point,
            self.algorithm.label(),
        );
        Ok((ciphertext, shared_secret))
    }

    /// Recover the shared secret from a composite ciphertext
    pub fn decapsulate(&self, ciphertext: &[u8]) -> CryptoResult<SecureBytes> {
        let keys = self.subkeys("decapsulate")?;
        let ec_private = keys
            .ec_private
            .as_ref()
            .ok_or_else(|| CryptoError::missing_private_key("decapsulate"))?;

        if ciphertext.len() != self.algorithm.ciphertext_size() {
            return Err(CryptoError::invalid_length(
                &format!("{} ciphertext", self.algorithm),
                self.algorithm.ciphertext_size(),
                ciphertext.len(),
                error_codes::INVALID_CIPHERTEXT_LENGTH,
            ));
        }

        let curve = self.algorithm.curve();
        let (mlkem_ciphertext, ec_ciphertext) =
            ciphertext.split_at(self.algorithm.ml_kem().ciphertext_size());

        let mlkem_secret = self.lattice.decapsulate(&keys.lattice_key, mlkem_ciphertext)?;

        // The peer point must be on the curve before it touches the private key.
        let ephemeral_point = EcPoint::from_uncompressed(curve, ec_ciphertext)?;
        let ephemeral_public = self.ecdh.import_point(curve, &ephemeral_point)?;
        let ecdh_secret = self.ecdh.derive_raw_secret(ec_private, &ephemeral_public)?;

        Ok(combine(
            mlkem_secret.as_bytes(),
            ecdh_secret.as_bytes(),
            &ephemeral_point,
            &keys.ec_point,
            self.algorithm.label(),
        ))
    }

    /// Release both subkeys
    ///
    /// Any further operation fails with `NotInitialized`. Calling this more
    /// than once is harmless.
    pub fn dispose(&mut self) {
        if self.keys.take().is_some() {
            log::debug!("Disposed {} key", self.algorithm);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.keys.is_none()
    }
}

impl<L, E> fmt::Debug for CompositeMlKem<L, E>
where
    L: LatticeKem,
    E: EllipticDiffieHellman,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeMlKem")
            .field("algorithm", &self.algorithm.name())
            .field("private", &self.has_private_key())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
