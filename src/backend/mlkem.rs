//! ML-KEM backend on top of the RustCrypto `ml-kem` crate (FIPS 203)

use std::fmt;

use ml_kem::kem::{Decapsulate, Encapsulate};
use ml_kem::{Ciphertext, Encoded, EncodedSizeUser, KemCore, MlKem1024, MlKem768, B32};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use super::traits::LatticeKem;
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::registry::MlKemVariant;
use crate::secure_memory::{SecureBuffer, SecureBytes};

const SEED_SIZE: usize = 64;

/// Default [`LatticeKem`] implementation
#[derive(Clone, Copy, Debug, Default)]
pub struct MlKemBackend;

/// An ML-KEM key held by [`MlKemBackend`]
///
/// Private keys keep their seed so they can be exported in the compact
/// `d || z` form.
pub struct MlKemKey {
    variant: MlKemVariant,
    inner: KeyPair,
}

enum KeyPair {
    MlKem768(MlKemKeyPair<MlKem768>),
    MlKem1024(MlKemKeyPair<MlKem1024>),
}

struct MlKemKeyPair<K: KemCore> {
    seed: Option<SecureBuffer<[u8; SEED_SIZE]>>,
    decapsulation_key: Option<K::DecapsulationKey>,
    encapsulation_key: K::EncapsulationKey,
}

macro_rules! with_pair {
    ($key:expr, $pair:ident => $body:expr) => {
        match &$key.inner {
            KeyPair::MlKem768($pair) => $body,
            KeyPair::MlKem1024($pair) => $body,
        }
    };
}

impl MlKemKey {
    pub fn variant(&self) -> MlKemVariant {
        self.variant
    }

    pub fn has_private_key(&self) -> bool {
        with_pair!(self, pair => pair.decapsulation_key.is_some())
    }

    fn from_seed(variant: MlKemVariant, seed: SecureBuffer<[u8; SEED_SIZE]>) -> CryptoResult<Self> {
        let inner = match variant {
            MlKemVariant::MlKem768 => KeyPair::MlKem768(MlKemKeyPair::from_seed(seed)?),
            MlKemVariant::MlKem1024 => KeyPair::MlKem1024(MlKemKeyPair::from_seed(seed)?),
        };
        Ok(Self { variant, inner })
    }

    fn from_encapsulation_key(variant: MlKemVariant, bytes: &[u8]) -> CryptoResult<Self> {
        let inner = match variant {
            MlKemVariant::MlKem768 => {
                KeyPair::MlKem768(MlKemKeyPair::from_encapsulation_key(bytes)?)
            }
            MlKemVariant::MlKem1024 => {
                KeyPair::MlKem1024(MlKemKeyPair::from_encapsulation_key(bytes)?)
            }
        };
        Ok(Self { variant, inner })
    }
}

impl fmt::Debug for MlKemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlKemKey")
            .field("variant", &self.variant)
            .field("private", &self.has_private_key())
            .finish()
    }
}

impl<K: KemCore> MlKemKeyPair<K> {
    fn from_seed(seed: SecureBuffer<[u8; SEED_SIZE]>) -> CryptoResult<Self> {
        let (d_bytes, z_bytes) = seed.split_at(32);
        let mut d = B32::try_from(d_bytes).map_err(|_| seed_error())?;
        let mut z = B32::try_from(z_bytes).map_err(|_| seed_error())?;

        let (decapsulation_key, encapsulation_key) = K::generate_deterministic(&d, &z);
        d.as_mut_slice().zeroize();
        z.as_mut_slice().zeroize();

        Ok(Self {
            seed: Some(seed),
            decapsulation_key: Some(decapsulation_key),
            encapsulation_key,
        })
    }

    fn from_encapsulation_key(bytes: &[u8]) -> CryptoResult<Self> {
        let encoded = Encoded::<K::EncapsulationKey>::try_from(bytes).map_err(|_| {
            CryptoError::lattice_kem_error(
                "import_encapsulation_key",
                "encapsulation key has the wrong size",
                error_codes::MLKEM_KEY_IMPORT_FAILED,
            )
        })?;
        let encapsulation_key = <K::EncapsulationKey as EncodedSizeUser>::from_bytes(&encoded);

        // Modulus check: every coefficient must already be reduced, so the
        // key has to re-encode to the exact input bytes.
        if encapsulation_key.as_bytes().as_slice() != bytes {
            return Err(CryptoError::invalid_encoding(
                "ML-KEM encapsulation key",
                "coefficients reduced modulo q",
                "non-canonical encoding",
                error_codes::MLKEM_KEY_IMPORT_FAILED,
            ));
        }

        Ok(Self {
            seed: None,
            decapsulation_key: None,
            encapsulation_key,
        })
    }

    fn export_seed(&self) -> CryptoResult<SecureBytes> {
        self.seed
            .as_ref()
            .map(|seed| SecureBytes::new(&seed[..]))
            .ok_or_else(|| CryptoError::missing_private_key("export_private_seed"))
    }

    fn export_encapsulation_key(&self) -> Vec<u8> {
        self.encapsulation_key.as_bytes().to_vec()
    }

    fn encapsulate(&self) -> CryptoResult<(Vec<u8>, SecureBytes)> {
        let (ciphertext, mut shared_key) = self
            .encapsulation_key
            .encapsulate(&mut OsRng)
            .map_err(|_| {
                CryptoError::lattice_kem_error(
                    "encapsulate",
                    "ML-KEM encapsulation failed",
                    error_codes::MLKEM_ENCAPSULATION_FAILED,
                )
            })?;

        let secret = SecureBytes::new(shared_key.as_slice());
        shared_key.as_mut_slice().zeroize();
        Ok((ciphertext.to_vec(), secret))
    }

    fn decapsulate(&self, ciphertext: &[u8]) -> CryptoResult<SecureBytes> {
        let decapsulation_key = self
            .decapsulation_key
            .as_ref()
            .ok_or_else(|| CryptoError::missing_private_key("decapsulate"))?;

        let ciphertext = Ciphertext::<K>::try_from(ciphertext).map_err(|_| {
            CryptoError::lattice_kem_error(
                "decapsulate",
                "ciphertext has the wrong size",
                error_codes::MLKEM_DECAPSULATION_FAILED,
            )
        })?;

        let mut shared_key = decapsulation_key.decapsulate(&ciphertext).map_err(|_| {
            CryptoError::lattice_kem_error(
                "decapsulate",
                "ML-KEM decapsulation failed",
                error_codes::MLKEM_DECAPSULATION_FAILED,
            )
        })?;

        let secret = SecureBytes::new(shared_key.as_slice());
        shared_key.as_mut_slice().zeroize();
        Ok(secret)
    }
}

fn seed_error() -> CryptoError {
    CryptoError::lattice_kem_error(
        "import_private_seed",
        "seed halves must be 32 bytes each",
        error_codes::MLKEM_KEY_IMPORT_FAILED,
    )
}

impl LatticeKem for MlKemBackend {
    type Key = MlKemKey;

    fn generate(&self, variant: MlKemVariant) -> CryptoResult<MlKemKey> {
        let mut seed = SecureBuffer::new([0u8; SEED_SIZE]);
        OsRng.try_fill_bytes(&mut seed[..])?;
        MlKemKey::from_seed(variant, seed)
    }

    fn import_private_seed(&self, variant: MlKemVariant, seed: &[u8]) -> CryptoResult<MlKemKey> {
        if seed.len() != variant.private_seed_size() {
            return Err(CryptoError::invalid_length(
                "ML-KEM private seed",
                variant.private_seed_size(),
                seed.len(),
                error_codes::INVALID_KEY_LENGTH,
            ));
        }

        let mut buffer = SecureBuffer::new([0u8; SEED_SIZE]);
        buffer.copy_from_slice(seed);
        MlKemKey::from_seed(variant, buffer)
    }

    fn import_encapsulation_key(
        &self,
        variant: MlKemVariant,
        encapsulation_key: &[u8],
    ) -> CryptoResult<MlKemKey> {
        if encapsulation_key.len() != variant.encapsulation_key_size() {
            return Err(CryptoError::invalid_length(
                "ML-KEM encapsulation key",
                variant.encapsulation_key_size(),
                encapsulation_key.len(),
                error_codes::INVALID_KEY_LENGTH,
            ));
        }
        MlKemKey::from_encapsulation_key(variant, encapsulation_key)
    }

    fn export_private_seed(&self, key: &MlKemKey) -> CryptoResult<SecureBytes> {
        with_pair!(key, pair => pair.export_seed())
    }

    fn export_encapsulation_key(&self, key: &MlKemKey) -> Vec<u8> {
        with_pair!(key, pair => pair.export_encapsulation_key())
    }

    fn encapsulate(&self, key: &MlKemKey) -> CryptoResult<(Vec<u8>, SecureBytes)> {
        with_pair!(key, pair => pair.encapsulate())
    }

    fn decapsulate(&self, key: &MlKemKey, ciphertext: &[u8]) -> CryptoResult<SecureBytes> {
        if ciphertext.len() != key.variant.ciphertext_size() {
            return Err(CryptoError::invalid_length(
                "ML-KEM ciphertext",
                key.variant.ciphertext_size(),
                ciphertext.len(),
                error_codes::INVALID_CIPHERTEXT_LENGTH,
            ));
        }
        with_pair!(key, pair => pair.decapsulate(ciphertext))
    }
}
