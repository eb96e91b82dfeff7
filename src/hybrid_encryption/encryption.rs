use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::cipher_data::{HybridCipherData, NONCE_SIZE};
use crate::backend::{EllipticDiffieHellman, LatticeKem};
use crate::composite::CompositeMlKem;
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::registry::CompositeMlKemAlgorithm;
use crate::secure_memory::{SecureBuffer, SecureBytes};

const KDF_INFO_PREFIX: &[u8] = b"composite-mlkem hybrid encryption";

/// Encrypt `plaintext` to the holder of `recipient`'s private key
///
/// `recipient` only needs its public half. `associated_data` is
/// authenticated but not encrypted and must be supplied again on
/// decryption.
pub fn encrypt_hybrid<L, E>(
    recipient: &CompositeMlKem<L, E>,
    plaintext: &[u8],
    associated_data: &[u8],
) -> CryptoResult<HybridCipherData>
where
    L: LatticeKem,
    E: EllipticDiffieHellman,
{
    let (kem_ciphertext, shared_secret) = recipient.encapsulate()?;
    let cipher = derive_cipher(recipient.algorithm(), &shared_secret, &kem_ciphertext)?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.try_fill_bytes(&mut nonce)?;

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad: associated_data,
            },
        )
        .map_err(|_| {
            CryptoError::encryption_error(
                "encrypt",
                "AES-256-GCM encryption failed",
                error_codes::AES_ENCRYPTION_FAILED,
            )
        })?;

    log::debug!(
        "Sealed {} bytes with {}",
        plaintext.len(),
        recipient.algorithm()
    );
    Ok(HybridCipherData {
        algorithm_oid: recipient.algorithm().oid().to_string(),
        kem_ciphertext,
        nonce,
        ciphertext,
    })
}

/// Decrypt a block produced by [`encrypt_hybrid`]
pub fn decrypt_hybrid<L, E>(
    recipient: &CompositeMlKem<L, E>,
    data: &HybridCipherData,
    associated_data: &[u8],
) -> CryptoResult<Vec<u8>>
where
    L: LatticeKem,
    E: EllipticDiffieHellman,
{
    let algorithm = recipient.algorithm();
    if data.algorithm_oid != algorithm.oid() {
        return Err(CryptoError::invalid_encoding(
            "hybrid cipher data algorithm",
            algorithm.oid(),
            &data.algorithm_oid,
            error_codes::ALGORITHM_MISMATCH,
        ));
    }

    let shared_secret = recipient.decapsulate(&data.kem_ciphertext)?;
    let cipher = derive_cipher(algorithm, &shared_secret, &data.kem_ciphertext)?;

    cipher
        .decrypt(
            Nonce::from_slice(&data.nonce),
            Payload {
                msg: &data.ciphertext,
                aad: associated_data,
            },
        )
        .map_err(|_| {
            CryptoError::encryption_error(
                "decrypt",
                "authentication tag mismatch",
                error_codes::AES_AUTHENTICATION_FAILED,
            )
        })
}

/// HKDF-SHA256(salt = KEM ciphertext, ikm = shared secret,
/// info = prefix || label) -> AES-256 key
fn derive_cipher(
    algorithm: &CompositeMlKemAlgorithm,
    shared_secret: &SecureBytes,
    kem_ciphertext: &[u8],
) -> CryptoResult<Aes256Gcm> {
    let mut info = Vec::with_capacity(KDF_INFO_PREFIX.len() + algorithm.label().len());
    info.extend_from_slice(KDF_INFO_PREFIX);
    info.extend_from_slice(algorithm.label());

    let hkdf = Hkdf::<Sha256>::new(Some(kem_ciphertext), shared_secret.as_bytes());
    let mut key = SecureBuffer::new([0u8; 32]);
    hkdf.expand(&info, &mut key[..]).map_err(|_| {
        CryptoError::encryption_error(
            "derive_key",
            "HKDF output length rejected",
            error_codes::KEY_DERIVATION_FAILED,
        )
    })?;

    Aes256Gcm::new_from_slice(&key[..]).map_err(|_| {
        CryptoError::encryption_error(
            "derive_key",
            "invalid AES-256 key length",
            error_codes::KEY_DERIVATION_FAILED,
        )
    })
}
