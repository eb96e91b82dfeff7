// End-to-end tests through the public API

use composite_mlkem::prelude::*;
use composite_mlkem::error::error_codes;
use proptest::prelude::*;

#[test]
fn test_prelude_round_trip() -> Result<(), CryptoError> {
    let receiver = CompositeMlKem::generate_key(&MLKEM1024_ECDH_P384_SHA3_256)?;
    let encapsulation_key = receiver.export_encapsulation_key()?;

    let sender = CompositeMlKem::import_encapsulation_key_by_oid(
        MLKEM1024_ECDH_P384_SHA3_256.oid(),
        &encapsulation_key,
    )?;
    let (ciphertext, shared_secret) = sender.encapsulate()?;
    assert_eq!(receiver.decapsulate(&ciphertext)?, shared_secret);
    Ok(())
}

#[cfg(feature = "encryption")]
#[test]
fn test_key_transport_between_parties() {
    // Alice publishes her key, Bob encrypts a message to it
    let alice = CompositeMlKem::generate_key(&MLKEM1024_ECDH_P521_SHA3_256).unwrap();
    let published = alice.export_encapsulation_key().unwrap();

    let bob = CompositeMlKem::import_encapsulation_key(&MLKEM1024_ECDH_P521_SHA3_256, &published)
        .unwrap();
    let block = encrypt_hybrid(&bob, b"The quick brown fox jumps over the lazy dog.", &[])
        .unwrap()
        .to_bytes()
        .unwrap();

    // Alice restores her key from storage and decrypts
    let stored = alice.export_private_key().unwrap();
    drop(alice);
    let alice = CompositeMlKem::import_private_key_by_oid("1.3.6.1.5.5.7.6.66", stored.as_bytes())
        .unwrap();
    let message = decrypt_hybrid(&alice, &HybridCipherData::from_bytes(&block).unwrap(), &[])
        .unwrap();
    assert_eq!(message, b"The quick brown fox jumps over the lazy dog.");
}

#[test]
fn test_ciphertext_for_one_algorithm_is_rejected_by_another() {
    let p256 = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256).unwrap();
    let p384 = CompositeMlKem::generate_key(&MLKEM768_ECDH_P384_SHA3_256).unwrap();

    let (ciphertext, _) = p256.encapsulate().unwrap();
    match p384.decapsulate(&ciphertext) {
        Err(CryptoError::InvalidEncoding { error_code, .. }) => {
            assert_eq!(error_code, error_codes::INVALID_CIPHERTEXT_LENGTH)
        }
        other => panic!("expected InvalidEncoding, got {:?}", other),
    }
}

#[test]
fn test_tampered_mlkem_ciphertext_gives_a_different_secret() {
    let key = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256).unwrap();
    let (mut ciphertext, secret) = key.encapsulate().unwrap();

    // ML-KEM decapsulation never fails; it returns an unrelated secret instead
    ciphertext[0] ^= 0x01;
    let other = key.decapsulate(&ciphertext).unwrap();
    assert_ne!(other, secret);
}

#[test]
fn test_errors_carry_codes_and_remediation() {
    let err = CompositeMlKem::import_private_key_by_oid("2.16.840.1.101.3.4.4.2", &[]).unwrap_err();
    assert_eq!(err.error_code(), error_codes::UNKNOWN_ALGORITHM);
    assert_eq!(err.error_type(), "UnknownAlgorithm");
    assert!(err.suggested_remediation().is_some());

    let mut key = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256).unwrap();
    key.dispose();
    let err = key.encapsulate().unwrap_err();
    assert_eq!(err.error_code(), error_codes::KEY_NOT_INITIALIZED);
    assert!(!err.user_friendly_message().is_empty());
}

#[test]
fn test_unsupported_curve_names() {
    assert!(matches!(
        EcCurve::from_name("secp256k1"),
        Err(CryptoError::UnsupportedCurve { .. })
    ));
    assert_eq!(EcCurve::from_name("secp521r1").unwrap(), EcCurve::P521);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_random_bytes_never_import_as_a_private_key(
        bytes in prop::collection::vec(any::<u8>(), 115),
    ) {
        // A random 51-byte tail is vanishingly unlikely to be valid DER
        let result = CompositeMlKem::import_private_key(&MLKEM768_ECDH_P256_SHA3_256, &bytes);
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_random_points_are_rejected(
        x in prop::collection::vec(any::<u8>(), 32),
        y in prop::collection::vec(any::<u8>(), 32),
    ) {
        let key = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256).unwrap();
        let mut ek = key.export_encapsulation_key().unwrap();
        let offset = MlKemVariant::MlKem768.encapsulation_key_size() + 1;
        ek[offset..offset + 32].copy_from_slice(&x);
        ek[offset + 32..].copy_from_slice(&y);

        let result = CompositeMlKem::import_encapsulation_key(&MLKEM768_ECDH_P256_SHA3_256, &ek);
        let rejected = matches!(result, Err(CryptoError::InvalidCurvePoint { .. }));
        prop_assert!(rejected);
    }
}
