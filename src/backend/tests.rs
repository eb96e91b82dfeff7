use super::*;
use crate::combiner::EcPoint;
use crate::error::{error_codes, CryptoError};
use crate::registry::{EcCurve, MlKemVariant};
use ml_kem::{KemCore, MlKem1024, MlKem768};
use zeroize::ZeroizeOnDrop;

const P256_GENERATOR_X: &str = "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
const P256_GENERATOR_Y: &str = "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

const ALL_CURVES: [EcCurve; 3] = [EcCurve::P256, EcCurve::P384, EcCurve::P521];

#[test]
fn test_ec_private_key_der_layout() {
    let ecdh = NistEcdh;
    let expected_prefix: [(EcCurve, &str); 3] = [
        (EcCurve::P256, "3031020101042"),
        (EcCurve::P384, "303e020101043"),
        (EcCurve::P521, "3050020101044"),
    ];

    for (curve, prefix) in expected_prefix {
        let key = ecdh.generate(curve).unwrap();
        let der = ecdh.export_private_key(&key).unwrap();
        assert_eq!(der.len(), curve.private_key_size(), "{}", curve);
        assert!(hex::encode(der.as_bytes()).starts_with(prefix), "{}", curve);
    }

    let key = ecdh.generate(EcCurve::P256).unwrap();
    let der = ecdh.export_private_key(&key).unwrap();
    assert_eq!(
        hex::encode(&der.as_bytes()[39..]),
        "a00a06082a8648ce3d030107",
        "named curve parameters and no public key"
    );
}

#[test]
fn test_ec_private_key_round_trip() {
    let ecdh = NistEcdh;
    for curve in ALL_CURVES {
        let key = ecdh.generate(curve).unwrap();
        let der = ecdh.export_private_key(&key).unwrap();
        let imported = ecdh.import_private_key(curve, der.as_bytes()).unwrap();

        assert_eq!(imported.curve(), curve);
        assert_eq!(ecdh.public_key(&imported), ecdh.public_key(&key));
        assert_eq!(ecdh.export_private_key(&imported).unwrap(), der);
    }
}

#[test]
fn test_ec_private_key_curve_mismatch() {
    let ecdh = NistEcdh;
    let key = ecdh.generate(EcCurve::P384).unwrap();
    let der = ecdh.export_private_key(&key).unwrap();

    match ecdh.import_private_key(EcCurve::P256, der.as_bytes()) {
        Err(CryptoError::InvalidEncoding { error_code, .. }) => {
            assert_eq!(error_code, error_codes::CURVE_MISMATCH)
        }
        other => panic!("expected InvalidEncoding, got {:?}", other),
    }
}

#[test]
fn test_ec_private_key_unknown_curve() {
    use sec1::der::asn1::ObjectIdentifier;
    use sec1::der::Encode;

    // secp256k1
    let oid = ObjectIdentifier::new("1.3.132.0.10").unwrap();
    let der = sec1::EcPrivateKey {
        private_key: &[0x11; 32],
        parameters: Some(sec1::EcParameters::NamedCurve(oid)),
        public_key: None,
    }
    .to_der()
    .unwrap();

    assert!(matches!(
        NistEcdh.import_private_key(EcCurve::P256, &der),
        Err(CryptoError::UnsupportedCurve { .. })
    ));
}

#[test]
fn test_ec_private_key_rejects_garbage() {
    let ecdh = NistEcdh;
    assert!(matches!(
        ecdh.import_private_key(EcCurve::P256, &[0u8; 51]),
        Err(CryptoError::InvalidEncoding { .. })
    ));

    let mut der = ecdh
        .export_private_key(&ecdh.generate(EcCurve::P256).unwrap())
        .unwrap()
        .into_vec();
    // Zero scalar
    der[7..39].fill(0);
    assert!(matches!(
        ecdh.import_private_key(EcCurve::P256, &der),
        Err(CryptoError::InvalidEncoding { .. })
    ));
}

#[test]
fn test_ecdh_agreement_is_symmetric() {
    let ecdh = NistEcdh;
    for curve in ALL_CURVES {
        let alice = ecdh.generate(curve).unwrap();
        let bob = ecdh.generate(curve).unwrap();

        let ab = ecdh.derive_raw_secret(&alice, &ecdh.public_key(&bob)).unwrap();
        let ba = ecdh.derive_raw_secret(&bob, &ecdh.public_key(&alice)).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.len(), curve.coordinate_size());
    }
}

#[test]
fn test_ecdh_rejects_mixed_curves() {
    let ecdh = NistEcdh;
    let p256 = ecdh.generate(EcCurve::P256).unwrap();
    let p384 = ecdh.generate(EcCurve::P384).unwrap();

    assert!(matches!(
        ecdh.derive_raw_secret(&p256, &ecdh.public_key(&p384)),
        Err(CryptoError::EcdhError { .. })
    ));
}

#[test]
fn test_point_export_import() {
    let ecdh = NistEcdh;
    for curve in ALL_CURVES {
        let public = ecdh.public_key(&ecdh.generate(curve).unwrap());
        let point = ecdh.export_point(&public);
        assert_eq!(point.x().len(), curve.coordinate_size());
        assert_eq!(point.y().len(), curve.coordinate_size());

        let imported = ecdh.import_point(curve, &point).unwrap();
        assert_eq!(imported, public);
    }
}

#[test]
fn test_on_curve_validation() {
    let ecdh = NistEcdh;
    let generator = EcPoint::new(
        hex::decode(P256_GENERATOR_X).unwrap(),
        hex::decode(P256_GENERATOR_Y).unwrap(),
    );
    assert!(ecdh.validate_on_curve(EcCurve::P256, &generator));

    let mut y = hex::decode(P256_GENERATOR_Y).unwrap();
    y[31] ^= 1;
    let off_curve = EcPoint::new(generator.x().to_vec(), y);
    assert!(!ecdh.validate_on_curve(EcCurve::P256, &off_curve));

    match ecdh.import_point(EcCurve::P256, &off_curve) {
        Err(CryptoError::InvalidCurvePoint { curve, error_code, .. }) => {
            assert_eq!(curve, "P-256");
            assert_eq!(error_code, error_codes::POINT_NOT_ON_CURVE);
        }
        other => panic!("expected InvalidCurvePoint, got {:?}", other),
    }

    // The encoding of the identity is all zeros and is never a valid key
    let zero = EcPoint::new(vec![0; 32], vec![0; 32]);
    assert!(!ecdh.validate_on_curve(EcCurve::P256, &zero));
}

#[test]
fn test_point_import_checks_coordinate_size() {
    let point = EcPoint::new(vec![1; 48], vec![2; 48]);
    match NistEcdh.import_point(EcCurve::P256, &point) {
        Err(CryptoError::InvalidEncoding { error_code, .. }) => {
            assert_eq!(error_code, error_codes::INVALID_POINT_FORMAT)
        }
        other => panic!("expected InvalidEncoding, got {:?}", other),
    }
}

fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}

#[test]
fn test_secret_key_material_is_wiped_on_drop() {
    assert_zeroize_on_drop::<<MlKem768 as KemCore>::DecapsulationKey>();
    assert_zeroize_on_drop::<<MlKem1024 as KemCore>::DecapsulationKey>();
    assert_zeroize_on_drop::<elliptic_curve::SecretKey<p256::NistP256>>();
    assert_zeroize_on_drop::<elliptic_curve::SecretKey<p384::NistP384>>();
    assert_zeroize_on_drop::<elliptic_curve::SecretKey<p521::NistP521>>();
}

#[test]
fn test_mlkem_round_trip() {
    let kem = MlKemBackend;
    for variant in [MlKemVariant::MlKem768, MlKemVariant::MlKem1024] {
        let key = kem.generate(variant).unwrap();
        assert!(key.has_private_key());
        assert_eq!(key.variant(), variant);

        let (ciphertext, secret) = kem.encapsulate(&key).unwrap();
        assert_eq!(ciphertext.len(), variant.ciphertext_size());
        assert_eq!(secret.len(), variant.shared_secret_size());

        let recovered = kem.decapsulate(&key, &ciphertext).unwrap();
        assert_eq!(recovered, secret);
    }
}

#[test]
fn test_mlkem_seed_is_deterministic() {
    let kem = MlKemBackend;
    let seed: Vec<u8> = (0u8..64).collect();

    let a = kem.import_private_seed(MlKemVariant::MlKem768, &seed).unwrap();
    let b = kem.import_private_seed(MlKemVariant::MlKem768, &seed).unwrap();

    assert_eq!(kem.export_encapsulation_key(&a), kem.export_encapsulation_key(&b));
    assert_eq!(kem.export_private_seed(&a).unwrap().as_bytes(), &seed[..]);

    let other = kem.import_private_seed(MlKemVariant::MlKem1024, &seed).unwrap();
    assert_eq!(
        kem.export_encapsulation_key(&other).len(),
        MlKemVariant::MlKem1024.encapsulation_key_size()
    );
}

#[test]
fn test_mlkem_public_only_key() {
    let kem = MlKemBackend;
    let full = kem.generate(MlKemVariant::MlKem768).unwrap();
    let ek = kem.export_encapsulation_key(&full);

    let public = kem.import_encapsulation_key(MlKemVariant::MlKem768, &ek).unwrap();
    assert!(!public.has_private_key());
    assert_eq!(kem.export_encapsulation_key(&public), ek);

    let (ciphertext, secret) = kem.encapsulate(&public).unwrap();
    assert_eq!(kem.decapsulate(&full, &ciphertext).unwrap(), secret);

    assert!(matches!(
        kem.decapsulate(&public, &ciphertext),
        Err(CryptoError::MissingPrivateKey { .. })
    ));
    assert!(matches!(
        kem.export_private_seed(&public),
        Err(CryptoError::MissingPrivateKey { .. })
    ));
}

#[test]
fn test_mlkem_length_checks() {
    let kem = MlKemBackend;
    assert_eq!(
        kem.import_private_seed(MlKemVariant::MlKem768, &[0; 63])
            .unwrap_err()
            .error_code(),
        error_codes::INVALID_KEY_LENGTH
    );
    assert_eq!(
        kem.import_encapsulation_key(MlKemVariant::MlKem1024, &[0; 1184])
            .unwrap_err()
            .error_code(),
        error_codes::INVALID_KEY_LENGTH
    );

    let key = kem.generate(MlKemVariant::MlKem768).unwrap();
    match kem.decapsulate(&key, &[0; 1087]) {
        Err(CryptoError::InvalidEncoding { error_code, .. }) => {
            assert_eq!(error_code, error_codes::INVALID_CIPHERTEXT_LENGTH)
        }
        other => panic!("expected InvalidEncoding, got {:?}", other),
    }
}

#[test]
fn test_mlkem_key_debug_is_redacted() {
    let key = MlKemBackend.generate(MlKemVariant::MlKem768).unwrap();
    let rendered = format!("{:?}", key);
    assert_eq!(rendered, "MlKemKey { variant: MlKem768, private: true }");
}
