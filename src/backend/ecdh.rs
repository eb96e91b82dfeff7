//! ECDH backend over the RustCrypto NIST curves

use elliptic_curve::ecdh::diffie_hellman;
use elliptic_curve::sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint};
use elliptic_curve::{AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, PublicKey, SecretKey};
use p256::NistP256;
use p384::NistP384;
use p521::NistP521;
use rand::rngs::OsRng;
use sec1::der::asn1::ObjectIdentifier;
use sec1::der::Encode;
use sec1::{EcParameters, EcPrivateKey};

use super::traits::EllipticDiffieHellman;
use crate::combiner::EcPoint;
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::registry::EcCurve;
use crate::secure_memory::{with_secure_scope, SecureBytes};

/// Default [`EllipticDiffieHellman`] implementation (P-256, P-384, P-521)
#[derive(Clone, Copy, Debug, Default)]
pub struct NistEcdh;

/// Private key on one of the supported curves
#[derive(Clone, Debug)]
pub enum NistPrivateKey {
    P256(SecretKey<NistP256>),
    P384(SecretKey<NistP384>),
    P521(SecretKey<NistP521>),
}

/// Public key on one of the supported curves
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NistPublicKey {
    P256(PublicKey<NistP256>),
    P384(PublicKey<NistP384>),
    P521(PublicKey<NistP521>),
}

macro_rules! map_curve {
    ($value:expr, $from:ident => $to:ident, $key:ident => $body:expr) => {
        match $value {
            $from::P256($key) => $to::P256($body),
            $from::P384($key) => $to::P384($body),
            $from::P521($key) => $to::P521($body),
        }
    };
}

macro_rules! with_curve {
    ($value:expr, $from:ident, $key:ident => $body:expr) => {
        match $value {
            $from::P256($key) => $body,
            $from::P384($key) => $body,
            $from::P521($key) => $body,
        }
    };
}

impl NistPrivateKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            NistPrivateKey::P256(_) => EcCurve::P256,
            NistPrivateKey::P384(_) => EcCurve::P384,
            NistPrivateKey::P521(_) => EcCurve::P521,
        }
    }
}

impl NistPublicKey {
    pub fn curve(&self) -> EcCurve {
        match self {
            NistPublicKey::P256(_) => EcCurve::P256,
            NistPublicKey::P384(_) => EcCurve::P384,
            NistPublicKey::P521(_) => EcCurve::P521,
        }
    }
}

fn agree<C: CurveArithmetic>(secret: &SecretKey<C>, peer: &PublicKey<C>) -> SecureBytes {
    let shared = diffie_hellman(secret.to_nonzero_scalar(), peer.as_affine());
    SecureBytes::new(shared.raw_secret_bytes())
}

fn coordinates_of<C>(public: &PublicKey<C>) -> EcPoint
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    // Public keys are never the identity, so both coordinates are present.
    let encoded = public.to_encoded_point(false);
    let x = encoded.x().map(|x| x.to_vec()).unwrap_or_default();
    let y = encoded.y().map(|y| y.to_vec()).unwrap_or_default();
    EcPoint::new(x, y)
}

fn public_from_coordinates<C>(curve: EcCurve, point: &EcPoint) -> CryptoResult<PublicKey<C>>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = EncodedPoint::<C>::from_affine_coordinates(
        FieldBytes::<C>::from_slice(point.x()),
        FieldBytes::<C>::from_slice(point.y()),
        false,
    );

    Option::<PublicKey<C>>::from(PublicKey::<C>::from_encoded_point(&encoded)).ok_or_else(|| {
        CryptoError::invalid_curve_point(
            curve.name(),
            "point does not satisfy the curve equation",
            error_codes::POINT_NOT_ON_CURVE,
        )
    })
}

fn private_key_der<C: CurveArithmetic>(
    secret: &SecretKey<C>,
    curve: EcCurve,
) -> CryptoResult<SecureBytes> {
    let oid = ObjectIdentifier::new(curve.oid()).map_err(|e| {
        CryptoError::ecdh_error(
            "export_private_key",
            &e.to_string(),
            error_codes::ECDH_KEY_EXPORT_FAILED,
        )
    })?;

    let mut scalar = secret.to_bytes();
    let document = with_secure_scope(&mut scalar, |scalar| {
        EcPrivateKey {
            private_key: &scalar[..],
            parameters: Some(EcParameters::NamedCurve(oid)),
            public_key: None,
        }
        .to_der()
    });

    document.map(SecureBytes::from).map_err(|e| {
        CryptoError::ecdh_error(
            "export_private_key",
            &e.to_string(),
            error_codes::ECDH_KEY_EXPORT_FAILED,
        )
    })
}

fn secret_from_scalar<C: CurveArithmetic>(curve: EcCurve, scalar: &[u8]) -> CryptoResult<SecretKey<C>> {
    SecretKey::<C>::from_slice(scalar).map_err(|_| {
        CryptoError::invalid_encoding(
            &format!("{} private scalar", curve),
            "integer in [1, n)",
            "out of range",
            error_codes::INVALID_PRIVATE_KEY_ENCODING,
        )
    })
}

/// Check that the DER's named-curve parameters designate `curve`
fn check_parameters(curve: EcCurve, parameters: Option<EcParameters>) -> CryptoResult<()> {
    let named = parameters.and_then(|p| p.named_curve()).ok_or_else(|| {
        CryptoError::invalid_encoding(
            &format!("{} private key parameters", curve),
            curve.oid(),
            "absent",
            error_codes::INVALID_PRIVATE_KEY_ENCODING,
        )
    })?;

    let found = EcCurve::from_oid(&named.to_string())?;
    if found != curve {
        return Err(CryptoError::invalid_encoding(
            &format!("{} private key parameters", curve),
            curve.oid(),
            found.oid(),
            error_codes::CURVE_MISMATCH,
        ));
    }
    Ok(())
}

impl EllipticDiffieHellman for NistEcdh {
    type PrivateKey = NistPrivateKey;
    type PublicKey = NistPublicKey;

    fn generate(&self, curve: EcCurve) -> CryptoResult<NistPrivateKey> {
        Ok(match curve {
            EcCurve::P256 => NistPrivateKey::P256(SecretKey::random(&mut OsRng)),
            EcCurve::P384 => NistPrivateKey::P384(SecretKey::random(&mut OsRng)),
            EcCurve::P521 => NistPrivateKey::P521(SecretKey::random(&mut OsRng)),
        })
    }

    fn public_key(&self, key: &NistPrivateKey) -> NistPublicKey {
        map_curve!(key, NistPrivateKey => NistPublicKey, secret => secret.public_key())
    }

    fn import_private_key(&self, curve: EcCurve, encoded: &[u8]) -> CryptoResult<NistPrivateKey> {
        let document = EcPrivateKey::try_from(encoded).map_err(|e| {
            CryptoError::invalid_encoding(
                &format!("{} private key", curve),
                "SEC1 ECPrivateKey DER",
                &e.to_string(),
                error_codes::INVALID_PRIVATE_KEY_ENCODING,
            )
        })?;

        check_parameters(curve, document.parameters)?;

        if document.private_key.len() != curve.coordinate_size() {
            return Err(CryptoError::invalid_length(
                &format!("{} private scalar", curve),
                curve.coordinate_size(),
                document.private_key.len(),
                error_codes::INVALID_PRIVATE_KEY_ENCODING,
            ));
        }

        Ok(match curve {
            EcCurve::P256 => NistPrivateKey::P256(secret_from_scalar(curve, document.private_key)?),
            EcCurve::P384 => NistPrivateKey::P384(secret_from_scalar(curve, document.private_key)?),
            EcCurve::P521 => NistPrivateKey::P521(secret_from_scalar(curve, document.private_key)?),
        })
    }

    fn export_private_key(&self, key: &NistPrivateKey) -> CryptoResult<SecureBytes> {
        let curve = key.curve();
        with_curve!(key, NistPrivateKey, secret => private_key_der(secret, curve))
    }

    fn derive_raw_secret(
        &self,
        key: &NistPrivateKey,
        peer: &NistPublicKey,
    ) -> CryptoResult<SecureBytes> {
        match (key, peer) {
            (NistPrivateKey::P256(secret), NistPublicKey::P256(public)) => Ok(agree(secret, public)),
            (NistPrivateKey::P384(secret), NistPublicKey::P384(public)) => Ok(agree(secret, public)),
            (NistPrivateKey::P521(secret), NistPublicKey::P521(public)) => Ok(agree(secret, public)),
            _ => Err(CryptoError::ecdh_error(
                "derive_raw_secret",
                &format!("private key on {} but peer on {}", key.curve(), peer.curve()),
                error_codes::CURVE_MISMATCH,
            )),
        }
    }

    fn export_point(&self, key: &NistPublicKey) -> EcPoint {
        with_curve!(key, NistPublicKey, public => coordinates_of(public))
    }

    fn import_point(&self, curve: EcCurve, point: &EcPoint) -> CryptoResult<NistPublicKey> {
        let size = curve.coordinate_size();
        if point.x().len() != size || point.y().len() != size {
            return Err(CryptoError::invalid_length(
                &format!("{} point coordinates", curve),
                2 * size,
                point.x().len() + point.y().len(),
                error_codes::INVALID_POINT_FORMAT,
            ));
        }

        Ok(match curve {
            EcCurve::P256 => NistPublicKey::P256(public_from_coordinates(curve, point)?),
            EcCurve::P384 => NistPublicKey::P384(public_from_coordinates(curve, point)?),
            EcCurve::P521 => NistPublicKey::P521(public_from_coordinates(curve, point)?),
        })
    }
}
