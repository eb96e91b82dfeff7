// Composite ML-KEM test vectors
// Private keys are `seed || SEC1 ECPrivateKey DER`; the DER is written out by
// hand here so the layout is checked independently of the crate

use composite_mlkem::registry::{CompositeMlKemAlgorithm, EcCurve};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A deterministic composite private key
#[derive(Debug, Clone)]
pub struct CompositeKeyVector {
    pub algorithm: &'static CompositeMlKemAlgorithm,
    pub seed: [u8; 64],
    pub scalar: Vec<u8>,
    pub private_key: Vec<u8>,
}

/// Named-curve parameters `[0] { OID }` for each curve
fn curve_parameters(curve: EcCurve) -> &'static [u8] {
    match curve {
        EcCurve::P256 => &[
            0xa0, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07,
        ],
        EcCurve::P384 => &[0xa0, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x22],
        EcCurve::P521 => &[0xa0, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x23],
    }
}

/// SEC1 `ECPrivateKey` with version 1, the scalar and the curve, no public key
pub fn ec_private_key_der(curve: EcCurve, scalar: &[u8]) -> Vec<u8> {
    assert_eq!(scalar.len(), curve.coordinate_size());
    let parameters = curve_parameters(curve);

    let body_len = 3 + 2 + scalar.len() + parameters.len();
    let mut der = vec![0x30, body_len as u8, 0x02, 0x01, 0x01, 0x04, scalar.len() as u8];
    der.extend_from_slice(scalar);
    der.extend_from_slice(parameters);
    der
}

/// Big-endian scalar 1, left-padded to the coordinate size
pub fn scalar_one(curve: EcCurve) -> Vec<u8> {
    let mut scalar = vec![0u8; curve.coordinate_size()];
    scalar[curve.coordinate_size() - 1] = 1;
    scalar
}

/// Build a vector from a 32-byte RNG seed
///
/// The leading scalar byte is cleared so the scalar stays below the group
/// order, and a bit is forced in the next one so it is never zero.
pub fn generate_test_vector(
    algorithm: &'static CompositeMlKemAlgorithm,
    rng_seed: [u8; 32],
) -> CompositeKeyVector {
    let mut rng = ChaCha20Rng::from_seed(rng_seed);

    let mut seed = [0u8; 64];
    rng.fill_bytes(&mut seed);

    let mut scalar = vec![0u8; algorithm.curve().coordinate_size()];
    rng.fill_bytes(&mut scalar);
    scalar[0] = 0;
    scalar[1] |= 0x01;

    with_scalar(algorithm, seed, scalar)
}

/// A vector whose EC private scalar is 1, so its public point is the generator
pub fn generator_test_vector(algorithm: &'static CompositeMlKemAlgorithm) -> CompositeKeyVector {
    let mut seed = [0u8; 64];
    for (i, byte) in seed.iter_mut().enumerate() {
        *byte = i as u8;
    }
    with_scalar(algorithm, seed, scalar_one(algorithm.curve()))
}

fn with_scalar(
    algorithm: &'static CompositeMlKemAlgorithm,
    seed: [u8; 64],
    scalar: Vec<u8>,
) -> CompositeKeyVector {
    let mut private_key = seed.to_vec();
    private_key.extend_from_slice(&ec_private_key_der(algorithm.curve(), &scalar));

    CompositeKeyVector {
        algorithm,
        seed,
        scalar,
        private_key,
    }
}

/// Standard vectors: one key per algorithm
pub fn standard_test_vectors() -> Vec<CompositeKeyVector> {
    CompositeMlKemAlgorithm::all()
        .enumerate()
        .map(|(i, algorithm)| generate_test_vector(algorithm, [i as u8 + 1; 32]))
        .collect()
}
