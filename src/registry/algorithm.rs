use std::fmt;

use crate::error::{CryptoError, CryptoResult};

/// NIST curves usable as the classical half of a composite key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256 (secp256r1)
    P256,
    /// NIST P-384 (secp384r1)
    P384,
    /// NIST P-521 (secp521r1)
    P521,
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl EcCurve {
    /// Resolve a named-curve object identifier (dotted form)
    ///
    /// Fails with `UnsupportedCurve` for anything other than the three
    /// NIST curves.
    pub fn from_oid(oid: &str) -> CryptoResult<Self> {
        match oid {
            "1.2.840.10045.3.1.7" => Ok(EcCurve::P256),
            "1.3.132.0.34" => Ok(EcCurve::P384),
            "1.3.132.0.35" => Ok(EcCurve::P521),
            other => Err(CryptoError::unsupported_curve(other)),
        }
    }

    /// Resolve a curve by one of its common names
    pub fn from_name(name: &str) -> CryptoResult<Self> {
        match name {
            "P-256" | "nistP256" | "secp256r1" | "prime256v1" => Ok(EcCurve::P256),
            "P-384" | "nistP384" | "secp384r1" => Ok(EcCurve::P384),
            "P-521" | "nistP521" | "secp521r1" => Ok(EcCurve::P521),
            other => Err(CryptoError::unsupported_curve(other)),
        }
    }

    /// Named-curve object identifier
    pub fn oid(&self) -> &'static str {
        match self {
            EcCurve::P256 => "1.2.840.10045.3.1.7",
            EcCurve::P384 => "1.3.132.0.34",
            EcCurve::P521 => "1.3.132.0.35",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Size of one affine coordinate (and of the private scalar) in bytes
    pub const fn coordinate_size(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    /// Size of an uncompressed point: `0x04 || X || Y`
    pub const fn public_key_size(&self) -> usize {
        2 * self.coordinate_size() + 1
    }

    /// Size of the SEC1 `ECPrivateKey` DER encoding (scalar and named curve,
    /// no embedded public key)
    pub const fn private_key_size(&self) -> usize {
        match self {
            EcCurve::P256 => 51,
            EcCurve::P384 => 64,
            EcCurve::P521 => 82,
        }
    }
}

/// ML-KEM parameter sets (FIPS 203) used by the composite algorithms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MlKemVariant {
    /// ML-KEM-768 (NIST security category 3)
    MlKem768,
    /// ML-KEM-1024 (NIST security category 5)
    MlKem1024,
}

impl fmt::Display for MlKemVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlKemVariant::MlKem768 => write!(f, "ML-KEM-768"),
            MlKemVariant::MlKem1024 => write!(f, "ML-KEM-1024"),
        }
    }
}

impl MlKemVariant {
    /// Size of the private seed `d || z` in bytes (same for all variants)
    pub const fn private_seed_size(&self) -> usize {
        64
    }

    /// Get the encapsulation key size for this variant in bytes
    pub const fn encapsulation_key_size(&self) -> usize {
        match self {
            MlKemVariant::MlKem768 => 1184,
            MlKemVariant::MlKem1024 => 1568,
        }
    }

    /// Get the ciphertext size for this variant in bytes
    pub const fn ciphertext_size(&self) -> usize {
        match self {
            MlKemVariant::MlKem768 => 1088,
            MlKemVariant::MlKem1024 => 1568,
        }
    }

    /// Get the shared secret size in bytes (same for all variants)
    pub const fn shared_secret_size(&self) -> usize {
        32
    }
}

/// A composite ML-KEM + ECDH parameter set
///
/// Instances only exist as the `'static` entries of the registry; they are
/// compared and passed around by reference.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CompositeMlKemAlgorithm {
    name: &'static str,
    label: &'static str,
    oid: &'static str,
    ml_kem: MlKemVariant,
    curve: EcCurve,
}

/// Size of the combined shared secret (SHA3-256 output)
pub const COMPOSITE_SHARED_SECRET_SIZE: usize = 32;

pub static MLKEM768_ECDH_P256_SHA3_256: CompositeMlKemAlgorithm = CompositeMlKemAlgorithm {
    name: "MLKEM768-ECDH-P256-SHA3-256",
    label: "MLKEM768-P256",
    oid: "1.3.6.1.5.5.7.6.59",
    ml_kem: MlKemVariant::MlKem768,
    curve: EcCurve::P256,
};

pub static MLKEM768_ECDH_P384_SHA3_256: CompositeMlKemAlgorithm = CompositeMlKemAlgorithm {
    name: "MLKEM768-ECDH-P384-SHA3-256",
    label: "MLKEM768-P384",
    oid: "1.3.6.1.5.5.7.6.60",
    ml_kem: MlKemVariant::MlKem768,
    curve: EcCurve::P384,
};

pub static MLKEM1024_ECDH_P384_SHA3_256: CompositeMlKemAlgorithm = CompositeMlKemAlgorithm {
    name: "MLKEM1024-ECDH-P384-SHA3-256",
    label: "MLKEM1024-P384",
    oid: "1.3.6.1.5.5.7.6.63",
    ml_kem: MlKemVariant::MlKem1024,
    curve: EcCurve::P384,
};

pub static MLKEM1024_ECDH_P521_SHA3_256: CompositeMlKemAlgorithm = CompositeMlKemAlgorithm {
    name: "MLKEM1024-ECDH-P521-SHA3-256",
    label: "MLKEM1024-P521",
    oid: "1.3.6.1.5.5.7.6.66",
    ml_kem: MlKemVariant::MlKem1024,
    curve: EcCurve::P521,
};

static ALGORITHMS: [&CompositeMlKemAlgorithm; 4] = [
    &MLKEM768_ECDH_P256_SHA3_256,
    &MLKEM768_ECDH_P384_SHA3_256,
    &MLKEM1024_ECDH_P384_SHA3_256,
    &MLKEM1024_ECDH_P521_SHA3_256,
];

impl fmt::Display for CompositeMlKemAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl CompositeMlKemAlgorithm {
    /// Find the parameter set registered for `oid`
    ///
    /// A miss is not an error here; callers that need one use [`require`].
    ///
    /// [`require`]: CompositeMlKemAlgorithm::require
    pub fn lookup(oid: &str) -> Option<&'static CompositeMlKemAlgorithm> {
        ALGORITHMS.iter().copied().find(|alg| alg.oid == oid)
    }

    /// Like [`lookup`](CompositeMlKemAlgorithm::lookup), failing with
    /// `UnknownAlgorithm` on a miss
    pub fn require(oid: &str) -> CryptoResult<&'static CompositeMlKemAlgorithm> {
        Self::lookup(oid).ok_or_else(|| CryptoError::unknown_algorithm(oid))
    }

    /// Find a parameter set by its full name, e.g. `MLKEM768-ECDH-P256-SHA3-256`
    pub fn from_name(name: &str) -> Option<&'static CompositeMlKemAlgorithm> {
        ALGORITHMS.iter().copied().find(|alg| alg.name == name)
    }

    /// All registered parameter sets, in OID order
    pub fn all() -> impl Iterator<Item = &'static CompositeMlKemAlgorithm> {
        ALGORITHMS.iter().copied()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn oid(&self) -> &'static str {
        self.oid
    }

    /// Domain-separation label fed last into the combiner
    pub fn label(&self) -> &'static [u8] {
        self.label.as_bytes()
    }

    pub fn ml_kem(&self) -> MlKemVariant {
        self.ml_kem
    }

    pub fn curve(&self) -> EcCurve {
        self.curve
    }

    /// Composite private key size: ML-KEM seed followed by the EC private key
    pub fn private_key_size(&self) -> usize {
        self.ml_kem.private_seed_size() + self.curve.private_key_size()
    }

    /// Composite encapsulation key size: ML-KEM key followed by the EC point
    pub fn encapsulation_key_size(&self) -> usize {
        self.ml_kem.encapsulation_key_size() + self.curve.public_key_size()
    }

    /// Composite ciphertext size: ML-KEM ciphertext followed by the ephemeral EC point
    pub fn ciphertext_size(&self) -> usize {
        self.ml_kem.ciphertext_size() + self.curve.public_key_size()
    }

    pub fn shared_secret_size(&self) -> usize {
        COMPOSITE_SHARED_SECRET_SIZE
    }
}
