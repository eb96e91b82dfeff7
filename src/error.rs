/*!
 * Error Handling for the Composite ML-KEM Module
 *
 * Provides the error taxonomy for composite key generation, import/export,
 * encapsulation and decapsulation, with numeric error codes, user-friendly
 * messages and suggested remediation strategies.
 */

use thiserror::Error;

/// Comprehensive error type for all composite KEM operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key not initialized: {operation}")]
    NotInitialized { operation: String, error_code: u32 },

    #[error("Private key unavailable: {operation} requires the private half of the key")]
    MissingPrivateKey { operation: String, error_code: u32 },

    #[error("Invalid encoding: {context} - expected {expected} - got {actual}")]
    InvalidEncoding {
        context: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Invalid curve point on {curve}: {cause}")]
    InvalidCurvePoint {
        curve: String,
        cause: String,
        error_code: u32,
    },

    #[error("Unknown composite algorithm: {oid}")]
    UnknownAlgorithm { oid: String, error_code: u32 },

    #[error("Unsupported elliptic curve: {curve}")]
    UnsupportedCurve { curve: String, error_code: u32 },

    #[error("ML-KEM operation failed: {operation} - {cause}")]
    LatticeKemError {
        operation: String,
        cause: String,
        error_code: u32,
    },

    #[error("ECDH operation failed: {operation} - {cause}")]
    EcdhError {
        operation: String,
        cause: String,
        error_code: u32,
    },

    #[error("Hybrid encryption failed: {operation} - {cause}")]
    EncryptionError {
        operation: String,
        cause: String,
        error_code: u32,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Random number generation failed: {cause}")]
    RandomGenerationError { cause: String, error_code: u32 },
}

/// Error code constants for different error categories
pub mod error_codes {
    // Registry errors: 1000-1999
    pub const UNKNOWN_ALGORITHM: u32 = 1001;
    pub const UNSUPPORTED_CURVE: u32 = 1002;

    // Encoding and validation errors: 2000-2999
    pub const INVALID_KEY_LENGTH: u32 = 2001;
    pub const INVALID_CIPHERTEXT_LENGTH: u32 = 2002;
    pub const INVALID_POINT_FORMAT: u32 = 2003;
    pub const INVALID_PRIVATE_KEY_ENCODING: u32 = 2004;
    pub const POINT_NOT_ON_CURVE: u32 = 2005;
    pub const CURVE_MISMATCH: u32 = 2006;

    // ML-KEM errors: 3000-3999
    pub const MLKEM_KEY_IMPORT_FAILED: u32 = 3001;
    pub const MLKEM_ENCAPSULATION_FAILED: u32 = 3002;
    pub const MLKEM_DECAPSULATION_FAILED: u32 = 3003;

    // ECDH errors: 4000-4999
    pub const ECDH_KEY_EXPORT_FAILED: u32 = 4002;

    // Hybrid encryption errors: 5000-5999
    pub const AES_ENCRYPTION_FAILED: u32 = 5001;
    pub const AES_AUTHENTICATION_FAILED: u32 = 5002;
    pub const KEY_DERIVATION_FAILED: u32 = 5003;
    pub const ALGORITHM_MISMATCH: u32 = 5004;

    // Lifecycle errors: 6000-6999
    pub const KEY_NOT_INITIALIZED: u32 = 6001;
    pub const PRIVATE_KEY_MISSING: u32 = 6002;

    // Platform errors: 7000-7999
    pub const RANDOM_GENERATION_FAILED: u32 = 7001;
}

impl CryptoError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            CryptoError::NotInitialized { error_code, .. } => *error_code,
            CryptoError::MissingPrivateKey { error_code, .. } => *error_code,
            CryptoError::InvalidEncoding { error_code, .. } => *error_code,
            CryptoError::InvalidCurvePoint { error_code, .. } => *error_code,
            CryptoError::UnknownAlgorithm { error_code, .. } => *error_code,
            CryptoError::UnsupportedCurve { error_code, .. } => *error_code,
            CryptoError::LatticeKemError { error_code, .. } => *error_code,
            CryptoError::EcdhError { error_code, .. } => *error_code,
            CryptoError::EncryptionError { error_code, .. } => *error_code,
            CryptoError::RandomGenerationError { error_code, .. } => *error_code,
            CryptoError::SerializationError(_) => 9001,
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            CryptoError::NotInitialized { operation, .. } => format!(
                "Operation '{}' was called on a key that has been disposed.",
                operation
            ),
            CryptoError::MissingPrivateKey { operation, .. } => format!(
                "Operation '{}' needs a private key, but only the public key was imported.",
                operation
            ),
            CryptoError::InvalidEncoding { context, .. } => format!(
                "The {} is malformed. The data may be truncated or corrupted.",
                context
            ),
            CryptoError::InvalidCurvePoint { curve, .. } => format!(
                "The supplied {} point is not valid. The peer key or ciphertext was rejected.",
                curve
            ),
            CryptoError::UnknownAlgorithm { oid, .. } => {
                format!("No composite algorithm is registered for OID '{}'.", oid)
            }
            CryptoError::UnsupportedCurve { curve, .. } => {
                format!("Elliptic curve '{}' is not supported.", curve)
            }
            CryptoError::LatticeKemError { operation, .. } => format!(
                "ML-KEM operation '{}' failed. Secure key exchange cannot be established.",
                operation
            ),
            CryptoError::EcdhError { operation, .. } => format!(
                "ECDH operation '{}' failed. Secure key exchange cannot be established.",
                operation
            ),
            CryptoError::EncryptionError { operation, .. } => format!(
                "Encryption operation '{}' failed. The data cannot be protected or recovered.",
                operation
            ),
            CryptoError::SerializationError(_) => {
                "Data serialization failed. Data format may be corrupted.".to_string()
            }
            CryptoError::RandomGenerationError { .. } => {
                "Random number generation failed. Cryptographic operations may be insecure."
                    .to_string()
            }
        }
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            CryptoError::NotInitialized { .. } => Some(
                "Generate or import a new composite key; disposed keys cannot be reused."
                    .to_string(),
            ),
            CryptoError::MissingPrivateKey { .. } => Some(
                "Import the composite private key instead of the encapsulation key.".to_string(),
            ),
            CryptoError::InvalidEncoding { error_code, .. } => match *error_code {
                error_codes::INVALID_POINT_FORMAT => Some(
                    "Encode elliptic-curve points in uncompressed form (leading 0x04 byte)."
                        .to_string(),
                ),
                _ => Some(
                    "Check that the buffer was produced for the same composite algorithm."
                        .to_string(),
                ),
            },
            CryptoError::InvalidCurvePoint { .. } => Some(
                "Reject the peer. Never retry with a point that failed curve validation."
                    .to_string(),
            ),
            CryptoError::UnknownAlgorithm { .. } => Some(
                "Use one of the registered composite OIDs (1.3.6.1.5.5.7.6.59, .60, .63, .66)."
                    .to_string(),
            ),
            CryptoError::UnsupportedCurve { .. } => {
                Some("Use NIST P-256, P-384 or P-521.".to_string())
            }
            CryptoError::RandomGenerationError { .. } => Some(
                "Check system entropy sources. Consider using hardware RNG if available."
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Get the error category/type as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoError::NotInitialized { .. } => "NotInitialized",
            CryptoError::MissingPrivateKey { .. } => "MissingPrivateKey",
            CryptoError::InvalidEncoding { .. } => "InvalidEncoding",
            CryptoError::InvalidCurvePoint { .. } => "InvalidCurvePoint",
            CryptoError::UnknownAlgorithm { .. } => "UnknownAlgorithm",
            CryptoError::UnsupportedCurve { .. } => "UnsupportedCurve",
            CryptoError::LatticeKemError { .. } => "LatticeKemError",
            CryptoError::EcdhError { .. } => "EcdhError",
            CryptoError::EncryptionError { .. } => "EncryptionError",
            CryptoError::SerializationError(_) => "SerializationError",
            CryptoError::RandomGenerationError { .. } => "RandomGenerationError",
        }
    }
}

/// Convenience constructors for common error types
impl CryptoError {
    pub fn not_initialized(operation: &str) -> Self {
        CryptoError::NotInitialized {
            operation: operation.to_string(),
            error_code: error_codes::KEY_NOT_INITIALIZED,
        }
    }

    pub fn missing_private_key(operation: &str) -> Self {
        CryptoError::MissingPrivateKey {
            operation: operation.to_string(),
            error_code: error_codes::PRIVATE_KEY_MISSING,
        }
    }

    pub fn invalid_encoding(context: &str, expected: &str, actual: &str, error_code: u32) -> Self {
        CryptoError::InvalidEncoding {
            context: context.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    /// Length mismatch on a fixed-size buffer
    pub fn invalid_length(context: &str, expected: usize, actual: usize, error_code: u32) -> Self {
        Self::invalid_encoding(
            context,
            &format!("{} bytes", expected),
            &format!("{} bytes", actual),
            error_code,
        )
    }

    pub fn invalid_curve_point(curve: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::InvalidCurvePoint {
            curve: curve.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }

    pub fn unknown_algorithm(oid: &str) -> Self {
        CryptoError::UnknownAlgorithm {
            oid: oid.to_string(),
            error_code: error_codes::UNKNOWN_ALGORITHM,
        }
    }

    pub fn unsupported_curve(curve: &str) -> Self {
        CryptoError::UnsupportedCurve {
            curve: curve.to_string(),
            error_code: error_codes::UNSUPPORTED_CURVE,
        }
    }

    pub fn lattice_kem_error(operation: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::LatticeKemError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }

    pub fn ecdh_error(operation: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::EcdhError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }

    pub fn encryption_error(operation: &str, cause: &str, error_code: u32) -> Self {
        CryptoError::EncryptionError {
            operation: operation.to_string(),
            cause: cause.to_string(),
            error_code,
        }
    }
}

impl From<rand::Error> for CryptoError {
    fn from(err: rand::Error) -> Self {
        CryptoError::RandomGenerationError {
            cause: err.to_string(),
            error_code: error_codes::RANDOM_GENERATION_FAILED,
        }
    }
}

/// Result type alias for cryptographic operations
pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_generation() {
        let error = CryptoError::unknown_algorithm("1.2.3.4");
        assert_eq!(error.error_code(), error_codes::UNKNOWN_ALGORITHM);
        assert_eq!(error.error_type(), "UnknownAlgorithm");
    }

    #[test]
    fn test_invalid_length_keeps_the_given_code() {
        let error = CryptoError::invalid_length(
            "composite ciphertext",
            1153,
            12,
            error_codes::INVALID_CIPHERTEXT_LENGTH,
        );
        assert_eq!(error.error_code(), error_codes::INVALID_CIPHERTEXT_LENGTH);
        assert!(error.to_string().contains("1153 bytes"));

        // The context text has no say in the code
        let error = CryptoError::invalid_length(
            "ML-KEM ciphertext",
            1088,
            12,
            error_codes::INVALID_KEY_LENGTH,
        );
        assert_eq!(error.error_code(), error_codes::INVALID_KEY_LENGTH);
    }

    #[test]
    fn test_user_friendly_message() {
        let error = CryptoError::not_initialized("encapsulate");
        let message = error.user_friendly_message();
        assert!(message.contains("disposed"));
        assert!(message.contains("encapsulate"));
    }

    #[test]
    fn test_remediation_suggestions() {
        let error = CryptoError::invalid_encoding(
            "EC point",
            "0x04",
            "0x02",
            error_codes::INVALID_POINT_FORMAT,
        );
        let suggestion = error.suggested_remediation();
        assert!(suggestion.is_some());
        assert!(suggestion.unwrap().contains("uncompressed"));

        let error = CryptoError::SerializationError("truncated".to_string());
        assert!(error.suggested_remediation().is_none());
    }
}
