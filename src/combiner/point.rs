use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::registry::EcCurve;

/// SEC1 tag byte of an uncompressed point
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Affine coordinates of a curve point, each left-padded to the curve's
/// coordinate size
///
/// An `EcPoint` is only a pair of byte strings; whether it lies on a curve is
/// decided by the ECDH backend, never here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcPoint {
    x: Vec<u8>,
    y: Vec<u8>,
}

impl EcPoint {
    pub fn new(x: Vec<u8>, y: Vec<u8>) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// Parse `0x04 || X || Y` for `curve`
    ///
    /// Rejects a wrong length or a tag other than [`UNCOMPRESSED_POINT_TAG`]
    /// with `InvalidEncoding`.
    pub fn from_uncompressed(curve: EcCurve, bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() != curve.public_key_size() {
            return Err(CryptoError::invalid_length(
                &format!("{} uncompressed point", curve),
                curve.public_key_size(),
                bytes.len(),
                error_codes::INVALID_POINT_FORMAT,
            ));
        }

        let (tag, coordinates) = bytes.split_at(1);
        if tag[0] != UNCOMPRESSED_POINT_TAG {
            return Err(CryptoError::invalid_encoding(
                &format!("{} point format tag", curve),
                "0x04",
                &format!("0x{:02x}", tag[0]),
                error_codes::INVALID_POINT_FORMAT,
            ));
        }

        let (x, y) = coordinates.split_at(curve.coordinate_size());
        Ok(Self::new(x.to_vec(), y.to_vec()))
    }

    /// Append `0x04 || X || Y` to `out`
    pub fn write_uncompressed(&self, out: &mut Vec<u8>) {
        out.reserve(1 + self.x.len() + self.y.len());
        out.push(UNCOMPRESSED_POINT_TAG);
        out.extend_from_slice(&self.x);
        out.extend_from_slice(&self.y);
    }

    /// Encode as `0x04 || X || Y`
    pub fn to_uncompressed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.x.len() + self.y.len());
        self.write_uncompressed(&mut out);
        out
    }
}
