use sha3::{Digest, Sha3_256};
use zeroize::Zeroize;

use super::point::{EcPoint, UNCOMPRESSED_POINT_TAG};
use crate::secure_memory::SecureBytes;

/// Combine the two component secrets into the composite shared secret
///
/// Computes
///
/// ```text
/// SHA3-256(mlkem_secret || trad_secret || 04||Px||Py || 04||Qx||Qy || label)
/// ```
///
/// where `P` is the ephemeral point carried in the ciphertext and `Q` is the
/// recipient's static public point. The output is always 32 bytes.
///
/// # Example
///
/// ```
/// use composite_mlkem::combiner::{combine, EcPoint};
///
/// let p = EcPoint::new(vec![1; 32], vec![2; 32]);
/// let q = EcPoint::new(vec![3; 32], vec![4; 32]);
/// let a = combine(&[0xaa; 32], &[0xbb; 32], &p, &q, b"MLKEM768-P256");
/// let b = combine(&[0xaa; 32], &[0xbb; 32], &p, &q, b"MLKEM768-P256");
/// assert_eq!(a.len(), 32);
/// assert_eq!(a, b);
/// ```
pub fn combine(
    mlkem_secret: &[u8],
    trad_secret: &[u8],
    trad_ciphertext: &EcPoint,
    trad_public_key: &EcPoint,
    label: &[u8],
) -> SecureBytes {
    let mut hasher = Sha3_256::new();
    hasher.update(mlkem_secret);
    hasher.update(trad_secret);
    update_point(&mut hasher, trad_ciphertext);
    update_point(&mut hasher, trad_public_key);
    hasher.update(label);

    let mut digest = hasher.finalize();
    let secret = SecureBytes::new(&digest);
    digest.as_mut_slice().zeroize();
    secret
}

fn update_point(hasher: &mut Sha3_256, point: &EcPoint) {
    hasher.update([UNCOMPRESSED_POINT_TAG]);
    hasher.update(point.x());
    hasher.update(point.y());
}
