//! Secure Memory Handling Utilities
//!
//! Containers for sensitive material (private seeds, raw ECDH secrets,
//! combined shared secrets) that are zeroed when they go out of scope.
//!
//! Every secret produced by this crate leaves it inside one of these
//! containers, so early returns and `?` propagation never leave key material
//! behind in freed memory.

use std::fmt;
use std::ops::{Deref, DerefMut};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure container for sensitive data that will be automatically
/// zeroed when dropped, preventing the data from remaining in memory.
///
/// # Type Parameters
///
/// * `T` - The type of data to store, which must implement Zeroize
///
/// # Example
///
/// ```
/// use composite_mlkem::secure_memory::SecureBuffer;
///
/// let seed = SecureBuffer::new([7u8; 64]);
/// assert_eq!(seed[0], 7);
/// // When 'seed' goes out of scope, it will be automatically zeroed
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureBuffer<T: Zeroize> {
    inner: T,
}

impl<T: Zeroize> SecureBuffer<T> {
    /// Create a new secure buffer containing the given data
    pub fn new(data: T) -> Self {
        Self { inner: data }
    }
}

impl<T: Zeroize> Deref for SecureBuffer<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Zeroize> DerefMut for SecureBuffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T: Zeroize> fmt::Debug for SecureBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureBuffer([REDACTED])")
    }
}

/// A specialized container for sensitive byte strings.
///
/// SecureBytes is what the composite key hands back for private key exports
/// and shared secrets. It automatically zeroes the memory when dropped,
/// never prints its contents through `Debug`, and compares in constant time.
///
/// # Example
///
/// ```
/// use composite_mlkem::secure_memory::SecureBytes;
///
/// let key = SecureBytes::new(&[0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(key.as_bytes(), &[0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(format!("{:?}", key), "SecureBytes([REDACTED; 4])");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureBytes {
    bytes: Vec<u8>,
}

impl SecureBytes {
    /// Create a new SecureBytes holding a copy of the given data
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
        }
    }

    /// Create a new SecureBytes with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Get a reference to the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get a mutable reference to the underlying bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Consume the container and return the contained bytes
    ///
    /// # Security Considerations
    ///
    /// After calling this method, it becomes the caller's responsibility
    /// to properly handle and zeroize the sensitive data.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }

    /// Append data to the end of the buffer
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        if self.bytes.len() + data.len() > self.bytes.capacity() {
            // Grow into a fresh allocation so the old one can be wiped first.
            let mut grown = Vec::with_capacity(self.bytes.len() + data.len());
            grown.extend_from_slice(&self.bytes);
            self.bytes.zeroize();
            self.bytes = grown;
        }
        self.bytes.extend_from_slice(data);
    }

    /// Clear the buffer, securely zeroing all data
    pub fn clear(&mut self) {
        self.bytes.zeroize();
        self.bytes.clear();
    }

    /// Get the current length of the buffer in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl From<&[u8]> for SecureBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for SecureBytes {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for SecureBytes {}

impl fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBytes([REDACTED; {}])", self.bytes.len())
    }
}

/// Securely zero memory after a function has completed
///
/// The data is zeroized after the closure returns, on early return, and
/// while unwinding from a panic.
///
/// # Example
///
/// ```
/// use composite_mlkem::secure_memory::with_secure_scope;
///
/// let mut scalar = vec![0x5au8; 32];
/// let first = with_secure_scope(&mut scalar, |s| s[0]);
/// assert_eq!(first, 0x5a);
/// assert!(scalar.is_empty());
/// ```
pub fn with_secure_scope<T, F, R>(data: &mut T, f: F) -> R
where
    T: Zeroize,
    F: FnOnce(&mut T) -> R,
{
    struct ScopeGuard<'a, T: Zeroize> {
        data: &'a mut T,
    }

    impl<'a, T: Zeroize> Drop for ScopeGuard<'a, T> {
        fn drop(&mut self) {
            self.data.zeroize();
        }
    }

    let guard = ScopeGuard { data };
    f(guard.data)
}
