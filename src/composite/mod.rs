//! Composite ML-KEM + ECDH key
//!
//! Key generation, import/export in the composite byte layout, and
//! encapsulation/decapsulation through the combiner. Buffers always carry the
//! ML-KEM part first and the EC part second.

mod key;

pub use key::CompositeMlKem;
