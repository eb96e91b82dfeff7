// Test vectors for interoperability testing
// Deterministic composite private keys, built from a seeded RNG so every run
// (and every other implementation) sees the same bytes

pub mod composite;
