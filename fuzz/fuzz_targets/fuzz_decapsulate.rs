#![no_main]

use arbitrary::Arbitrary;
use composite_mlkem::{CompositeMlKem, CompositeMlKemAlgorithm};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct DecapsulateFuzzInput {
    algorithm: u8,
    ciphertext: Vec<u8>,
    // Patch applied to a valid ciphertext: (offset, xor mask)
    patches: Vec<(u16, u8)>,
}

fuzz_target!(|input: DecapsulateFuzzInput| {
    let algorithms: Vec<_> = CompositeMlKemAlgorithm::all().collect();
    let algorithm = algorithms[input.algorithm as usize % algorithms.len()];

    let key = match CompositeMlKem::generate_key(algorithm) {
        Ok(key) => key,
        Err(_) => return,
    };

    // Arbitrary bytes must fail cleanly or yield a 32-byte secret
    if let Ok(secret) = key.decapsulate(&input.ciphertext) {
        assert_eq!(secret.len(), 32);
    }

    // Corrupted valid ciphertexts never panic
    if let Ok((mut ciphertext, _)) = key.encapsulate() {
        let len = ciphertext.len();
        for (offset, mask) in input.patches {
            ciphertext[offset as usize % len] ^= mask;
        }
        let _ = key.decapsulate(&ciphertext);
    }
});
