#![no_main]

use composite_mlkem::hybrid_encryption::{decrypt_hybrid, HybridCipherData};
use composite_mlkem::registry::MLKEM768_ECDH_P256_SHA3_256;
use composite_mlkem::CompositeMlKem;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let block = match HybridCipherData::from_bytes(data) {
        Ok(block) => block,
        Err(_) => return,
    };

    if let Ok(key) = CompositeMlKem::generate_key(&MLKEM768_ECDH_P256_SHA3_256) {
        // A forged block must never authenticate
        assert!(decrypt_hybrid(&key, &block, &[]).is_err());
    }
});
