#![no_main]

use arbitrary::Arbitrary;
use composite_mlkem::{CompositeMlKem, CompositeMlKemAlgorithm};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct ImportFuzzInput {
    algorithm: u8,
    private_key: Vec<u8>,
    encapsulation_key: Vec<u8>,
}

fuzz_target!(|input: ImportFuzzInput| {
    let algorithms: Vec<_> = CompositeMlKemAlgorithm::all().collect();
    let algorithm = algorithms[input.algorithm as usize % algorithms.len()];

    if let Ok(key) = CompositeMlKem::import_private_key(algorithm, &input.private_key) {
        // Anything accepted must export back to the same bytes
        let exported = key.export_private_key().expect("export of an imported key");
        assert_eq!(exported.as_bytes(), &input.private_key[..]);
    }

    if let Ok(key) = CompositeMlKem::import_encapsulation_key(algorithm, &input.encapsulation_key) {
        let exported = key.export_encapsulation_key().expect("export of an imported key");
        assert_eq!(exported, input.encapsulation_key);
        let _ = key.encapsulate();
    }
});
