#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: chunk boundary scanner.
//
// Walks the scanner over arbitrary payload bytes. Catches bugs in:
// - Boundary pattern matching at buffer start and after newlines
// - Numeric id parsing (including overflow candidates)
// - Data extent and whitespace trimming
fuzz_target!(|data: &[u8]| {
    if let Ok(scanner) = aer_wire::chunk::ChunkScanner::new(data) {
        for chunk in scanner {
            // Type codes are well-formed by construction of the scan.
            assert!(chunk
                .type_code
                .as_bytes()
                .iter()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }
});
