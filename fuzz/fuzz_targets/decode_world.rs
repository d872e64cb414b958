#![no_main]

use aer_decoder::{Container, WorldDecoder};
use libfuzzer_sys::fuzz_target;

// Fuzz target: whole-payload pipeline.
//
// Treats arbitrary bytes as an already-decompressed payload. Catches
// bugs in the scanner/decoder interplay and in URL aggregation.
fuzz_target!(|data: &[u8]| {
    let container = Container::from_parts("fuzz", "", data.to_vec());
    let _ = WorldDecoder::decode(&container);
});
