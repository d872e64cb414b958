#![no_main]

use aer_decoder::Container;
use libfuzzer_sys::fuzz_target;

// Fuzz target: container front door.
//
// Feeds arbitrary bytes as an on-disk container (header line + gzip
// stream). Catches bugs in header-line handling and decompression
// error paths.
fuzz_target!(|data: &[u8]| {
    let _ = Container::from_reader("fuzz", data);
});
