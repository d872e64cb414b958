#![no_main]

use aer_decoder::record::decode_chunk;
use aer_wire::chunk::RawChunk;
use aer_wire::Fourcc;
use libfuzzer_sys::fuzz_target;

// Fuzz target: single-chunk TLV decode.
//
// Feeds arbitrary bytes as one chunk's data through the full decode,
// exercising the tag table and every value rule. Decoding must never
// panic; damage surfaces as warnings on the record.
fuzz_target!(|data: &[u8]| {
    let chunk = RawChunk {
        index: 0,
        type_code: Fourcc::new(*b"BOX3"),
        numeric_id: 0,
        data,
    };
    let _ = decode_chunk(&chunk);
});
