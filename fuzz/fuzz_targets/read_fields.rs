#![no_main]

use aer_wire::field::{read_field, FieldStep};
use libfuzzer_sys::fuzz_target;

// Fuzz target: TLV field walk.
//
// Reads fields off arbitrary bytes until a terminal step. Catches bugs
// in header parsing, the 0xFFFF rest-of-chunk sentinel, and offset
// arithmetic (the walk must always make progress).
fuzz_target!(|data: &[u8]| {
    let mut offset = 0;
    loop {
        match read_field(data, offset) {
            FieldStep::Field { next_offset, .. } => {
                assert!(next_offset > offset && next_offset <= data.len());
                offset = next_offset;
            }
            FieldStep::Truncated { .. } | FieldStep::Overrun { .. } | FieldStep::Done => break,
        }
    }
});
