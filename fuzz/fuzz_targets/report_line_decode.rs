//! Fuzz target for single-line record field decoding.
//!
//! The first byte picks the record slot; the rest is decoded as that
//! slot's line.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ucr_clearance::report::decode::fuzz_decode_line;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Some((&slot, rest)) = data.split_first() else {
        return;
    };
    let Ok(line) = std::str::from_utf8(rest) else {
        return;
    };

    let _ = fuzz_decode_line(slot as usize, line);
});
