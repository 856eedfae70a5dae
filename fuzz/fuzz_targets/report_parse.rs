//! Fuzz target for the clearance-rate report parser.
//!
//! This fuzzer feeds arbitrary byte sequences to the record assembler,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ucr_clearance::report::ReportParser;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    for record in ReportParser::new(data, 2013, "<fuzz>") {
        if record.is_err() {
            break;
        }
    }
});
