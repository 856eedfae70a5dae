//! Fuzz target for agency crosswalk CSV parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the crosswalk reader,
//! checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ucr_clearance::model::io_crosswalk_csv::from_crosswalk_csv_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_crosswalk_csv_slice(data);
});
