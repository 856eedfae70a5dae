//! Fuzz target for records CSV parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ucr_clearance::model::io_records_csv::from_records_csv_str;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = from_records_csv_str(text);
});
