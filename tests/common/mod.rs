#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_2012: &str = "tests/fixtures/2012-clearance-rates.txt";
pub const REPORT_2013: &str = "tests/fixtures/2013-clearance-rates.txt";
pub const CROSSWALK: &str = "tests/fixtures/crosswalk.csv";
pub const RUN_CONFIG: &str = "tests/fixtures/run.yaml";

pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).expect("read json file");
    serde_json::from_str(&text).expect("parse json file")
}

/// A report whose last record stops after two of its four lines.
pub fn write_truncated_report(path: &Path) {
    let full = fs::read_to_string(fixture(REPORT_2012)).expect("read fixture");
    let lines: Vec<&str> = full.lines().collect();
    // drop the sentinel and the last two lines of the final record
    let kept = &lines[..lines.len() - 3];
    fs::write(path, kept.join("\n") + "\n").expect("write truncated report");
}
