use std::path::PathBuf;
use thiserror::Error;

use crate::model::Ori7;

/// The main error type for ucr-clearance operations.
#[derive(Debug, Error)]
pub enum ClearanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No section break found in report {path}")]
    MissingSectionBreak { path: PathBuf },

    #[error(
        "Malformed line {line} in {path} (record slot {slot}): expected at least {expected} token(s), found {found}"
    )]
    MalformedLine {
        path: PathBuf,
        line: usize,
        slot: usize,
        expected: usize,
        found: usize,
    },

    #[error("Failed to decode {field} from '{token}' at {path}:{line}: {message}")]
    Decode {
        path: PathBuf,
        line: usize,
        field: &'static str,
        token: String,
        message: String,
    },

    #[error("Report {path} ended at line {line} in the middle of a record (slot {slot})")]
    TruncatedReport {
        path: PathBuf,
        line: usize,
        slot: usize,
    },

    #[error("Agency {ori7} is not present in the agency crosswalk")]
    UnknownAgency { ori7: Ori7 },

    #[error("Failed to parse agency crosswalk {path}: {source}")]
    CrosswalkParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid agency crosswalk {path}: {message}")]
    CrosswalkInvalid { path: PathBuf, message: String },

    #[error("Failed to parse records CSV {path}: {source}")]
    RecordsCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write records CSV {path}: {source}")]
    RecordsCsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid records CSV {path}: {message}")]
    RecordsCsvInvalid { path: PathBuf, message: String },

    #[error("Failed to write agency names {path}: {source}")]
    AgencyNamesWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse run config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid run configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Refusing to write output file for '{name}': not a plain file name")]
    UnsafeFileName { name: String },

    #[error("Invalid report input '{input}': {message}")]
    InvalidReportInput { input: String, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
