//! Fixed-layout clearance-rate report parser.
//!
//! A report is a sequence of pages. Every page starts with the same section
//! header followed by three column-header lines, then a run of agency
//! records, four lines each. A sentinel line marks the end of the data.
//!
//! - [`line`] classifies raw lines
//! - [`decode`] turns the tokens of one record line into typed fields
//! - [`assembler`] is the state machine that walks the report and yields
//!   one [`AgencyYearRecord`] per agency
//! - [`source`] finds report files and the year each covers

pub mod assembler;
pub mod decode;
pub mod line;
pub mod source;

pub use assembler::{LineCursor, ReportParser};
pub use source::{discover_reports, ReportSource};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::error::ClearanceError;
use crate::model::AgencyYearRecord;

/// Parses every record of one report file.
///
/// # Errors
/// Fails on the first structural problem: a missing section header, a line
/// with too few fields, a field that is not a number, or a report that
/// stops in the middle of a record.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use ucr_clearance::report::read_report;
///
/// let records = read_report(Path::new("data/2013-clearance-rates.txt"), 2013)?;
/// # Ok::<(), ucr_clearance::ClearanceError>(())
/// ```
pub fn read_report(path: &Path, year: u16) -> Result<Vec<AgencyYearRecord>, ClearanceError> {
    info!("Parsing {} report from {}", year, path.display());
    let file = File::open(path).map_err(ClearanceError::Io)?;
    let records: Vec<AgencyYearRecord> =
        ReportParser::new(BufReader::new(file), year, path).collect::<Result<_, _>>()?;
    info!("Parsed {} records for {}", records.len(), year);
    Ok(records)
}

/// Parses every record of a report held in memory.
///
/// Useful for testing without file I/O.
pub fn from_report_str(text: &str, year: u16) -> Result<Vec<AgencyYearRecord>, ClearanceError> {
    ReportParser::new(text.as_bytes(), year, "<string>").collect()
}

/// Parses several reports, concatenating their records in source order.
pub fn read_reports(sources: &[ReportSource]) -> Result<Vec<AgencyYearRecord>, ClearanceError> {
    let mut all = Vec::new();
    for source in sources {
        all.extend(read_report(&source.path, source.year)?);
    }
    Ok(all)
}
