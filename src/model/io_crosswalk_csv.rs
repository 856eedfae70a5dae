//! Agency crosswalk CSV reader.
//!
//! The crosswalk maps ORI7 identifiers to the agency's full name, governance
//! type and state. Only four columns are used:
//!
//! - `ORI7`: agency identifier (rows with an empty value are skipped)
//! - `AGENCY`: full agency name
//! - `AGENTYPE`: governance type, e.g. `Municipal police`
//! - `STATE`: state name or code
//!
//! Header names are matched case-insensitively. Every other column is
//! ignored, including the unnamed column some releases carry.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, warn};

use super::record::{Agency, Crosswalk};
use super::Ori7;
use crate::error::ClearanceError;

const REQUIRED_COLUMNS: [&str; 4] = ["ori7", "agency", "agentype", "state"];

/// Column positions of the fields we read.
struct ColumnIndex {
    ori7: usize,
    agency: usize,
    agentype: usize,
    state: usize,
}

/// Reads the agency crosswalk from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid CSV, or lacks
/// one of the required columns.
pub fn read_crosswalk_csv(path: &Path) -> Result<Crosswalk, ClearanceError> {
    let file = File::open(path).map_err(ClearanceError::Io)?;
    let crosswalk = crosswalk_from_reader(BufReader::new(file), path)?;
    debug!(
        "Loaded {} agencies from crosswalk {}",
        crosswalk.len(),
        path.display()
    );
    Ok(crosswalk)
}

/// Reads the agency crosswalk from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_crosswalk_csv_str(csv_str: &str) -> Result<Crosswalk, ClearanceError> {
    from_crosswalk_csv_slice(csv_str.as_bytes())
}

/// Reads the agency crosswalk from CSV bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_crosswalk_csv_slice(bytes: &[u8]) -> Result<Crosswalk, ClearanceError> {
    crosswalk_from_reader(bytes, Path::new("<bytes>"))
}

fn crosswalk_from_reader<R: Read>(reader: R, path: &Path) -> Result<Crosswalk, ClearanceError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| ClearanceError::CrosswalkParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = resolve_columns(&headers, path)?;

    let mut crosswalk = Crosswalk::new();
    for result in csv_reader.records() {
        let row = result.map_err(|source| ClearanceError::CrosswalkParse {
            path: path.to_path_buf(),
            source,
        })?;

        let field = |idx: usize| row.get(idx).unwrap_or("").trim();
        let ori7 = field(columns.ori7);
        if ori7.is_empty() {
            continue;
        }

        let agency = Agency::new(
            Ori7::new(ori7),
            field(columns.agency),
            field(columns.agentype),
            field(columns.state),
        );

        if !crosswalk.insert(agency) {
            warn!(
                "Duplicate agency {} in crosswalk {}, keeping the last row",
                ori7,
                path.display()
            );
        }
    }

    Ok(crosswalk)
}

fn resolve_columns(headers: &csv::StringRecord, path: &Path) -> Result<ColumnIndex, ClearanceError> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|&name| position(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ClearanceError::CrosswalkInvalid {
            path: path.to_path_buf(),
            message: format!("missing required column(s): {}", missing.join(", ")),
        });
    }

    // All four were found above.
    let index = |name: &str| position(name).unwrap_or_default();
    Ok(ColumnIndex {
        ori7: index("ori7"),
        agency: index("agency"),
        agentype: index("agentype"),
        state: index("state"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_crosswalk_csv() -> &'static str {
        "ORI7,AGENCY,AGENTYPE,,STATE,FIPS\n\
         AL00100,Birmingham,Municipal police,x,AL,01\n\
         AL00200,Jefferson County,Sheriff,,AL,01\n\
         ,Blank Row,Municipal police,,AL,01\n"
    }

    #[test]
    fn test_reads_required_columns_and_ignores_others() {
        let crosswalk = from_crosswalk_csv_str(sample_crosswalk_csv()).expect("parse failed");

        assert_eq!(crosswalk.len(), 2);
        let agency = crosswalk.get(&Ori7::new("AL00100")).expect("present");
        assert_eq!(agency.name, "Birmingham");
        assert_eq!(agency.agency_type, "Municipal police");
        assert_eq!(agency.state, "AL");
        assert!(agency.is_municipal_police());
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let csv = "ori7,Agency,AgenType,State\nTX00100,Austin,Municipal police,TX\n";
        let crosswalk = from_crosswalk_csv_str(csv).expect("parse failed");
        assert_eq!(
            crosswalk.get(&Ori7::new("TX00100")).map(|a| a.name.as_str()),
            Some("Austin")
        );
    }

    #[test]
    fn test_skips_rows_with_empty_identifier() {
        let crosswalk = from_crosswalk_csv_str(sample_crosswalk_csv()).expect("parse failed");
        assert!(crosswalk.iter().all(|a| a.name != "Blank Row"));
    }

    #[test]
    fn test_duplicate_keeps_last() {
        let csv = "ORI7,AGENCY,AGENTYPE,STATE\n\
                   AL00100,First,Municipal police,AL\n\
                   AL00100,Second,Sheriff,AL\n";
        let crosswalk = from_crosswalk_csv_str(csv).expect("parse failed");
        assert_eq!(crosswalk.len(), 1);
        assert_eq!(
            crosswalk.get(&Ori7::new("AL00100")).map(|a| a.name.as_str()),
            Some("Second")
        );
    }

    #[test]
    fn test_missing_column_error() {
        let csv = "ORI7,AGENCY,STATE\nAL00100,Birmingham,AL\n";
        let err = from_crosswalk_csv_str(csv).expect_err("should fail");
        match err {
            ClearanceError::CrosswalkInvalid { message, .. } => {
                assert!(message.contains("agentype"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let csv = "ORI7,AGENCY,AGENTYPE,STATE\nAL00100,Birmingham\n";
        let crosswalk = from_crosswalk_csv_str(csv).expect("parse failed");
        let agency = crosswalk.get(&Ori7::new("AL00100")).expect("present");
        assert_eq!(agency.agency_type, "");
    }
}
