//! Flat CSV reader and writer for decoded report records.
//!
//! # Column Layout
//!
//! `year,state,ori7,lea_name,population,mos` followed by three columns per
//! crime type, in report order:
//! `<crime>_count,<crime>_cleared,<crime>_cleared_pct`.
//!
//! Clearance rates are written as fractions, exactly as they are held in
//! memory, so reading a written file reproduces every numeric field.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use super::crime::{CrimeTable, CrimeType, Measure};
use super::record::{AgencyYearRecord, ClearanceCounts};
use super::Ori7;
use crate::error::ClearanceError;

const IDENTITY_COLUMNS: [&str; 6] = ["year", "state", "ori7", "lea_name", "population", "mos"];

/// Returns the full header row of the records CSV.
pub fn records_csv_header() -> Vec<String> {
    let mut header: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
    for crime in CrimeType::ALL {
        for measure in Measure::ALL {
            header.push(measure_column(crime, measure));
        }
    }
    header
}

fn measure_column(crime: CrimeType, measure: Measure) -> String {
    format!("{}_{}", crime.name(), measure.name())
}

// ============================================================================
// Public API
// ============================================================================

/// Writes records to a CSV file.
///
/// Records are written in the order given.
pub fn write_records_csv(path: &Path, records: &[AgencyYearRecord]) -> Result<(), ClearanceError> {
    let file = File::create(path).map_err(ClearanceError::Io)?;
    let writer = BufWriter::new(file);

    write_records(writer, records, path)?
        .flush()
        .map_err(ClearanceError::Io)?;

    Ok(())
}

/// Writes records as CSV to an arbitrary writer (stdout, a buffer, ...).
pub fn write_records_to<W: Write>(
    writer: W,
    records: &[AgencyYearRecord],
) -> Result<(), ClearanceError> {
    write_records(writer, records, Path::new("<writer>"))?
        .flush()
        .map_err(ClearanceError::Io)
}

/// Writes records to a CSV string.
///
/// Useful for testing without file I/O.
pub fn to_records_csv_string(records: &[AgencyYearRecord]) -> Result<String, ClearanceError> {
    let dummy_path = Path::new("<string>");
    let bytes = write_records(Vec::new(), records, dummy_path)?;

    String::from_utf8(bytes).map_err(|e| ClearanceError::RecordsCsvInvalid {
        path: dummy_path.to_path_buf(),
        message: format!("Invalid UTF-8 in output: {}", e),
    })
}

/// Reads records from a CSV file written by [`write_records_csv`].
pub fn read_records_csv(path: &Path) -> Result<Vec<AgencyYearRecord>, ClearanceError> {
    let file = File::open(path).map_err(ClearanceError::Io)?;
    records_from_reader(BufReader::new(file), path)
}

/// Reads records from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_records_csv_str(csv_str: &str) -> Result<Vec<AgencyYearRecord>, ClearanceError> {
    records_from_reader(csv_str.as_bytes(), Path::new("<string>"))
}

// ============================================================================
// Writing
// ============================================================================

fn write_records<W: Write>(
    writer: W,
    records: &[AgencyYearRecord],
    path: &Path,
) -> Result<W, ClearanceError> {
    let to_write_err = |source| ClearanceError::RecordsCsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(records_csv_header())
        .map_err(to_write_err)?;

    for record in records {
        csv_writer
            .write_record(record_fields(record))
            .map_err(to_write_err)?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| ClearanceError::Io(e.into_error()))
}

fn record_fields(record: &AgencyYearRecord) -> Vec<String> {
    let mut fields = vec![
        record.year.to_string(),
        record.state.clone(),
        record.ori7.to_string(),
        record.name.clone(),
        record.population.to_string(),
        record.mos.to_string(),
    ];
    for (_, counts) in record.crimes.iter() {
        fields.push(counts.count.to_string());
        fields.push(counts.cleared.to_string());
        fields.push(counts.cleared_pct.to_string());
    }
    fields
}

// ============================================================================
// Reading
// ============================================================================

fn records_from_reader<R: Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<AgencyYearRecord>, ClearanceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| ClearanceError::RecordsCsvParse {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns: HashMap<&str, usize> = headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

    let missing: Vec<String> = records_csv_header()
        .into_iter()
        .filter(|name| !columns.contains_key(name.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(ClearanceError::RecordsCsvInvalid {
            path: path.to_path_buf(),
            message: format!("missing column(s): {}", missing.join(", ")),
        });
    }

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result.map_err(|source| ClearanceError::RecordsCsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        let line = row.position().map_or(0, |p| p.line());
        let row = RowView {
            row: &row,
            columns: &columns,
            path,
            line,
        };

        let mut crimes = CrimeTable::<ClearanceCounts>::default();
        for crime in CrimeType::ALL {
            crimes[crime] = ClearanceCounts {
                count: row.parse(&measure_column(crime, Measure::Count))?,
                cleared: row.parse(&measure_column(crime, Measure::Cleared))?,
                cleared_pct: row.parse(&measure_column(crime, Measure::ClearedPct))?,
            };
        }

        records.push(AgencyYearRecord {
            year: row.parse("year")?,
            state: row.text("state").to_string(),
            ori7: Ori7::new(row.text("ori7")),
            name: row.text("lea_name").to_string(),
            population: row.parse("population")?,
            mos: row.parse("mos")?,
            crimes,
        });
    }

    Ok(records)
}

struct RowView<'a> {
    row: &'a csv::StringRecord,
    columns: &'a HashMap<&'a str, usize>,
    path: &'a Path,
    line: u64,
}

impl RowView<'_> {
    fn text(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&idx| self.row.get(idx))
            .unwrap_or("")
    }

    fn parse<T: FromStr>(&self, column: &str) -> Result<T, ClearanceError>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.text(column);
        raw.trim()
            .parse()
            .map_err(|e| ClearanceError::RecordsCsvInvalid {
                path: self.path.to_path_buf(),
                message: format!(
                    "line {}: invalid value '{}' in column {}: {}",
                    self.line, raw, column, e
                ),
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(ori7: &str, year: u16) -> AgencyYearRecord {
        let crimes = CrimeTable::from_fn(|crime| {
            let base = CrimeType::ALL.iter().position(|c| *c == crime).unwrap_or(0) as i64;
            ClearanceCounts {
                count: 100 + base,
                cleared: 40 + base,
                cleared_pct: (40 + base) as f64 / (100 + base) as f64,
            }
        });
        AgencyYearRecord {
            year,
            state: "AL".into(),
            ori7: Ori7::new(ori7),
            name: "Birmingham Police Dept, City of".into(),
            mos: 12,
            population: 212_237,
            crimes,
        }
    }

    #[test]
    fn test_header_layout() {
        let header = records_csv_header();
        assert_eq!(header.len(), 6 + 3 * CrimeType::COUNT);
        assert_eq!(header[0], "year");
        assert_eq!(header[6], "violent_count");
        assert_eq!(header[7], "violent_cleared");
        assert_eq!(header[8], "violent_cleared_pct");
        assert_eq!(header[header.len() - 1], "arson_cleared_pct");
    }

    #[test]
    fn test_roundtrip_preserves_numeric_fields() {
        let records = vec![sample_record("AL00100", 2012), sample_record("AL00100", 2013)];

        let csv_str = to_records_csv_string(&records).expect("serialize failed");
        let restored = from_records_csv_str(&csv_str).expect("parse failed");

        assert_eq!(records, restored);
    }

    #[test]
    fn test_name_with_comma_is_quoted() {
        let records = vec![sample_record("AL00100", 2012)];
        let csv_str = to_records_csv_string(&records).expect("serialize failed");
        assert!(csv_str.contains("\"Birmingham Police Dept, City of\""));
    }

    #[test]
    fn test_column_order_is_irrelevant_on_read() {
        let records = vec![sample_record("AL00100", 2012)];
        let csv_str = to_records_csv_string(&records).expect("serialize failed");

        // Move the year column to the end.
        let mut reader = csv::Reader::from_reader(csv_str.as_bytes());
        let headers = reader.headers().expect("headers").clone();
        let row = reader.records().next().expect("row").expect("row ok");
        let mut writer = csv::Writer::from_writer(Vec::new());
        let reorder = |r: &csv::StringRecord| {
            let mut v: Vec<String> = r.iter().skip(1).map(String::from).collect();
            v.push(r[0].to_string());
            v
        };
        writer.write_record(reorder(&headers)).expect("write");
        writer.write_record(reorder(&row)).expect("write");
        let reordered = String::from_utf8(writer.into_inner().expect("inner")).expect("utf8");

        let restored = from_records_csv_str(&reordered).expect("parse failed");
        assert_eq!(restored, records);
    }

    #[test]
    fn test_missing_column_error() {
        let result = from_records_csv_str("year,state\n2012,AL\n");
        assert!(matches!(
            result,
            Err(ClearanceError::RecordsCsvInvalid { .. })
        ));
    }

    #[test]
    fn test_invalid_number_error() {
        let records = vec![sample_record("AL00100", 2012)];
        let csv_str = to_records_csv_string(&records)
            .expect("serialize failed")
            .replace("212237", "lots");
        let err = from_records_csv_str(&csv_str).expect_err("should fail");
        assert!(err.to_string().contains("population"));
    }
}
