//! Locating report files and the year each one covers.
//!
//! One report file covers one reporting year. The year is either given
//! explicitly (`2013=data/clearance.txt`) or read from a four-digit prefix
//! of the file name (`2013-clearance-rates.txt`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::ClearanceError;

const REPORT_EXTENSION: &str = "txt";

/// A report file and its reporting year.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct ReportSource {
    pub year: u16,
    pub path: PathBuf,
}

impl ReportSource {
    pub fn new(year: u16, path: impl Into<PathBuf>) -> Self {
        Self {
            year,
            path: path.into(),
        }
    }

    /// Builds a source from a path whose file name starts with the year.
    pub fn from_path(path: &Path) -> Option<Self> {
        year_from_file_name(path).map(|year| Self::new(year, path))
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.year, self.path.display())
    }
}

impl FromStr for ReportSource {
    type Err = ClearanceError;

    /// Parses `YEAR=PATH`, or a bare path with a year prefix.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| ClearanceError::InvalidReportInput {
            input: input.to_string(),
            message: message.to_string(),
        };

        if let Some((year, path)) = input.split_once('=') {
            if let Ok(year) = year.trim().parse::<u16>() {
                if path.is_empty() {
                    return Err(invalid("empty path"));
                }
                return Ok(Self::new(year, path));
            }
        }

        Self::from_path(Path::new(input)).ok_or_else(|| {
            invalid("cannot infer the year; use YEAR=PATH or a file name starting with the year")
        })
    }
}

/// Reads a four-digit year from the start of a file name.
pub fn year_from_file_name(path: &Path) -> Option<u16> {
    let name = path.file_name()?.to_str()?;
    let prefix = name.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.as_bytes().get(4).is_some_and(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Finds every `.txt` report below `dir` whose file name starts with a year.
///
/// Results are sorted by year, then path.
pub fn discover_reports(dir: &Path) -> Result<Vec<ReportSource>, ClearanceError> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| ClearanceError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_report = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_EXTENSION));
        if !is_report {
            continue;
        }
        if let Some(source) = ReportSource::from_path(path) {
            sources.push(source);
        }
    }
    sources.sort();
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit_year() {
        let source: ReportSource = "2011=data/rates.txt".parse().expect("parse");
        assert_eq!(source, ReportSource::new(2011, "data/rates.txt"));
    }

    #[test]
    fn test_parse_inferred_year() {
        let source: ReportSource = "data/2012-clearance-rates.txt".parse().expect("parse");
        assert_eq!(source.year, 2012);
        assert_eq!(source.path, PathBuf::from("data/2012-clearance-rates.txt"));
    }

    #[test]
    fn test_parse_without_year_fails() {
        let result: Result<ReportSource, _> = "data/clearance-rates.txt".parse();
        assert!(matches!(
            result,
            Err(ClearanceError::InvalidReportInput { .. })
        ));

        let result: Result<ReportSource, _> = "2011=".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_year_prefix_must_be_exactly_four_digits() {
        assert_eq!(year_from_file_name(Path::new("2013.txt")), Some(2013));
        assert_eq!(year_from_file_name(Path::new("20134-x.txt")), None);
        assert_eq!(year_from_file_name(Path::new("x2013.txt")), None);
        assert_eq!(year_from_file_name(Path::new("201")), None);
    }

    #[test]
    fn test_discover_reports_sorted_by_year() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("raw");
        std::fs::create_dir_all(&nested).expect("mkdir");
        std::fs::write(dir.path().join("2013-clearance-rates.txt"), "").expect("write");
        std::fs::write(nested.join("2011-clearance-rates.TXT"), "").expect("write");
        std::fs::write(dir.path().join("notes.txt"), "").expect("write");
        std::fs::write(dir.path().join("2012-crosswalk.csv"), "").expect("write");

        let sources = discover_reports(dir.path()).expect("discover");
        let years: Vec<u16> = sources.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2011, 2013]);
    }
}
