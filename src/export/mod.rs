//! Writing a run's outputs into a directory.
//!
//! A `build` run produces:
//!
//! - `<ori7>.json` for every agency document
//! - `agency_names.csv` with the crosswalk entries of agencies that reported
//! - `records.csv` with every decoded record
//! - `records_<year>.csv` / `records_<state>.csv` extracts when requested
//! - `medians.json` with the whole median table

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::emit::EmitOutcome;
use crate::error::ClearanceError;
use crate::medians::MedianTable;
use crate::model::io_agency_json::{ensure_plain_file_stem, write_agency_json, write_json};
use crate::model::io_records_csv::write_records_csv;
use crate::model::{Agency, AgencyYearRecord, Crosswalk, Ori7};

pub const AGENCY_NAMES_FILE: &str = "agency_names.csv";
pub const RECORDS_FILE: &str = "records.csv";
pub const MEDIANS_FILE: &str = "medians.json";

/// Which record extracts to write besides `records.csv`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub split_by_year: bool,
    pub split_by_state: bool,
}

/// What a run wrote.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ExportSummary {
    pub out_dir: PathBuf,
    pub records: usize,
    pub documents: usize,
    pub skipped_agencies: Vec<Ori7>,
    pub agency_names: usize,
    pub median_groups: usize,
    pub extracts: Vec<PathBuf>,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Output directory: {}", self.out_dir.display())?;
        writeln!(f, "  {} records", self.records)?;
        writeln!(f, "  {} agency documents", self.documents)?;
        writeln!(f, "  {} agency names", self.agency_names)?;
        writeln!(f, "  {} median groups", self.median_groups)?;

        if !self.extracts.is_empty() {
            writeln!(f, "  {} record extracts", self.extracts.len())?;
        }

        if !self.skipped_agencies.is_empty() {
            writeln!(
                f,
                "Skipped {} agencies missing from the crosswalk:",
                self.skipped_agencies.len()
            )?;
            for ori7 in &self.skipped_agencies {
                writeln!(f, "  - {}", ori7)?;
            }
        }

        Ok(())
    }
}

/// Writes every output of a run into `out_dir`, creating it if needed.
pub fn write_outputs(
    out_dir: &Path,
    records: &[AgencyYearRecord],
    crosswalk: &Crosswalk,
    medians: &MedianTable,
    outcome: &EmitOutcome,
    extracts: ExtractOptions,
) -> Result<ExportSummary, ClearanceError> {
    fs::create_dir_all(out_dir).map_err(ClearanceError::Io)?;

    for document in &outcome.documents {
        let path = write_agency_json(out_dir, document)?;
        debug!("Wrote {}", path.display());
    }

    let agency_names = write_agency_names(&out_dir.join(AGENCY_NAMES_FILE), records, crosswalk)?;
    write_records_csv(&out_dir.join(RECORDS_FILE), records)?;
    let extract_paths = write_record_extracts(out_dir, records, extracts)?;
    write_json(&out_dir.join(MEDIANS_FILE), medians)?;

    let summary = ExportSummary {
        out_dir: out_dir.to_path_buf(),
        records: records.len(),
        documents: outcome.documents.len(),
        skipped_agencies: outcome.skipped.clone(),
        agency_names,
        median_groups: medians.len(),
        extracts: extract_paths,
    };
    info!(
        "Wrote {} agency documents to {}",
        summary.documents,
        out_dir.display()
    );
    Ok(summary)
}

/// Writes `ori7,agency,agentype,state` for every crosswalk agency that has
/// at least one record, sorted by identifier. Returns the row count.
pub fn write_agency_names(
    path: &Path,
    records: &[AgencyYearRecord],
    crosswalk: &Crosswalk,
) -> Result<usize, ClearanceError> {
    let reported: BTreeSet<&Ori7> = records.iter().map(|r| &r.ori7).collect();
    let agencies: Vec<&Agency> = reported
        .into_iter()
        .filter_map(|ori7| crosswalk.get(ori7))
        .collect();

    let csv_err = |source| ClearanceError::AgencyNamesWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for agency in &agencies {
        writer.serialize(agency).map_err(csv_err)?;
    }
    writer.flush().map_err(ClearanceError::Io)?;

    Ok(agencies.len())
}

/// Writes the requested per-year and per-state extracts into `out_dir`.
///
/// Returns the paths written, per-year files first.
pub fn write_record_extracts(
    out_dir: &Path,
    records: &[AgencyYearRecord],
    options: ExtractOptions,
) -> Result<Vec<PathBuf>, ClearanceError> {
    let mut written = Vec::new();

    if options.split_by_year {
        let by_year = partition(records, |r| r.year.to_string());
        written.extend(write_partitions(out_dir, by_year)?);
    }
    if options.split_by_state {
        let by_state = partition(records, |r| r.state.clone());
        written.extend(write_partitions(out_dir, by_state)?);
    }

    Ok(written)
}

fn partition<F>(records: &[AgencyYearRecord], key: F) -> BTreeMap<String, Vec<AgencyYearRecord>>
where
    F: Fn(&AgencyYearRecord) -> String,
{
    let mut parts: BTreeMap<String, Vec<AgencyYearRecord>> = BTreeMap::new();
    for record in records {
        parts.entry(key(record)).or_default().push(record.clone());
    }
    parts
}

fn write_partitions(
    out_dir: &Path,
    parts: BTreeMap<String, Vec<AgencyYearRecord>>,
) -> Result<Vec<PathBuf>, ClearanceError> {
    let mut written = Vec::with_capacity(parts.len());
    for (key, part) in parts {
        let stem = format!("records_{}", key);
        ensure_plain_file_stem(&stem)?;
        let path = out_dir.join(format!("{}.csv", stem));
        write_records_csv(&path, &part)?;
        debug!("Wrote {} records to {}", part.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
