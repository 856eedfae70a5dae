//! Assembly of per-agency output documents.
//!
//! Records are grouped by agency identifier across every year of the run.
//! Each group becomes one [`AgencyDocument`]; municipal police departments
//! additionally get the median of their population bucket for every year
//! in which one exists.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::ClearanceError;
use crate::medians::MedianTable;
use crate::model::{
    AgencyDocument, AgencyYearRecord, CrimeMatrix, Crosswalk, MedianMeasures, Ori7, YearMeasures,
};

/// Documents built from a run, plus the agencies that had to be skipped.
#[derive(Clone, Debug, Default)]
pub struct EmitOutcome {
    /// One document per known agency, in identifier order.
    pub documents: Vec<AgencyDocument>,
    /// Identifiers missing from the crosswalk.
    pub skipped: Vec<Ori7>,
}

/// Builds one document per agency.
///
/// Agencies missing from the crosswalk are logged and listed in
/// [`EmitOutcome::skipped`]; they never abort the run.
pub fn build_documents(
    records: &[AgencyYearRecord],
    crosswalk: &Crosswalk,
    medians: &MedianTable,
) -> EmitOutcome {
    let Some(latest_year) = records.iter().map(|r| r.year).max() else {
        return EmitOutcome::default();
    };

    let mut by_agency: BTreeMap<&Ori7, Vec<&AgencyYearRecord>> = BTreeMap::new();
    for record in records {
        by_agency.entry(&record.ori7).or_default().push(record);
    }

    let mut outcome = EmitOutcome::default();
    for (ori7, mut group) in by_agency {
        group.sort_by_key(|r| r.year);
        match build_document(ori7, &group, crosswalk, medians, latest_year) {
            Ok(document) => outcome.documents.push(document),
            Err(err) => {
                warn!("Skipping agency: {}", err);
                outcome.skipped.push(ori7.clone());
            }
        }
    }

    info!(
        "Built {} agency documents ({} skipped, latest year {})",
        outcome.documents.len(),
        outcome.skipped.len(),
        latest_year
    );
    outcome
}

/// Builds the document of a single agency from its records.
///
/// `records` should be sorted by year. `latest_year` is the most recent
/// year of the whole run: the population bucket and population are only
/// recorded from a record of that year.
///
/// # Errors
/// [`ClearanceError::UnknownAgency`] if `ori7` is not in the crosswalk.
pub fn build_document(
    ori7: &Ori7,
    records: &[&AgencyYearRecord],
    crosswalk: &Crosswalk,
    medians: &MedianTable,
    latest_year: u16,
) -> Result<AgencyDocument, ClearanceError> {
    let agency = crosswalk
        .get(ori7)
        .ok_or_else(|| ClearanceError::UnknownAgency {
            ori7: ori7.clone(),
        })?;
    let municipal = agency.is_municipal_police();

    let mut document = AgencyDocument {
        ori7: ori7.clone(),
        agency: agency.name.clone(),
        state: agency.state.clone(),
        agency_type: agency.agency_type.clone(),
        population_bucket: None,
        population: None,
        crimes: CrimeMatrix::new(),
        medians: None,
    };
    let mut median_matrix: CrimeMatrix<MedianMeasures> = CrimeMatrix::new();

    for record in records {
        for (crime, counts) in record.crimes.iter() {
            document
                .crimes
                .entry(crime)
                .or_default()
                .insert(record.year, YearMeasures::new(record.mos, counts));
        }

        if !municipal {
            continue;
        }
        let Some(bucket) = record.population_bucket() else {
            continue;
        };

        if let Some(group) = medians.get(record.year, bucket) {
            for (crime, values) in &group.crimes {
                median_matrix
                    .entry(*crime)
                    .or_default()
                    .insert(record.year, *values);
            }
        } else {
            debug!("No medians for {} in {} ({})", ori7, record.year, bucket);
        }

        if record.year == latest_year {
            document.population_bucket = Some(bucket);
            document.population = Some(record.population);
        }
    }

    if !median_matrix.is_empty() {
        document.medians = Some(median_matrix);
    }

    Ok(document)
}
