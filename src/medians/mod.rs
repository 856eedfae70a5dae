//! Population-bucket medians.
//!
//! Municipal police departments that reported for a full year are grouped
//! by (year, population bucket), and for every crime type the median of each
//! measure is taken over the group.

mod report;

pub use report::{BucketMedians, MedianTable};

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::model::{
    AgencyYearRecord, CrimeType, Crosswalk, MedianMeasures, Measure, PopulationBucket,
};

/// Median of a set of values.
///
/// Sorts `values` in place. For an even number of values the result is the
/// mean of the two middle ones. Returns `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Returns true if a record takes part in median benchmarking.
///
/// The agency must be a municipal police department in the crosswalk and
/// the record must cover all twelve months.
pub fn is_eligible(record: &AgencyYearRecord, crosswalk: &Crosswalk) -> bool {
    record.is_full_year()
        && crosswalk
            .get(&record.ori7)
            .is_some_and(|agency| agency.is_municipal_police())
}

/// Computes the median table over every eligible record.
///
/// Records without a population bucket are left out. A (year, bucket) pair
/// with no eligible record has no entry in the result.
pub fn compute_medians(records: &[AgencyYearRecord], crosswalk: &Crosswalk) -> MedianTable {
    let mut groups: BTreeMap<(u16, PopulationBucket), Vec<&AgencyYearRecord>> = BTreeMap::new();
    let mut eligible = 0usize;

    for record in records {
        if !is_eligible(record, crosswalk) {
            continue;
        }
        let Some(bucket) = record.population_bucket() else {
            debug!(
                "Skipping {} ({}) for medians: population {}",
                record.ori7, record.year, record.population
            );
            continue;
        };
        eligible += 1;
        groups.entry((record.year, bucket)).or_default().push(record);
    }

    let mut table = MedianTable::default();
    for ((year, bucket), members) in groups {
        table.insert(year, bucket, group_medians(&members));
    }

    info!(
        "Computed medians for {} year/bucket groups from {} eligible records",
        table.len(),
        eligible
    );
    table
}

fn group_medians(members: &[&AgencyYearRecord]) -> BucketMedians {
    let mut values = Vec::with_capacity(members.len());
    let mut measure_median = |crime: CrimeType, measure: Measure| {
        values.clear();
        values.extend(members.iter().map(|r| r.crimes[crime].measure(measure)));
        median(&mut values).unwrap_or_default()
    };

    let crimes = CrimeType::ALL
        .into_iter()
        .map(|crime| {
            let medians = MedianMeasures {
                count: measure_median(crime, Measure::Count),
                cleared: measure_median(crime, Measure::Cleared),
                cleared_pct: measure_median(crime, Measure::ClearedPct),
            };
            (crime, medians)
        })
        .collect();

    BucketMedians {
        agencies: members.len(),
        crimes,
    }
}
