//! Median table types and terminal formatting.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::{CrimeType, Measure, MedianMeasures, PopulationBucket};

/// Medians of one (year, population bucket) group.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketMedians {
    /// Number of agencies the medians were taken over.
    pub agencies: usize,
    pub crimes: BTreeMap<CrimeType, MedianMeasures>,
}

/// Per-year, per-bucket, per-crime medians.
///
/// Groups without any eligible agency are absent rather than empty. The
/// table is built once and only read afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MedianTable {
    years: BTreeMap<u16, BTreeMap<PopulationBucket, BucketMedians>>,
}

impl MedianTable {
    pub(crate) fn insert(&mut self, year: u16, bucket: PopulationBucket, medians: BucketMedians) {
        self.years.entry(year).or_default().insert(bucket, medians);
    }

    /// Medians of a (year, bucket) group, if any agency qualified.
    pub fn get(&self, year: u16, bucket: PopulationBucket) -> Option<&BucketMedians> {
        self.years.get(&year)?.get(&bucket)
    }

    /// A single median value.
    pub fn value(
        &self,
        year: u16,
        bucket: PopulationBucket,
        crime: CrimeType,
        measure: Measure,
    ) -> Option<f64> {
        self.get(year, bucket)?
            .crimes
            .get(&crime)
            .map(|m| m.get(measure))
    }

    /// Years with at least one populated bucket, ascending.
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.years.keys().copied()
    }

    /// Iterates `(year, bucket, medians)` in year then bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, PopulationBucket, &BucketMedians)> {
        self.years.iter().flat_map(|(year, buckets)| {
            buckets
                .iter()
                .map(move |(bucket, medians)| (*year, *bucket, medians))
        })
    }

    /// Number of populated (year, bucket) groups.
    pub fn len(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for MedianTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No eligible agencies: median table is empty");
        }

        writeln!(
            f,
            "Median table: {} year/bucket group(s) over {} year(s)",
            self.len(),
            self.years.len()
        )?;

        for (year, bucket, medians) in self.iter() {
            writeln!(f)?;
            writeln!(f, "{}  {} ({} agencies)", year, bucket, medians.agencies)?;
            writeln!(
                f,
                "  {:<14} {:>12} {:>12} {:>12}",
                "crime", "count", "cleared", "cleared_pct"
            )?;
            for (crime, m) in &medians.crimes {
                writeln!(
                    f,
                    "  {:<14} {:>12.1} {:>12.1} {:>12.3}",
                    crime.name(),
                    m.count,
                    m.cleared,
                    m.cleared_pct
                )?;
            }
        }

        Ok(())
    }
}
