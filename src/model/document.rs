//! The per-agency output document.
//!
//! A document is a typed tree: crime type -> year -> measures, plus an
//! optional median tree of the same shape for agencies that take part in
//! population-bucket benchmarking.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bucket::PopulationBucket;
use super::crime::{CrimeType, Measure};
use super::ids::Ori7;
use super::record::ClearanceCounts;

/// Crime type -> year -> value.
pub type CrimeMatrix<T> = BTreeMap<CrimeType, BTreeMap<u16, T>>;

/// An agency's own figures for one crime type and year.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct YearMeasures {
    pub mos: u32,
    pub count: i64,
    pub cleared: i64,
    pub cleared_pct: f64,
}

impl YearMeasures {
    pub fn new(mos: u32, counts: &ClearanceCounts) -> Self {
        Self {
            mos,
            count: counts.count,
            cleared: counts.cleared,
            cleared_pct: counts.cleared_pct,
        }
    }
}

/// Bucket medians for one crime type and year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MedianMeasures {
    pub count: f64,
    pub cleared: f64,
    pub cleared_pct: f64,
}

impl MedianMeasures {
    pub fn get(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Count => self.count,
            Measure::Cleared => self.cleared,
            Measure::ClearedPct => self.cleared_pct,
        }
    }
}

/// Everything emitted for one agency.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgencyDocument {
    pub ori7: Ori7,
    /// Agency name from the crosswalk.
    pub agency: String,
    pub state: String,
    pub agency_type: String,

    /// Bucket of the most recent reporting year; municipal agencies only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_bucket: Option<PopulationBucket>,

    /// Population of the most recent reporting year; set with the bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,

    pub crimes: CrimeMatrix<YearMeasures>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medians: Option<CrimeMatrix<MedianMeasures>>,
}

impl AgencyDocument {
    /// Years present in the crime matrix, ascending.
    pub fn years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .crimes
            .values()
            .flat_map(|by_year| by_year.keys().copied())
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
