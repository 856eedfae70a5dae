//! Decoded report records and agency crosswalk entries.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bucket::PopulationBucket;
use super::crime::{CrimeTable, Measure};
use super::ids::Ori7;

/// Governance type of agencies eligible for median benchmarking.
pub const MUNICIPAL_POLICE: &str = "Municipal police";

/// Months of reporting required for median eligibility.
pub const FULL_YEAR_MOS: u32 = 12;

/// Offense, clearance and clearance-rate values for one crime type.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClearanceCounts {
    /// Offenses reported.
    pub count: i64,
    /// Offenses cleared.
    pub cleared: i64,
    /// Clearance rate as a fraction (the report prints a percentage).
    pub cleared_pct: f64,
}

impl ClearanceCounts {
    /// Returns the value of a single measure as a float.
    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Count => self.count as f64,
            Measure::Cleared => self.cleared as f64,
            Measure::ClearedPct => self.cleared_pct,
        }
    }
}

/// One agency's clearance figures for one reporting year.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgencyYearRecord {
    pub year: u16,
    /// Two-character state code derived from the identifier.
    pub state: String,
    pub ori7: Ori7,
    /// Agency name as printed in the report.
    pub name: String,
    /// Months of reporting.
    pub mos: u32,
    pub population: i64,
    pub crimes: CrimeTable<ClearanceCounts>,
}

impl AgencyYearRecord {
    /// The population bucket for this record, if the population is positive.
    pub fn population_bucket(&self) -> Option<PopulationBucket> {
        PopulationBucket::classify(self.population)
    }

    /// Returns true if the agency reported for all twelve months.
    pub fn is_full_year(&self) -> bool {
        self.mos == FULL_YEAR_MOS
    }
}

/// An entry of the agency crosswalk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Agency {
    pub ori7: Ori7,
    #[serde(rename = "agency")]
    pub name: String,
    #[serde(rename = "agentype")]
    pub agency_type: String,
    pub state: String,
}

impl Agency {
    /// Creates a new crosswalk entry.
    pub fn new(
        ori7: impl Into<Ori7>,
        name: impl Into<String>,
        agency_type: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            ori7: ori7.into(),
            name: name.into(),
            agency_type: agency_type.into(),
            state: state.into(),
        }
    }

    /// Returns true for municipal police departments.
    pub fn is_municipal_police(&self) -> bool {
        self.agency_type == MUNICIPAL_POLICE
    }
}

/// The agency lookup table, keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct Crosswalk {
    agencies: BTreeMap<Ori7, Agency>,
}

impl Crosswalk {
    /// Creates an empty crosswalk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an agency, replacing any entry with the same identifier.
    ///
    /// Returns false when an existing entry was replaced.
    pub fn insert(&mut self, agency: Agency) -> bool {
        self.agencies.insert(agency.ori7.clone(), agency).is_none()
    }

    pub fn get(&self, ori7: &Ori7) -> Option<&Agency> {
        self.agencies.get(ori7)
    }

    pub fn len(&self) -> usize {
        self.agencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agencies.is_empty()
    }

    /// Iterates agencies in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Agency> {
        self.agencies.values()
    }
}

impl FromIterator<Agency> for Crosswalk {
    fn from_iter<I: IntoIterator<Item = Agency>>(iter: I) -> Self {
        let mut crosswalk = Crosswalk::new();
        for agency in iter {
            crosswalk.insert(agency);
        }
        crosswalk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CrimeType;

    #[test]
    fn test_measure_values() {
        let counts = ClearanceCounts {
            count: 40,
            cleared: 10,
            cleared_pct: 0.25,
        };
        assert_eq!(counts.measure(Measure::Count), 40.0);
        assert_eq!(counts.measure(Measure::Cleared), 10.0);
        assert_eq!(counts.measure(Measure::ClearedPct), 0.25);
    }

    #[test]
    fn test_record_bucket_and_full_year() {
        let mut record = AgencyYearRecord {
            year: 2013,
            population: 999_999,
            mos: 12,
            ..Default::default()
        };
        record.crimes[CrimeType::Murder].count = 3;

        assert_eq!(
            record.population_bucket(),
            Some(PopulationBucket::From500kTo999k)
        );
        assert!(record.is_full_year());

        record.population = 0;
        record.mos = 11;
        assert_eq!(record.population_bucket(), None);
        assert!(!record.is_full_year());
    }

    #[test]
    fn test_municipal_police_is_exact_match() {
        assert!(Agency::new("AL00100", "Town", "Municipal police", "AL").is_municipal_police());
        assert!(!Agency::new("AL00100", "County", "Sheriff", "AL").is_municipal_police());
        assert!(!Agency::new("AL00100", "Town", "municipal police", "AL").is_municipal_police());
    }

    #[test]
    fn test_crosswalk_keeps_last_duplicate() {
        let mut crosswalk = Crosswalk::new();
        assert!(crosswalk.insert(Agency::new("AL00100", "First", "Municipal police", "AL")));
        assert!(!crosswalk.insert(Agency::new("AL00100", "Second", "Sheriff", "AL")));

        assert_eq!(crosswalk.len(), 1);
        let agency = crosswalk.get(&Ori7::new("AL00100")).expect("present");
        assert_eq!(agency.name, "Second");
        assert_eq!(agency.agency_type, "Sheriff");
        assert!(crosswalk.get(&Ori7::new("AL00200")).is_none());
    }
}
