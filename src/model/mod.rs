//! Typed model of clearance-rate data.
//!
//! This module defines the records decoded from the text reports, the
//! agency crosswalk, the population buckets used for benchmarking and the
//! per-agency output document, along with their CSV and JSON readers and
//! writers.
//!
//! # Example
//!
//! ```
//! use ucr_clearance::model::{AgencyYearRecord, CrimeType, Ori7, PopulationBucket};
//!
//! let mut record = AgencyYearRecord {
//!     year: 2013,
//!     ori7: Ori7::from_report_token("NY01234"),
//!     state: "NY".into(),
//!     population: 999_999,
//!     mos: 12,
//!     ..Default::default()
//! };
//! record.crimes[CrimeType::Robbery].count = 42;
//!
//! assert_eq!(record.population_bucket(), Some(PopulationBucket::From500kTo999k));
//! ```

mod bucket;
mod crime;
mod document;
mod ids;
pub mod io_agency_json;
pub mod io_crosswalk_csv;
pub mod io_records_csv;
mod record;

pub use bucket::PopulationBucket;
pub use crime::{CrimeTable, CrimeType, Measure};
pub use document::{AgencyDocument, CrimeMatrix, MedianMeasures, YearMeasures};
pub use ids::Ori7;
pub use record::{
    Agency, AgencyYearRecord, ClearanceCounts, Crosswalk, FULL_YEAR_MOS, MUNICIPAL_POLICE,
};
