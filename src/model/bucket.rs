//! Population bands used to group agencies of comparable size.

use serde::{Serialize, Serializer};
use std::fmt;

/// One of eight fixed, non-overlapping population bands.
///
/// Lower bounds are inclusive. Upper bounds are inclusive except for
/// [`PopulationBucket::OneMillionAndAbove`], which is unbounded. The lowest
/// band starts at 1, so a population of zero belongs to no bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PopulationBucket {
    OneMillionAndAbove,
    From500kTo999k,
    From250kTo499k,
    From100kTo249k,
    From50kTo99k,
    From25kTo49k,
    From10kTo24k,
    Under10k,
}

impl PopulationBucket {
    /// All buckets, ordered by descending lower bound.
    pub const ALL: [PopulationBucket; 8] = [
        PopulationBucket::OneMillionAndAbove,
        PopulationBucket::From500kTo999k,
        PopulationBucket::From250kTo499k,
        PopulationBucket::From100kTo249k,
        PopulationBucket::From50kTo99k,
        PopulationBucket::From25kTo49k,
        PopulationBucket::From10kTo24k,
        PopulationBucket::Under10k,
    ];

    /// Display name, also used as the JSON value.
    pub fn name(&self) -> &'static str {
        match self {
            PopulationBucket::OneMillionAndAbove => "1,000,000 and above",
            PopulationBucket::From500kTo999k => "500,000 to 999,999",
            PopulationBucket::From250kTo499k => "250,000 to 499,999",
            PopulationBucket::From100kTo249k => "100,000 to 249,999",
            PopulationBucket::From50kTo99k => "50,000 to 99,999",
            PopulationBucket::From25kTo49k => "25,000 to 49,999",
            PopulationBucket::From10kTo24k => "10,000 to 24,999",
            PopulationBucket::Under10k => "Under 10,000",
        }
    }

    /// Inclusive `(low, high)` bounds; `high` is `None` for the top bucket.
    pub fn bounds(&self) -> (i64, Option<i64>) {
        match self {
            PopulationBucket::OneMillionAndAbove => (1_000_000, None),
            PopulationBucket::From500kTo999k => (500_000, Some(999_999)),
            PopulationBucket::From250kTo499k => (250_000, Some(499_999)),
            PopulationBucket::From100kTo249k => (100_000, Some(249_999)),
            PopulationBucket::From50kTo99k => (50_000, Some(99_999)),
            PopulationBucket::From25kTo49k => (25_000, Some(49_999)),
            PopulationBucket::From10kTo24k => (10_000, Some(24_999)),
            PopulationBucket::Under10k => (1, Some(9_999)),
        }
    }

    /// Returns true if `population` falls inside this bucket.
    pub fn contains(&self, population: i64) -> bool {
        let (low, high) = self.bounds();
        population >= low && high.map_or(true, |high| population <= high)
    }

    /// Classifies a population into its bucket.
    ///
    /// Buckets are scanned top-down and the scan stops at the first match.
    /// Zero and negative populations return `None`.
    pub fn classify(population: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.contains(population))
    }
}

impl fmt::Display for PopulationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PopulationBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
