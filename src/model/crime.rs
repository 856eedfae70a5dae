//! Crime types and the fixed-shape per-crime table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// The ten index offenses reported in the clearance tables.
///
/// Declaration order is the column order used by the report, the record
/// CSV and the emitted JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrimeType {
    Violent,
    Property,
    Murder,
    ForcibleRape,
    Robbery,
    AggAssault,
    Burglary,
    LarcenyTheft,
    Mvt,
    Arson,
}

impl CrimeType {
    /// Number of crime types.
    pub const COUNT: usize = 10;

    /// All crime types in report column order.
    pub const ALL: [CrimeType; Self::COUNT] = [
        CrimeType::Violent,
        CrimeType::Property,
        CrimeType::Murder,
        CrimeType::ForcibleRape,
        CrimeType::Robbery,
        CrimeType::AggAssault,
        CrimeType::Burglary,
        CrimeType::LarcenyTheft,
        CrimeType::Mvt,
        CrimeType::Arson,
    ];

    /// Column prefix used in CSV headers and JSON keys.
    pub fn name(&self) -> &'static str {
        match self {
            CrimeType::Violent => "violent",
            CrimeType::Property => "property",
            CrimeType::Murder => "murder",
            CrimeType::ForcibleRape => "forcible_rape",
            CrimeType::Robbery => "robbery",
            CrimeType::AggAssault => "agg_assault",
            CrimeType::Burglary => "burglary",
            CrimeType::LarcenyTheft => "larceny_theft",
            CrimeType::Mvt => "mvt",
            CrimeType::Arson => "arson",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CrimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three values reported per crime type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Count,
    Cleared,
    ClearedPct,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Count, Measure::Cleared, Measure::ClearedPct];

    pub fn name(&self) -> &'static str {
        match self {
            Measure::Count => "count",
            Measure::Cleared => "cleared",
            Measure::ClearedPct => "cleared_pct",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value per crime type, stored in a fixed array indexed by [`CrimeType`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrimeTable<T> {
    values: [T; CrimeType::COUNT],
}

impl<T> CrimeTable<T> {
    /// Builds a table by calling `f` once per crime type, in column order.
    pub fn from_fn(mut f: impl FnMut(CrimeType) -> T) -> Self {
        Self {
            values: std::array::from_fn(|i| f(CrimeType::ALL[i])),
        }
    }

    /// Iterates `(crime type, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (CrimeType, &T)> {
        CrimeType::ALL.iter().copied().zip(self.values.iter())
    }
}

impl<T> Index<CrimeType> for CrimeTable<T> {
    type Output = T;

    fn index(&self, crime: CrimeType) -> &T {
        &self.values[crime.index()]
    }
}

impl<T> IndexMut<CrimeType> for CrimeTable<T> {
    fn index_mut(&mut self, crime: CrimeType) -> &mut T {
        &mut self.values[crime.index()]
    }
}
