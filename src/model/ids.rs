//! Newtype identifier for law-enforcement agencies.
//!
//! The ORI7 code is the join key between report records and the agency
//! crosswalk, so it gets its own type instead of travelling around as a
//! bare `String`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 7-character agency identifier (ORI7).
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ori7(String);

impl Ori7 {
    /// Creates an identifier from an already-normalized code.
    #[inline]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Normalizes an identifier token as printed in the report.
    ///
    /// Older reports pad numeric identifiers with a leading zero; a single
    /// leading `0` is stripped.
    pub fn from_report_token(token: &str) -> Self {
        let code = token.strip_prefix('0').unwrap_or(token);
        Self(code.to_string())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the state code from an identifier token as printed in the
    /// report, before the leading `0` is stripped.
    ///
    /// Alphabetic-leading tokens (`NY01234`) carry the state in the first
    /// two characters. Digit-leading tokens (`0123456`) carry it in
    /// characters 1-2. Short tokens yield whatever characters exist.
    pub fn state_from_report_token(token: &str) -> String {
        let skip = match token.chars().next() {
            Some(first) if first.is_ascii_digit() => 1,
            _ => 0,
        };
        token.chars().skip(skip).take(2).collect()
    }
}

impl fmt::Debug for Ori7 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ori7({})", self.0)
    }
}

impl fmt::Display for Ori7 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Ori7 {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}
