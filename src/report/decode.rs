//! Field decoding for the four lines of an agency record.
//!
//! Each record spans four lines ("slots"):
//!
//! | slot | token 0              | tokens used                         |
//! |------|----------------------|-------------------------------------|
//! | 0    | agency identifier    | 1.. agency name                     |
//! | 1    | months of reporting  | 3..=12 offense counts               |
//! | 2    | population           | 3..=12 cleared counts               |
//! | 3    | (label)              | 1..=10 clearance percentages        |
//!
//! Crime columns always follow [`CrimeType::ALL`] order.

use std::path::Path;

use crate::error::ClearanceError;
use crate::model::{AgencyYearRecord, CrimeType, Ori7};

/// Number of lines in one agency record.
pub const RECORD_LINES: usize = 4;

/// Minimum token count per slot.
const SLOT_MIN_TOKENS: [usize; RECORD_LINES] = [1, 13, 13, 11];

/// First crime column of the count and cleared lines.
const COUNT_COLUMN_OFFSET: usize = 3;

/// First crime column of the percentage line.
const PCT_COLUMN_OFFSET: usize = 1;

/// Where the line being decoded came from.
#[derive(Clone, Copy, Debug)]
pub struct LineContext<'a> {
    pub path: &'a Path,
    pub line: usize,
    pub slot: usize,
}

impl LineContext<'_> {
    fn decode_error(&self, field: &'static str, token: &str, message: String) -> ClearanceError {
        ClearanceError::Decode {
            path: self.path.to_path_buf(),
            line: self.line,
            field,
            token: token.to_string(),
            message,
        }
    }
}

/// Splits a line on runs of whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Decodes one line into the slot's fields of `record`.
///
/// # Errors
/// `MalformedLine` if the line has too few tokens for its slot, `Decode` if
/// a token is not a valid number.
pub fn decode_slot(
    record: &mut AgencyYearRecord,
    line: &str,
    ctx: &LineContext<'_>,
) -> Result<(), ClearanceError> {
    let tokens = tokenize(line);
    let expected = SLOT_MIN_TOKENS[ctx.slot];
    if tokens.len() < expected {
        return Err(ClearanceError::MalformedLine {
            path: ctx.path.to_path_buf(),
            line: ctx.line,
            slot: ctx.slot,
            expected,
            found: tokens.len(),
        });
    }

    match ctx.slot {
        0 => {
            record.state = Ori7::state_from_report_token(tokens[0]);
            record.ori7 = Ori7::from_report_token(tokens[0]);
            record.name = tokens[1..].join(" ");
        }
        1 => {
            let mos = parse_int(tokens[0]).map_err(|m| ctx.decode_error("mos", tokens[0], m))?;
            record.mos =
                u32::try_from(mos).map_err(|e| ctx.decode_error("mos", tokens[0], e.to_string()))?;
            for (i, crime) in CrimeType::ALL.into_iter().enumerate() {
                let token = tokens[COUNT_COLUMN_OFFSET + i];
                record.crimes[crime].count =
                    parse_int(token).map_err(|m| ctx.decode_error("count", token, m))?;
            }
        }
        2 => {
            record.population = parse_int(tokens[0])
                .map_err(|m| ctx.decode_error("population", tokens[0], m))?;
            for (i, crime) in CrimeType::ALL.into_iter().enumerate() {
                let token = tokens[COUNT_COLUMN_OFFSET + i];
                record.crimes[crime].cleared =
                    parse_int(token).map_err(|m| ctx.decode_error("cleared", token, m))?;
            }
        }
        _ => {
            for (i, crime) in CrimeType::ALL.into_iter().enumerate() {
                let token = tokens[PCT_COLUMN_OFFSET + i];
                record.crimes[crime].cleared_pct =
                    parse_pct(token).map_err(|m| ctx.decode_error("cleared_pct", token, m))?;
            }
        }
    }

    Ok(())
}

/// Parses an integer that may carry `,` thousands separators.
pub fn parse_int(token: &str) -> Result<i64, String> {
    let cleaned: String = token.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err("empty integer".into());
    }
    cleaned.parse::<i64>().map_err(|e| e.to_string())
}

/// Parses a printed percentage into a fraction (`"87.5"` -> `0.875`).
pub fn parse_pct(token: &str) -> Result<f64, String> {
    let value: f64 = token.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if !value.is_finite() {
        return Err("percentage is not a finite number".into());
    }
    Ok(value / 100.0)
}

/// Decodes a single line for the given slot into a fresh record.
///
/// Exposed for the fuzz targets.
#[cfg(feature = "fuzzing")]
pub fn fuzz_decode_line(slot: usize, line: &str) -> Result<AgencyYearRecord, ClearanceError> {
    let mut record = AgencyYearRecord::default();
    let ctx = LineContext {
        path: Path::new("<fuzz>"),
        line: 1,
        slot: slot % RECORD_LINES,
    };
    decode_slot(&mut record, line, &ctx)?;
    Ok(record)
}
