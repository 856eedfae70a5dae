//! The record assembler: a line-oriented state machine over a report.
//!
//! ```text
//! SeekingFirstSection --(section break)--> ReadingRecord(0)
//! ReadingRecord(i) --(decoded slot i)--> ReadingRecord((i + 1) % 4)
//! ReadingRecord(i) --(end of data)--> Done
//! ```
//!
//! Before a line is decoded, a section break causes that line and the
//! three column-header lines after it to be dropped; the line that follows
//! takes its place. A record is yielded only once its fourth line has been
//! decoded, so a record cut short by the end-of-data sentinel never
//! escapes.

use std::io::BufRead;
use std::mem;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::decode::{decode_slot, LineContext, RECORD_LINES};
use super::line::{classify, LineKind};
use crate::error::ClearanceError;
use crate::model::AgencyYearRecord;

/// Column-header lines printed after every section break.
const HEADER_LINES_AFTER_BREAK: usize = 3;

/// Sequential reader over report lines that tracks 1-based line numbers.
pub struct LineCursor<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }

    /// Reads the next line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, ClearanceError> {
        let mut buf = String::new();
        let read = self.reader.read_line(&mut buf).map_err(ClearanceError::Io)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }

    /// Number of the last line returned by [`LineCursor::next_line`].
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    SeekingFirstSection,
    ReadingRecord(usize),
    Done,
}

/// A line waiting to be consumed, with its line number.
struct PendingLine {
    number: usize,
    text: String,
}

/// Iterator over the agency records of one report.
///
/// The parser owns the cursor; nothing else advances it. After the first
/// error the iterator is exhausted.
pub struct ReportParser<R> {
    cursor: LineCursor<R>,
    path: PathBuf,
    year: u16,
    state: State,
    pending: Option<PendingLine>,
    partial: AgencyYearRecord,
}

impl<R: BufRead> ReportParser<R> {
    /// Creates a parser for the report of `year` read from `reader`.
    ///
    /// `path` is only used in error messages.
    pub fn new(reader: R, year: u16, path: impl AsRef<Path>) -> Self {
        Self {
            cursor: LineCursor::new(reader),
            path: path.as_ref().to_path_buf(),
            year,
            state: State::SeekingFirstSection,
            pending: None,
            partial: Self::empty_record(year),
        }
    }

    fn empty_record(year: u16) -> AgencyYearRecord {
        AgencyYearRecord {
            year,
            ..Default::default()
        }
    }

    fn fetch(&mut self) -> Result<Option<PendingLine>, ClearanceError> {
        Ok(self.cursor.next_line()?.map(|text| PendingLine {
            number: self.cursor.line_number(),
            text,
        }))
    }

    /// Reads up to and including the first section break.
    fn seek_first_section(&mut self) -> Result<(), ClearanceError> {
        while let Some(line) = self.fetch()? {
            if classify(&line.text) == LineKind::SectionBreak {
                self.pending = Some(line);
                self.state = State::ReadingRecord(0);
                return Ok(());
            }
        }
        Err(ClearanceError::MissingSectionBreak {
            path: self.path.clone(),
        })
    }

    /// Drops the column headers after a section break and returns the line
    /// that follows them.
    fn skip_section_headers(&mut self) -> Result<Option<PendingLine>, ClearanceError> {
        for _ in 0..HEADER_LINES_AFTER_BREAK {
            if self.fetch()?.is_none() {
                return Ok(None);
            }
        }
        self.fetch()
    }

    /// Handles physical end of input while in `slot`.
    fn finish_at_eof(&mut self, slot: usize) -> Result<Option<AgencyYearRecord>, ClearanceError> {
        self.state = State::Done;
        if slot == 0 {
            warn!(
                "Report {} ended at line {} without an end-of-data marker",
                self.path.display(),
                self.cursor.line_number()
            );
            return Ok(None);
        }
        Err(ClearanceError::TruncatedReport {
            path: self.path.clone(),
            line: self.cursor.line_number(),
            slot,
        })
    }

    fn advance(&mut self) -> Result<Option<AgencyYearRecord>, ClearanceError> {
        loop {
            let slot = match self.state {
                State::Done => return Ok(None),
                State::SeekingFirstSection => {
                    self.seek_first_section()?;
                    continue;
                }
                State::ReadingRecord(slot) => slot,
            };

            let Some(mut line) = self.pending.take() else {
                return self.finish_at_eof(slot);
            };

            while classify(&line.text) == LineKind::SectionBreak {
                match self.skip_section_headers()? {
                    Some(next) => line = next,
                    None => return self.finish_at_eof(slot),
                }
            }

            if classify(&line.text) == LineKind::EndOfData {
                if slot != 0 {
                    debug!(
                        "Discarding partial record {} at end of data ({} of {} lines read)",
                        self.partial.ori7, slot, RECORD_LINES
                    );
                }
                self.state = State::Done;
                return Ok(None);
            }

            let ctx = LineContext {
                path: &self.path,
                line: line.number,
                slot,
            };
            decode_slot(&mut self.partial, &line.text, &ctx)?;

            self.pending = self.fetch()?;

            if slot + 1 < RECORD_LINES {
                self.state = State::ReadingRecord(slot + 1);
                continue;
            }

            self.state = State::ReadingRecord(0);
            let record = mem::replace(&mut self.partial, Self::empty_record(self.year));
            debug!(
                "Parsed record for {} ({}), {}",
                record.ori7, record.name, record.year
            );
            return Ok(Some(record));
        }
    }
}

impl<R: BufRead> Iterator for ReportParser<R> {
    type Item = Result<AgencyYearRecord, ClearanceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}
