//! Line classification for the fixed-layout report.

/// Header printed at the top of every page of the report.
pub const SECTION_BREAK: &str = "CLEARANCE RATE DATA FOR INDEX OFFENSES";

/// Sentinel that follows the last agency record.
pub const END_OF_DATA: &str = "  READ";

/// What a raw report line is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Page header; followed by three column-header lines.
    SectionBreak,
    /// No further records follow.
    EndOfData,
    /// An ordinary line belonging to a record.
    Data,
}

/// Classifies a line by substring match, so surrounding boilerplate on the
/// same line does not matter.
pub fn classify(line: &str) -> LineKind {
    if line.contains(SECTION_BREAK) {
        LineKind::SectionBreak
    } else if line.contains(END_OF_DATA) {
        LineKind::EndOfData
    } else {
        LineKind::Data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_break_with_boilerplate() {
        let line = "   TABLE 1      CLEARANCE RATE DATA FOR INDEX OFFENSES     PAGE 12";
        assert_eq!(classify(line), LineKind::SectionBreak);
    }

    #[test]
    fn test_end_of_data() {
        assert_eq!(classify("  READ"), LineKind::EndOfData);
        assert_eq!(classify("      READ THE NOTES BEFORE USING"), LineKind::EndOfData);
    }

    #[test]
    fn test_data_lines() {
        assert_eq!(classify("0AL00100 BIRMINGHAM"), LineKind::Data);
        assert_eq!(classify(""), LineKind::Data);
        // A single space before READ is not the sentinel.
        assert_eq!(classify(" READ"), LineKind::Data);
    }

    #[test]
    fn test_section_break_takes_precedence() {
        let line = "  READ  CLEARANCE RATE DATA FOR INDEX OFFENSES";
        assert_eq!(classify(line), LineKind::SectionBreak);
    }
}
