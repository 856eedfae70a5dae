#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use ucr_clearance::model::{AgencyYearRecord, ClearanceCounts, CrimeTable, CrimeType, Ori7};

pub const SECTION_HEADER: [&str; 4] = [
    "                   CLEARANCE RATE DATA FOR INDEX OFFENSES",
    " AGENCY",
    " MOS  POPULATION     VIOLENT  PROPERTY  MURDER  RAPE  ROBBERY  ASSAULT  BURGLARY  LARCENY  MVT  ARSON",
    " ---------------------------------------------------------------------------------------------------",
];

pub const END_OF_DATA: &str = "  READ";

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Formats an integer with `,` thousands separators, as the report does.
pub fn with_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Prints a percentage held in tenths (`875` -> `"87.5"`).
pub fn pct_text(tenths: u32) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

fn arb_counts() -> impl Strategy<Value = ClearanceCounts> {
    (0i64..200_000, 0i64..200_000, 0u32..=1000).prop_map(|(count, cleared, tenths)| {
        ClearanceCounts {
            count,
            cleared,
            cleared_pct: pct_text(tenths).parse::<f64>().unwrap() / 100.0,
        }
    })
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z]{1,10}", 1..4).prop_map(|words| words.join(" "))
}

/// Records with alphabetic-leading identifiers, as decoded for `year`.
pub fn arb_record(year: u16) -> BoxedStrategy<AgencyYearRecord> {
    (
        "[A-Z]{2}[0-9]{5}",
        arb_name(),
        0u32..=12,
        0i64..5_000_000,
        prop::collection::vec(arb_counts(), CrimeType::COUNT),
    )
        .prop_map(move |(ori7, name, mos, population, counts)| {
            let mut crimes = CrimeTable::<ClearanceCounts>::default();
            for (crime, value) in CrimeType::ALL.into_iter().zip(counts) {
                crimes[crime] = value;
            }
            AgencyYearRecord {
                year,
                state: ori7[..2].to_string(),
                ori7: Ori7::new(ori7),
                name,
                mos,
                population,
                crimes,
            }
        })
        .boxed()
}

pub fn arb_records(year: u16, max: usize) -> BoxedStrategy<Vec<AgencyYearRecord>> {
    prop::collection::vec(arb_record(year), 0..max).boxed()
}

/// The four report lines of one record.
pub fn record_lines(record: &AgencyYearRecord) -> [String; 4] {
    let counts: Vec<String> = record
        .crimes
        .iter()
        .map(|(_, c)| with_thousands(c.count))
        .collect();
    let cleared: Vec<String> = record
        .crimes
        .iter()
        .map(|(_, c)| with_thousands(c.cleared))
        .collect();
    let pcts: Vec<String> = record
        .crimes
        .iter()
        .map(|(_, c)| format!("{:.1}", c.cleared_pct * 100.0))
        .collect();

    [
        format!("{} {}", record.ori7, record.name),
        format!(" {:>2}  OFFENSES KNOWN  {}", record.mos, counts.join("  ")),
        format!(
            " {:>9}  CLEARED OFFENSES  {}",
            with_thousands(record.population),
            cleared.join("  ")
        ),
        format!(" PERCENT  {}", pcts.join("  ")),
    ]
}

/// Renders records as a report, starting a new page every `page_size`
/// records.
pub fn render_report(records: &[AgencyYearRecord], page_size: usize) -> String {
    let mut lines = vec!["UNIFORM CRIME REPORTING PROGRAM".to_string()];
    lines.extend(SECTION_HEADER.iter().map(|l| l.to_string()));
    for (i, record) in records.iter().enumerate() {
        if i > 0 && i % page_size.max(1) == 0 {
            lines.extend(SECTION_HEADER.iter().map(|l| l.to_string()));
        }
        lines.extend(record_lines(record));
    }
    lines.push(format!("{}     {} AGENCIES", END_OF_DATA, records.len()));
    lines.join("\n") + "\n"
}

/// Renders records with a page break between the lines of one record.
///
/// `split_after` is the number of lines of record `index` printed before
/// the break.
pub fn render_report_with_split(
    records: &[AgencyYearRecord],
    index: usize,
    split_after: usize,
) -> String {
    let mut lines = vec!["UNIFORM CRIME REPORTING PROGRAM".to_string()];
    lines.extend(SECTION_HEADER.iter().map(|l| l.to_string()));
    for (i, record) in records.iter().enumerate() {
        for (slot, line) in record_lines(record).into_iter().enumerate() {
            if i == index && slot == split_after {
                lines.extend(SECTION_HEADER.iter().map(|l| l.to_string()));
            }
            lines.push(line);
        }
    }
    lines.push(END_OF_DATA.to_string());
    lines.join("\n") + "\n"
}
