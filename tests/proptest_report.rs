use proptest::prelude::*;
use ucr_clearance::medians::median;
use ucr_clearance::model::io_records_csv::{from_records_csv_str, to_records_csv_string};
use ucr_clearance::model::PopulationBucket;
use ucr_clearance::report::from_report_str;
use ucr_clearance::ClearanceError;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn rendered_report_decodes_to_same_records(
        records in proptest_helpers::arb_records(2013, 12),
        page_size in 1usize..6,
    ) {
        let text = proptest_helpers::render_report(&records, page_size);
        let decoded = from_report_str(&text, 2013).expect("decode report");
        prop_assert_eq!(decoded, records);
    }

    #[test]
    fn page_break_inside_record_is_transparent(
        records in proptest_helpers::arb_records(2012, 8).prop_filter("non-empty", |r| !r.is_empty()),
        index_seed in any::<usize>(),
        split_after in 0usize..4,
    ) {
        let index = index_seed % records.len();
        let text = proptest_helpers::render_report_with_split(&records, index, split_after);
        let decoded = from_report_str(&text, 2012).expect("decode report");
        prop_assert_eq!(decoded, records);
    }

    #[test]
    fn decoding_is_idempotent(records in proptest_helpers::arb_records(2011, 8)) {
        let text = proptest_helpers::render_report(&records, 3);
        let first = from_report_str(&text, 2011).expect("first pass");
        let second = from_report_str(&text, 2011).expect("second pass");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn end_of_data_drops_partial_record(
        records in proptest_helpers::arb_records(2013, 8).prop_filter("non-empty", |r| !r.is_empty()),
        kept_lines in 1usize..4,
    ) {
        let mut text = proptest_helpers::render_report(&records[..records.len() - 1], 100);
        // cut the sentinel off and append part of the last record before it
        let sentinel_at = text.rfind(proptest_helpers::END_OF_DATA).expect("sentinel");
        text.truncate(sentinel_at);
        let last = proptest_helpers::record_lines(&records[records.len() - 1]);
        for line in &last[..kept_lines] {
            text.push_str(line);
            text.push('\n');
        }
        text.push_str(proptest_helpers::END_OF_DATA);
        text.push('\n');

        let decoded = from_report_str(&text, 2013).expect("decode report");
        prop_assert_eq!(&decoded[..], &records[..records.len() - 1]);
    }

    #[test]
    fn eof_inside_record_is_truncation(
        records in proptest_helpers::arb_records(2013, 6).prop_filter("non-empty", |r| !r.is_empty()),
        kept_lines in 1usize..4,
    ) {
        let text = proptest_helpers::render_report(&records, 100);
        let mut lines: Vec<&str> = text.lines().collect();
        // drop the sentinel and the tail of the last record
        lines.truncate(lines.len() - 1 - (4 - kept_lines));
        let cut = lines.join("\n") + "\n";

        let result = from_report_str(&cut, 2013);
        let is_truncated = matches!(result, Err(ClearanceError::TruncatedReport { slot, .. }) if slot == kept_lines);
        prop_assert!(is_truncated);
    }

    #[test]
    fn records_csv_round_trip(records in proptest_helpers::arb_records(2012, 10)) {
        let csv = to_records_csv_string(&records).expect("write csv");
        let restored = from_records_csv_str(&csv).expect("read csv");
        prop_assert_eq!(restored, records);
    }

    #[test]
    fn median_lies_within_range(mut values in prop::collection::vec(-1e9f64..1e9, 1..50)) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let m = median(&mut values).expect("non-empty");
        prop_assert!(m >= min && m <= max);
    }

    #[test]
    fn median_ignores_input_order(values in prop::collection::vec(0i64..1_000_000, 1..40)) {
        let mut forward: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        let mut reversed: Vec<f64> = forward.iter().rev().copied().collect();
        prop_assert_eq!(median(&mut forward), median(&mut reversed));
    }

    #[test]
    fn every_positive_population_has_exactly_one_bucket(population in 1i64..50_000_000) {
        let matching = PopulationBucket::ALL
            .iter()
            .filter(|bucket| bucket.contains(population))
            .count();
        prop_assert_eq!(matching, 1);
        prop_assert!(PopulationBucket::classify(population).is_some());
    }
}
