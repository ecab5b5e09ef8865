//! Property checks of the range algebra against direct predicate evaluation.

mod common;

use common::*;
use predql::ast::{Literal, Predicate};
use predql::filter::evaluate_predicate;
use predql_range::{analyze, and_range_segment, or_ranges, sort_and_combine, ColumnRange, Endpoint, RangeAnalyzer, RangeOp, Segment};
use proptest::prelude::*;

fn arb_start() -> impl Strategy<Value = Endpoint<i64>> {
    prop_oneof![
        Just(Endpoint::NEGATIVE_UNBOUNDED),
        Just(Endpoint::NULL_INCLUSIVE),
        Just(Endpoint::NULL_EXCLUSIVE),
        (arb_value(), any::<bool>()).prop_map(|(value, inclusive)| Endpoint::Value { value, inclusive }),
    ]
}

fn arb_end() -> impl Strategy<Value = Endpoint<i64>> {
    prop_oneof![
        Just(Endpoint::NULL_INCLUSIVE),
        Just(Endpoint::UPPER_WILD),
        (arb_value(), any::<bool>()).prop_map(|(value, inclusive)| Endpoint::Value { value, inclusive }),
    ]
}

/// Non-empty segments over a small integer domain
fn arb_segment() -> impl Strategy<Value = Segment<i64>> {
    (arb_start(), arb_end())
        .prop_map(|(start, end)| Segment::new(start, end))
        .prop_filter("segment must hold something", |segment| matches!(and_range_segment(segment, segment), Ok(Some(_))))
}

fn members(segments: &[Segment<i64>]) -> Vec<Option<i64>> {
    samples().filter(|sample| segments.iter().any(|s| s.contains(sample.as_ref()) == Some(true))).collect()
}

fn matches(range: &ColumnRange, sample: Option<i64>) -> bool {
    range.contains(sample.map(Literal::I64).as_ref()).expect("integer bounds always collate")
}

proptest! {
    #[test]
    fn membership_agrees_with_evaluation(predicate in arb_column_predicate()) {
        let Some(range) = RangeAnalyzer::new(predql_range::AnalyzerConfig::unbounded()).analyze(&predicate) else {
            return Ok(());
        };
        for sample in samples() {
            let expected = evaluate_predicate(&Row::x(sample), &predicate).unwrap();
            prop_assert_eq!(matches(&range, sample), expected, "{} at {:?} gave {}", predicate, sample, range);
        }
    }

    #[test]
    fn leaves_always_convert(predicate in arb_leaf()) {
        prop_assert!(analyze(&predicate).is_some(), "{}", predicate);
    }

    #[test]
    fn sort_and_combine_preserves_members(segments in prop::collection::vec(arb_segment(), 0..6)) {
        let combined = sort_and_combine(segments.clone()).unwrap();
        prop_assert_eq!(members(&combined), members(&segments));
        // normalized output is disjoint: re-combining any neighbours changes nothing
        for pair in combined.windows(2) {
            prop_assert_eq!(sort_and_combine(pair.to_vec()).unwrap(), pair.to_vec());
        }
    }

    #[test]
    fn sort_and_combine_is_idempotent(segments in prop::collection::vec(arb_segment(), 0..6)) {
        let once = sort_and_combine(segments).unwrap();
        prop_assert_eq!(sort_and_combine(once.clone()).unwrap(), once);
    }

    #[test]
    fn combine_is_commutative(left in arb_column_predicate(), right in arb_column_predicate()) {
        let analyzer = RangeAnalyzer::new(predql_range::AnalyzerConfig::unbounded());
        let (Some(left), Some(right)) = (analyzer.analyze(&left), analyzer.analyze(&right)) else {
            return Ok(());
        };
        for op in [RangeOp::And, RangeOp::Or] {
            let forward = ColumnRange::combine(&left, &right, op).unwrap();
            let backward = ColumnRange::combine(&right, &left, op).unwrap();
            prop_assert_eq!(forward.segments(), backward.segments());
        }
    }

    #[test]
    fn or_with_itself_is_identity(predicate in arb_column_predicate()) {
        let Some(range) = analyze(&predicate) else {
            return Ok(());
        };
        let doubled = sort_and_combine(or_ranges(range.segments(), range.segments())).unwrap();
        prop_assert_eq!(doubled.as_slice(), range.segments());
        let or_self = ColumnRange::combine(&range, &range, RangeOp::Or).unwrap();
        prop_assert_eq!(or_self.segments(), range.segments());
        let and_self = ColumnRange::combine(&range, &range, RangeOp::And).unwrap();
        prop_assert_eq!(and_self.segments(), range.segments());
    }

    #[test]
    fn conjunction_is_order_independent(
        (ordered, shuffled) in prop::collection::vec(arb_leaf(), 1..5).prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let analyzer = RangeAnalyzer::new(predql_range::AnalyzerConfig::unbounded());
        let forward = analyzer.analyze(&Predicate::conjunction(ordered)).unwrap();
        let reordered = analyzer.analyze(&Predicate::conjunction(shuffled)).unwrap();
        prop_assert_eq!(forward.segments(), reordered.segments());
    }

    #[test]
    fn cross_type_constants_never_combine(number in any::<i64>(), text in "[a-z]{0,6}") {
        let input = format!("x = {} OR x = '{}'", number, text);
        prop_assert!(analyze(&predql::parse_selection(&input).unwrap()).is_none());

        let int = Endpoint::inclusive(Literal::I64(number));
        let string = Endpoint::inclusive(Literal::String(text));
        prop_assert_eq!(int.compare_precisely(&string), predql_range::ComparisonOutcome::Invalid);
        prop_assert!(int.compare_to(&string).is_err());
    }
}
