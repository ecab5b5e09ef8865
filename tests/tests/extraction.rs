mod common;

use anyhow::Result;
use common::*;
use predql::ast::{Identifier, Literal};
use predql::filter::{evaluate, evaluate_predicate, Filterable};
use predql::parse_selection;
use predql_range::{AnalyzerConfig, ColumnRange, KeyBound, KeyRange, RangeAnalyzer, ScanPlan};
use serde_json::json;

fn column(name: &str) -> Identifier { Identifier::Property(name.to_string()) }

fn rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for x in [None, Some(0), Some(2), Some(3), Some(4), Some(5), Some(9)] {
        for y in [None, Some("a"), Some("b")] {
            for z in [None, Some(1i64), Some(3)] {
                let mut row = Row::x(x);
                if let Some(y) = y {
                    row = row.with("y", y);
                }
                if let Some(z) = z {
                    row = row.with("z", z);
                }
                rows.push(row);
            }
        }
    }
    rows
}

#[test]
fn ranges_and_residual_reproduce_the_predicate() -> Result<()> {
    let inputs = [
        "x >= 2 AND x < 5 AND y = 'a' AND (z = 1 OR z = 2)",
        "x IS NOT NULL AND y != 'b' AND x != 3",
        "(x = 0 OR x = 9) AND z IN (1, 2) AND abs(z) = 1",
        "y IS NULL AND x > 2 AND NOT x IN (4, 5) AND x = z",
    ];
    let analyzer = RangeAnalyzer::default();
    for input in inputs {
        let predicate = parse_selection(input)?;
        let extraction = analyzer.extract(&predicate);
        let residual = extraction.residual_predicate();

        for row in rows() {
            let in_ranges = extraction.ranges().values().all(|range| range.contains(row.value(range.column()).as_ref()) == Some(true));
            // unsupported calls are errors, which reject the row either way
            let expected = evaluate_predicate(&row, &predicate).unwrap_or(false);
            let actual = in_ranges && evaluate(&row, &residual).map(|r| r == Some(true)).unwrap_or(false);
            assert_eq!(actual, expected, "{} on {:?}", input, row);
        }
    }
    Ok(())
}

#[test]
fn mixed_types_stay_in_the_residual() -> Result<()> {
    let extraction = RangeAnalyzer::default().extract(&parse_selection("x > 1 AND x < 2.5 AND y = 'a'")?);
    assert!(!extraction.is_unsatisfiable());
    assert_eq!(extraction.range_for(&column("x")).map(ColumnRange::describe_ranges), Some("1 < %".to_string()));
    assert_eq!(extraction.residual_predicate().to_string(), "x < 2.5");
    assert!(!ScanPlan::from_column_range(extraction.range_for(&column("x")).expect("x has a range")).ranges().is_empty());

    // the filter reports these as incomparable
    let row = Row::x(Some(2)).with("y", "a");
    assert!(evaluate_predicate(&row, &parse_selection("x < 2.5")?).is_err());
    Ok(())
}

#[test]
fn extraction_keeps_column_order() -> Result<()> {
    let extraction = RangeAnalyzer::default().extract(&parse_selection("b > 1 AND a = 2 AND b < 5 AND a IS NOT NULL")?);
    let columns: Vec<&Identifier> = extraction.ranges().keys().collect();
    assert_eq!(columns, vec![&column("b"), &column("a")]);
    assert_eq!(extraction.range_for(&column("b")).map(ColumnRange::describe_ranges), Some("1 < % < 5".to_string()));
    assert_eq!(extraction.range_for(&column("a")).map(|r| r.source_conditions().len()), Some(2));
    assert!(extraction.residual().is_empty());
    Ok(())
}

#[test]
fn scan_plan_for_extracted_column() -> Result<()> {
    let analyzer = RangeAnalyzer::new(AnalyzerConfig::default().with_not_equal(false));
    let extraction = analyzer.extract(&parse_selection("(x < 0 OR x >= 10) AND x != 20 AND y = 'k'")?);
    assert_eq!(extraction.residual_predicate().to_string(), "x != 20");

    let plan = ScanPlan::from_column_range(extraction.range_for(&column("x")).expect("x has a range"));
    assert_eq!(plan.ranges(), &[
        KeyRange::new(KeyBound::Null { inclusive: false }, KeyBound::Exclusive(Literal::I64(0))),
        KeyRange::new(KeyBound::Inclusive(Literal::I64(10)), KeyBound::Unbounded),
    ]);
    assert_eq!(plan.covering(), Some(KeyRange::new(KeyBound::Null { inclusive: false }, KeyBound::Unbounded)));
    assert!(ScanPlan::from_column_range(extraction.range_for(&column("y")).expect("y has a range")).is_point_lookup());
    Ok(())
}

#[test]
fn scan_plans_serialize() -> Result<()> {
    let range = predql_range::analyze(&parse_selection("x IS NULL OR x > 2.5")?).expect("convertible");
    let plan = ScanPlan::from_column_range(&range);
    let encoded = serde_json::to_value(&plan)?;
    assert_eq!(
        encoded,
        json!({ "Ranges": [
            { "lower": { "Null": { "inclusive": true } }, "upper": { "Null": { "inclusive": true } } },
            { "lower": { "Exclusive": { "F64": 2.5 } }, "upper": "Unbounded" }
        ]})
    );
    assert_eq!(serde_json::from_value::<ScanPlan>(encoded)?, plan);
    assert_eq!(serde_json::to_value(ScanPlan::<Literal>::Empty)?, json!("Empty"));

    let decoded: ColumnRange = serde_json::from_str(&serde_json::to_string(&range)?)?;
    assert_eq!(decoded, range);
    Ok(())
}
