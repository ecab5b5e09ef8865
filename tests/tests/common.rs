use std::collections::BTreeMap;

use predql::ast::{ComparisonOperator, Expr, Identifier, Literal, Predicate};
use predql::filter::Filterable;
use proptest::prelude::*;
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }

/// A row of named column values; absent columns are NULL.
#[derive(Debug, Clone, Default)]
pub struct Row(pub BTreeMap<String, Literal>);

impl Row {
    #[allow(unused)]
    pub fn with(mut self, column: &str, value: impl Into<Literal>) -> Self {
        self.0.insert(column.to_string(), value.into());
        self
    }

    #[allow(unused)]
    pub fn x(value: Option<i64>) -> Self {
        match value {
            Some(value) => Row::default().with("x", value),
            None => Row::default(),
        }
    }
}

impl Filterable for Row {
    fn value(&self, column: &Identifier) -> Option<Literal> { self.0.get(column.name()).cloned() }
}

#[allow(unused)]
pub fn x() -> Identifier { Identifier::Property("x".to_string()) }

// Small domain so that bounds collide often
#[allow(unused)]
pub const DOMAIN: std::ops::RangeInclusive<i64> = -6..=6;

#[allow(unused)]
pub fn arb_value() -> impl Strategy<Value = i64> { -5i64..=5 }

#[allow(unused)]
pub fn arb_operator() -> impl Strategy<Value = ComparisonOperator> {
    prop_oneof![
        Just(ComparisonOperator::Equal),
        Just(ComparisonOperator::NotEqual),
        Just(ComparisonOperator::LessThan),
        Just(ComparisonOperator::LessThanOrEqual),
        Just(ComparisonOperator::GreaterThan),
        Just(ComparisonOperator::GreaterThanOrEqual),
    ]
}

/// Conditions on column `x` that always have a range form
#[allow(unused)]
pub fn arb_leaf() -> impl Strategy<Value = Predicate> {
    let column = || Expr::Identifier(x());
    let constant = |v: i64| Expr::Literal(Literal::I64(v));
    prop_oneof![
        (arb_operator(), arb_value()).prop_map(move |(op, v)| Predicate::comparison(column(), op, constant(v))),
        (arb_operator(), arb_value()).prop_map(move |(op, v)| Predicate::comparison(constant(v), op, column())),
        (arb_operator(), arb_value()).prop_map(move |(op, v)| Predicate::not(Predicate::comparison(column(), op, constant(v)))),
        prop::collection::vec(arb_value(), 1..4).prop_map(move |list| Predicate::In {
            expr: Box::new(column()),
            list: list.into_iter().map(constant).collect()
        }),
        prop::collection::vec(arb_value(), 1..3).prop_map(move |list| Predicate::not(Predicate::In {
            expr: Box::new(column()),
            list: list.into_iter().map(constant).collect()
        })),
        Just(Predicate::IsNull(Box::new(column()))),
        Just(Predicate::not(Predicate::IsNull(Box::new(column())))),
    ]
}

/// AND/OR trees over [`arb_leaf`]
#[allow(unused)]
pub fn arb_column_predicate() -> impl Strategy<Value = Predicate> {
    arb_leaf().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Predicate::and(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Predicate::or(l, r)),
        ]
    })
}

/// Every value of the domain, plus NULL
#[allow(unused)]
pub fn samples() -> impl Iterator<Item = Option<i64>> { std::iter::once(None).chain(DOMAIN.map(Some)) }
