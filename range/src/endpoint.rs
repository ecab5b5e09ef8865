//! Interval endpoints and their precise comparison.
//!
//! An endpoint is either a concrete value with an inclusivity flag, or one of the sentinels that bracket the
//! value domain. NULL sorts below every value, so the domain of a column runs:
//!
//! ```text
//! LowerWild  <  Null{inclusive}  <  Null{exclusive}  <  values...  <  UpperWild
//! ```
//!
//! `Null { inclusive: false }` is "just above NULL", the natural start of `x < c`.

use std::cmp::Ordering;
use std::fmt::Display;

use predql::ast::Literal;
use predql::collation::Collatable;
use serde::{Deserialize, Serialize};

use crate::error::IllegalComparison;

/// The outcome of comparing two endpoints.
///
/// The `*Barely` variants report two endpoints at the same value that differ only in inclusivity: an inclusive
/// endpoint sits barely before an exclusive one at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOutcome {
    Lt,
    LtBarely,
    Gt,
    GtBarely,
    Eq,
    /// The endpoint values do not collate against each other
    Invalid,
}

impl ComparisonOutcome {
    /// Collapse the `*Barely` outcomes into plain `Lt` / `Gt`.
    pub fn normalize(self) -> Self {
        match self {
            ComparisonOutcome::LtBarely => ComparisonOutcome::Lt,
            ComparisonOutcome::GtBarely => ComparisonOutcome::Gt,
            other => other,
        }
    }

    pub fn ordering(self) -> Option<Ordering> {
        match self.normalize() {
            ComparisonOutcome::Lt => Some(Ordering::Less),
            ComparisonOutcome::Gt => Some(Ordering::Greater),
            ComparisonOutcome::Eq => Some(Ordering::Equal),
            _ => None,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            ComparisonOutcome::Lt => ComparisonOutcome::Gt,
            ComparisonOutcome::LtBarely => ComparisonOutcome::GtBarely,
            ComparisonOutcome::Gt => ComparisonOutcome::Lt,
            ComparisonOutcome::GtBarely => ComparisonOutcome::LtBarely,
            other => other,
        }
    }

    fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => ComparisonOutcome::Lt,
            Ordering::Equal => ComparisonOutcome::Eq,
            Ordering::Greater => ComparisonOutcome::Gt,
        }
    }

    // Same point, so only inclusivity can separate the endpoints
    fn by_inclusivity(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => ComparisonOutcome::LtBarely,
            (false, true) => ComparisonOutcome::GtBarely,
            _ => ComparisonOutcome::Eq,
        }
    }
}

/// One boundary of a range segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint<V = Literal> {
    /// Below everything, NULL included
    LowerWild,
    Null { inclusive: bool },
    Value { value: V, inclusive: bool },
    /// Above every value
    UpperWild,
}

impl<V> Endpoint<V> {
    pub const NULL_INCLUSIVE: Self = Endpoint::Null { inclusive: true };
    pub const NULL_EXCLUSIVE: Self = Endpoint::Null { inclusive: false };
    pub const NEGATIVE_UNBOUNDED: Self = Endpoint::LowerWild;
    pub const UPPER_WILD: Self = Endpoint::UpperWild;

    pub fn inclusive(value: V) -> Self { Endpoint::Value { value, inclusive: true } }
    pub fn exclusive(value: V) -> Self { Endpoint::Value { value, inclusive: false } }

    pub fn value(&self) -> Option<&V> {
        match self {
            Endpoint::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Wildcards count as inclusive: nothing lies beyond them.
    pub fn is_inclusive(&self) -> bool {
        match self {
            Endpoint::Null { inclusive } | Endpoint::Value { inclusive, .. } => *inclusive,
            Endpoint::LowerWild | Endpoint::UpperWild => true,
        }
    }

    pub fn is_upper_wild(&self) -> bool { matches!(self, Endpoint::UpperWild) }
    pub fn is_lower_wild(&self) -> bool { matches!(self, Endpoint::LowerWild) }
    pub fn is_null(&self) -> bool { matches!(self, Endpoint::Null { .. }) }

    /// The same endpoint with a different inclusivity. Wildcards are unaffected.
    pub fn with_inclusive(self, inclusive: bool) -> Self {
        match self {
            Endpoint::Null { .. } => Endpoint::Null { inclusive },
            Endpoint::Value { value, .. } => Endpoint::Value { value, inclusive },
            wild => wild,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Endpoint::LowerWild => 0,
            Endpoint::Null { .. } => 1,
            Endpoint::Value { .. } => 2,
            Endpoint::UpperWild => 3,
        }
    }
}

impl<V: Collatable> Endpoint<V> {
    pub fn compare_precisely(&self, other: &Self) -> ComparisonOutcome {
        match (self, other) {
            (Endpoint::Null { inclusive: a }, Endpoint::Null { inclusive: b }) => ComparisonOutcome::by_inclusivity(*a, *b),
            (Endpoint::Value { value: a, inclusive: a_incl }, Endpoint::Value { value: b, inclusive: b_incl }) => match a.collate(b) {
                None => ComparisonOutcome::Invalid,
                Some(Ordering::Equal) => ComparisonOutcome::by_inclusivity(*a_incl, *b_incl),
                Some(ordering) => ComparisonOutcome::from_ordering(ordering),
            },
            _ => ComparisonOutcome::from_ordering(self.rank().cmp(&other.rank())),
        }
    }

    /// A plain ordering for sorting. Incomparable values are an error rather than an arbitrary answer.
    pub fn compare_to(&self, other: &Self) -> Result<Ordering, IllegalComparison>
    where V: Display {
        self.compare_precisely(other)
            .ordering()
            .ok_or_else(|| IllegalComparison { left: self.describe_value(), right: other.describe_value() })
    }
}

impl<V: Display> Endpoint<V> {
    pub fn describe_value(&self) -> String {
        match self {
            Endpoint::LowerWild => "-∞".to_string(),
            Endpoint::Null { .. } => "NULL".to_string(),
            Endpoint::Value { value, .. } => value.to_string(),
            Endpoint::UpperWild => "+∞".to_string(),
        }
    }
}
