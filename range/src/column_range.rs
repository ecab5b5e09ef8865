use std::fmt::{self, Display, Formatter};

use predql::ast::{ComparisonOperator, Identifier, Literal, Predicate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algebra::{and_ranges, or_ranges, sort_and_combine};
use crate::segment::Segment;

/// How two column ranges are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeOp {
    And,
    Or,
}

/// The normalized segments matched on one column, together with the conditions they were derived from.
///
/// An empty segment list means no row can match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    column: Identifier,
    source_conditions: Vec<Predicate>,
    segments: Vec<Segment>,
}

impl ColumnRange {
    fn new(column: Identifier, source_conditions: Vec<Predicate>, segments: Vec<Segment>) -> Self {
        Self { column, source_conditions, segments }
    }

    pub fn from_comparison_condition(column: Identifier, operator: ComparisonOperator, constant: Literal, source: Predicate) -> Self {
        Self::new(column, vec![source], Segment::from_comparison(operator, constant))
    }

    /// One point per constant, normalized. `None` for an empty list or constants that do not collate together.
    pub fn from_in_list_condition(column: Identifier, constants: impl IntoIterator<Item = Literal>, source: Predicate) -> Option<Self> {
        let points: Vec<Segment> = constants.into_iter().map(Segment::point).collect();
        if points.is_empty() {
            debug!("empty IN list on {} is not a range", column);
            return None;
        }
        Some(Self::new(column, vec![source], sort_and_combine(points)?))
    }

    pub fn from_is_null_condition(column: Identifier, source: Predicate) -> Self { Self::new(column, vec![source], vec![Segment::only_null()]) }

    pub fn from_is_not_null_condition(column: Identifier, source: Predicate) -> Self {
        Self::new(column, vec![source], vec![Segment::not_null()])
    }

    /// Intersect or unite two ranges over the same column. Source conditions are merged in order, without
    /// duplicates. `None` for different columns or bounds that do not collate together.
    pub fn combine(left: &ColumnRange, right: &ColumnRange, op: RangeOp) -> Option<ColumnRange> {
        if left.column != right.column {
            debug!("cannot combine ranges over different columns {} and {}", left.column, right.column);
            return None;
        }
        let segments = match op {
            RangeOp::And => match and_ranges(&left.segments, &right.segments) {
                Ok(segments) => segments,
                Err(e) => {
                    debug!("cannot intersect ranges on {}: {}", left.column, e);
                    return None;
                }
            },
            RangeOp::Or => or_ranges(&left.segments, &right.segments),
        };
        let segments = sort_and_combine(segments)?;

        let mut source_conditions = left.source_conditions.clone();
        for condition in &right.source_conditions {
            if !source_conditions.contains(condition) {
                source_conditions.push(condition.clone());
            }
        }
        Some(Self::new(left.column.clone(), source_conditions, segments))
    }

    pub fn column(&self) -> &Identifier { &self.column }
    pub fn source_conditions(&self) -> &[Predicate] { &self.source_conditions }
    pub fn segments(&self) -> &[Segment] { &self.segments }

    /// No value, not even NULL, satisfies the range
    pub fn is_empty(&self) -> bool { self.segments.is_empty() }

    /// Exactly the non-NULL values, i.e. the range carries no restriction beyond `IS NOT NULL`
    pub fn is_full_non_null(&self) -> bool { self.segments == [Segment::not_null()] }

    /// Whether a column value falls in the range (`None` is NULL). `None` when it does not collate with the bounds.
    pub fn contains(&self, value: Option<&Literal>) -> Option<bool> {
        for segment in &self.segments {
            if segment.contains(value)? {
                return Some(true);
            }
        }
        Some(false)
    }

    pub fn describe_ranges(&self) -> String {
        if self.segments.is_empty() {
            return "empty".to_string();
        }
        self.segments.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" OR ")
    }
}

impl Display for ColumnRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "{}: {}", self.column, self.describe_ranges()) }
}
