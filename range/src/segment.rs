use std::fmt::{self, Display, Formatter};

use predql::ast::{ComparisonOperator, Literal};
use predql::collation::Collatable;
use serde::{Deserialize, Serialize};

use crate::endpoint::{ComparisonOutcome, Endpoint};

/// A contiguous interval of a column's domain, from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment<V = Literal> {
    start: Endpoint<V>,
    end: Endpoint<V>,
}

impl<V> Segment<V> {
    pub fn new(start: Endpoint<V>, end: Endpoint<V>) -> Self { Self { start, end } }

    /// `[NULL, NULL]`: matches exactly the NULLs
    pub fn only_null() -> Self { Self::new(Endpoint::NULL_INCLUSIVE, Endpoint::NULL_INCLUSIVE) }

    /// Every non-NULL value
    pub fn not_null() -> Self { Self::new(Endpoint::NULL_EXCLUSIVE, Endpoint::UPPER_WILD) }

    pub fn start(&self) -> &Endpoint<V> { &self.start }
    pub fn end(&self) -> &Endpoint<V> { &self.end }
    pub fn into_endpoints(self) -> (Endpoint<V>, Endpoint<V>) { (self.start, self.end) }

    /// True for a single point such as `[5, 5]` or `[NULL, NULL]`.
    pub fn is_single(&self) -> bool
    where V: PartialEq {
        self.start == self.end
    }
}

impl<V: Clone> Segment<V> {
    pub fn point(value: V) -> Self { Self::new(Endpoint::inclusive(value.clone()), Endpoint::inclusive(value)) }

    /// The segments matched by `column <op> value`.
    ///
    /// Comparisons never match NULL, so every lower bound starts just above it. `!=` yields the two segments on
    /// either side of the value.
    pub fn from_comparison(op: ComparisonOperator, value: V) -> Vec<Self> {
        match op {
            ComparisonOperator::Equal => vec![Self::point(value)],
            ComparisonOperator::LessThan => vec![Self::new(Endpoint::NULL_EXCLUSIVE, Endpoint::exclusive(value))],
            ComparisonOperator::LessThanOrEqual => vec![Self::new(Endpoint::NULL_EXCLUSIVE, Endpoint::inclusive(value))],
            ComparisonOperator::GreaterThan => vec![Self::new(Endpoint::exclusive(value), Endpoint::UPPER_WILD)],
            ComparisonOperator::GreaterThanOrEqual => vec![Self::new(Endpoint::inclusive(value), Endpoint::UPPER_WILD)],
            ComparisonOperator::NotEqual => vec![
                Self::new(Endpoint::NULL_EXCLUSIVE, Endpoint::exclusive(value.clone())),
                Self::new(Endpoint::exclusive(value), Endpoint::UPPER_WILD),
            ],
        }
    }
}

impl<V: Collatable + Clone> Segment<V> {
    /// Whether the segment holds `point` (`None` is NULL). `None` when the point does not collate with the bounds.
    pub fn contains(&self, point: Option<&V>) -> Option<bool> {
        let candidate = match point {
            Some(value) => Endpoint::inclusive(value.clone()),
            None => Endpoint::NULL_INCLUSIVE,
        };
        let after_start = match self.start.compare_precisely(&candidate) {
            ComparisonOutcome::Invalid => return None,
            ComparisonOutcome::Lt | ComparisonOutcome::LtBarely | ComparisonOutcome::Eq => true,
            ComparisonOutcome::Gt | ComparisonOutcome::GtBarely => false,
        };
        let before_end = match candidate.compare_precisely(&self.end) {
            ComparisonOutcome::Invalid => return None,
            ComparisonOutcome::Lt | ComparisonOutcome::Eq => true,
            ComparisonOutcome::LtBarely | ComparisonOutcome::Gt | ComparisonOutcome::GtBarely => false,
        };
        Some(after_start && before_end)
    }
}

/// Renders as `start <= % < end`, with `%` standing for the column. An open upper end is omitted.
impl<V: Display> Display for Segment<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} %", self.start.describe_value(), if self.start.is_inclusive() { "<=" } else { "<" })?;
        if !self.end.is_upper_wild() {
            write!(f, " {} {}", if self.end.is_inclusive() { "<=" } else { "<" }, self.end.describe_value())?;
        }
        Ok(())
    }
}
