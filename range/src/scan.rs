//! Lowering of normalized segments into index scan keys.
//!
//! Engines with an ordered key space take start/stop keys with open/closed flags. NULLs occupy the bottom of
//! the key space, so a `Null` bound is distinct from an unbounded one: `Unbounded` as a lower bound includes the
//! NULLs, `Null { inclusive: false }` starts right after them.

use predql::ast::Literal;
use serde::{Deserialize, Serialize};

use crate::column_range::ColumnRange;
use crate::endpoint::Endpoint;
use crate::segment::Segment;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyBound<V = Literal> {
    Unbounded,
    Null { inclusive: bool },
    Inclusive(V),
    Exclusive(V),
}

impl<V> From<Endpoint<V>> for KeyBound<V> {
    fn from(endpoint: Endpoint<V>) -> Self {
        match endpoint {
            Endpoint::LowerWild | Endpoint::UpperWild => KeyBound::Unbounded,
            Endpoint::Null { inclusive } => KeyBound::Null { inclusive },
            Endpoint::Value { value, inclusive: true } => KeyBound::Inclusive(value),
            Endpoint::Value { value, inclusive: false } => KeyBound::Exclusive(value),
        }
    }
}

/// One contiguous key range to scan (PG: a single ScanKey interval)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange<V = Literal> {
    pub lower: KeyBound<V>,
    pub upper: KeyBound<V>,
}

impl<V> KeyRange<V> {
    pub fn new(lower: KeyBound<V>, upper: KeyBound<V>) -> Self { Self { lower, upper } }

    /// A range holding exactly one key (or only the NULLs)
    pub fn is_point(&self) -> bool
    where V: PartialEq {
        match (&self.lower, &self.upper) {
            (KeyBound::Inclusive(lower), KeyBound::Inclusive(upper)) => lower == upper,
            (KeyBound::Null { inclusive: true }, KeyBound::Null { inclusive: true }) => true,
            _ => false,
        }
    }
}

impl<V: Clone> From<&Segment<V>> for KeyRange<V> {
    fn from(segment: &Segment<V>) -> Self { Self::new(segment.start().clone().into(), segment.end().clone().into()) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanPlan<V = Literal> {
    /// Nothing can match; skip the scan entirely
    Empty,
    /// Disjoint ranges in ascending key order
    Ranges(Vec<KeyRange<V>>),
}

impl<V: Clone> ScanPlan<V> {
    pub fn from_segments(segments: &[Segment<V>]) -> Self {
        if segments.is_empty() {
            ScanPlan::Empty
        } else {
            ScanPlan::Ranges(segments.iter().map(KeyRange::from).collect())
        }
    }

    pub fn ranges(&self) -> &[KeyRange<V>] {
        match self {
            ScanPlan::Empty => &[],
            ScanPlan::Ranges(ranges) => ranges,
        }
    }

    /// The single range from the first start key to the last stop key, for engines that can only scan one
    /// interval and filter the gaps.
    pub fn covering(&self) -> Option<KeyRange<V>> {
        let ranges = self.ranges();
        let (first, last) = (ranges.first()?, ranges.last()?);
        Some(KeyRange::new(first.lower.clone(), last.upper.clone()))
    }

    pub fn is_point_lookup(&self) -> bool
    where V: PartialEq {
        !self.ranges().is_empty() && self.ranges().iter().all(KeyRange::is_point)
    }
}

impl ScanPlan {
    pub fn from_column_range(range: &ColumnRange) -> Self { Self::from_segments(range.segments()) }
}
