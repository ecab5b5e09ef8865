//! Intersection, union and normalization of segment lists.
//!
//! A normalized list is sorted by start and holds no two segments that overlap or touch. Every operation here
//! works on immutable inputs and builds a new list. Incomparable endpoints make the whole operation give up
//! (`IllegalComparison`, or `None` from `sort_and_combine`) instead of guessing at an order.

use std::cmp::Ordering;
use std::fmt::Display;

use predql::collation::Collatable;
use tracing::{trace, warn};

use crate::endpoint::{ComparisonOutcome, Endpoint};
use crate::error::IllegalComparison;
use crate::segment::Segment;

#[derive(Debug, Clone, Copy)]
enum Pick {
    Min,
    Max,
}

fn illegal<V: Display>(one: &Endpoint<V>, two: &Endpoint<V>) -> IllegalComparison {
    IllegalComparison { left: one.describe_value(), right: two.describe_value() }
}

/// Pick the earlier or later of two endpoints. At the same point with differing inclusivity the exclusive one
/// wins, since it is the tighter bound in either direction.
fn select<V: Collatable + Clone + Display>(one: &Endpoint<V>, two: &Endpoint<V>, pick: Pick) -> Result<Endpoint<V>, IllegalComparison> {
    Ok(match one.compare_precisely(two) {
        ComparisonOutcome::Invalid => return Err(illegal(one, two)),
        ComparisonOutcome::Eq => one.clone(),
        ComparisonOutcome::LtBarely | ComparisonOutcome::GtBarely => one.clone().with_inclusive(false),
        ComparisonOutcome::Lt => match pick {
            Pick::Min => one.clone(),
            Pick::Max => two.clone(),
        },
        ComparisonOutcome::Gt => match pick {
            Pick::Min => two.clone(),
            Pick::Max => one.clone(),
        },
    })
}

/// Intersect two segments. `Ok(None)` when they do not overlap, an error when their endpoints are incomparable.
pub fn and_range_segment<V: Collatable + Clone + Display>(
    left: &Segment<V>,
    right: &Segment<V>,
) -> Result<Option<Segment<V>>, IllegalComparison> {
    let start = select(left.start(), right.start(), Pick::Max)?;
    let end = select(left.end(), right.end(), Pick::Min)?;
    Ok(match start.compare_precisely(&end) {
        ComparisonOutcome::Lt => Some(Segment::new(start, end)),
        // (v, v) holds nothing
        ComparisonOutcome::Eq if start.is_inclusive() => Some(Segment::new(start, end)),
        ComparisonOutcome::Invalid => return Err(illegal(&start, &end)),
        _ => None,
    })
}

/// Pairwise intersection of two segment lists. The result is not normalized.
///
/// Fails as a whole if any pair of endpoints is incomparable.
pub fn and_ranges<V: Collatable + Clone + Display>(left: &[Segment<V>], right: &[Segment<V>]) -> Result<Vec<Segment<V>>, IllegalComparison> {
    let mut result = Vec::new();
    for l in left {
        for r in right {
            if let Some(segment) = and_range_segment(l, r)? {
                result.push(segment);
            }
        }
    }
    Ok(result)
}

/// Union of two segment lists. The result is not normalized.
pub fn or_ranges<V: Clone>(left: &[Segment<V>], right: &[Segment<V>]) -> Vec<Segment<V>> {
    let mut result = Vec::with_capacity(left.len() + right.len());
    result.extend_from_slice(left);
    result.extend_from_slice(right);
    result
}

/// Sort segments by start and merge the ones that overlap or touch.
///
/// Returns `None`, after logging a warning, if two starts cannot be ordered.
pub fn sort_and_combine<V: Collatable + Clone + Display>(segments: Vec<Segment<V>>) -> Option<Vec<Segment<V>>> {
    let sorted = match sort_by_start(segments) {
        Ok(sorted) => sorted,
        Err(e) => {
            warn!("unable to sort range segments: {}", e);
            return None;
        }
    };

    let mut combined: Vec<Segment<V>> = Vec::with_capacity(sorted.len());
    let mut previous: Option<Segment<V>> = None;
    for current in sorted {
        previous = Some(match previous.take() {
            None => current,
            Some(prev) => {
                if find_overlap(prev.end(), current.start(), true)? {
                    if find_overlap(prev.end(), current.end(), false)? {
                        // current lies entirely inside prev
                        prev
                    } else {
                        let (start, _) = prev.into_endpoints();
                        let (_, end) = current.into_endpoints();
                        Segment::new(start, end)
                    }
                } else {
                    combined.push(prev);
                    current
                }
            }
        });
    }
    combined.extend(previous);
    Some(combined)
}

/// Whether `low` reaches at least as far as `high`.
///
/// `loose` decides the case of `low` being an exclusive bound at the very point where an inclusive `high`
/// begins: `[a, v)` followed by `[v, b]` leaves no gap, so the starts check accepts it, while as an end bound
/// `v)` does not cover `v]`.
fn find_overlap<V: Collatable>(low: &Endpoint<V>, high: &Endpoint<V>, loose: bool) -> Option<bool> {
    match low.compare_precisely(high) {
        ComparisonOutcome::Gt | ComparisonOutcome::LtBarely => Some(true),
        ComparisonOutcome::GtBarely => Some(loose),
        ComparisonOutcome::Eq => Some(low.is_inclusive()),
        ComparisonOutcome::Lt => Some(false),
        ComparisonOutcome::Invalid => {
            trace!("incomparable endpoints while combining range segments");
            None
        }
    }
}

// Stable merge sort: `sort_by` requires a total order and may panic without one, while an
// incomparable pair here has to surface as an error.
fn sort_by_start<V: Collatable + Display>(mut segments: Vec<Segment<V>>) -> Result<Vec<Segment<V>>, IllegalComparison> {
    if segments.len() < 2 {
        return Ok(segments);
    }
    let back = segments.split_off(segments.len() / 2);
    let front = sort_by_start(segments)?;
    let back = sort_by_start(back)?;

    let mut merged = Vec::with_capacity(front.len() + back.len());
    let mut front = front.into_iter().peekable();
    let mut back = back.into_iter().peekable();
    loop {
        let from_back = match (front.peek(), back.peek()) {
            (Some(f), Some(b)) => f.start().compare_to(b.start())? == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if from_back { back.next() } else { front.next() });
    }
    Ok(merged)
}
