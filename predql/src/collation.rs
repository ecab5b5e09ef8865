use std::cmp::Ordering;

use crate::ast::Literal;

/// Trait for constant types that can be ordered against each other.
///
/// Collation is partial: two values whose types cannot be meaningfully compared collate to `None`
/// rather than being coerced into a common type.
pub trait Collatable {
    /// Compare two values in the collation order, or `None` if they are not comparable
    fn collate(&self, other: &Self) -> Option<Ordering>;
}

// Strict collation: only literals of the same variant compare.
impl Collatable for Literal {
    fn collate(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Literal::I64(a), Literal::I64(b)) => Some(a.cmp(b)),
            (Literal::F64(a), Literal::F64(b)) => a.partial_cmp(b), // NaN is not comparable
            (Literal::Bool(a), Literal::Bool(b)) => Some(a.cmp(b)),
            (Literal::String(a), Literal::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl Collatable for i64 {
    fn collate(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
