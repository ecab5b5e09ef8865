//! Evaluate a predicate directly against a record. This is the path taken when a predicate (or part of one) could
//! not be turned into index ranges - or to validate a range scan with residual filtering.

use std::cmp::Ordering;

use crate::ast::{ComparisonOperator, Expr, Identifier, Literal, Predicate};
use crate::collation::Collatable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("cannot compare {left} with {right}")]
    Incomparable { left: Literal, right: Literal },
    #[error("function calls are not supported in filters: {0}")]
    UnsupportedCall(String),
}

pub trait Filterable {
    /// The value of a column, or `None` when it is NULL.
    fn value(&self, column: &Identifier) -> Option<Literal>;
}

fn evaluate_expr<R: Filterable>(record: &R, expr: &Expr) -> Result<Option<Literal>, Error> {
    match expr {
        Expr::Literal(literal) => Ok(Some(literal.clone())),
        Expr::Identifier(identifier) => Ok(record.value(identifier)),
        Expr::Call { name, .. } => Err(Error::UnsupportedCall(name.clone())),
    }
}

fn compare(left: &Literal, right: &Literal) -> Result<Ordering, Error> {
    left.collate(right).ok_or_else(|| Error::Incomparable { left: left.clone(), right: right.clone() })
}

/// Evaluate a predicate as a WHERE clause: rows for which the predicate is UNKNOWN are rejected.
pub fn evaluate_predicate<R: Filterable>(record: &R, predicate: &Predicate) -> Result<bool, Error> {
    Ok(evaluate(record, predicate)? == Some(true))
}

/// Three-valued evaluation; `None` is SQL UNKNOWN.
pub fn evaluate<R: Filterable>(record: &R, predicate: &Predicate) -> Result<Option<bool>, Error> {
    match predicate {
        Predicate::Comparison { left, operator, right } => {
            let (Some(left_val), Some(right_val)) = (evaluate_expr(record, left)?, evaluate_expr(record, right)?) else {
                return Ok(None);
            };
            let ordering = compare(&left_val, &right_val)?;
            Ok(Some(match operator {
                ComparisonOperator::Equal => ordering == Ordering::Equal,
                ComparisonOperator::NotEqual => ordering != Ordering::Equal,
                ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
                ComparisonOperator::GreaterThanOrEqual => ordering != Ordering::Less,
                ComparisonOperator::LessThan => ordering == Ordering::Less,
                ComparisonOperator::LessThanOrEqual => ordering != Ordering::Greater,
            }))
        }
        Predicate::In { expr, list } => {
            let Some(value) = evaluate_expr(record, expr)? else {
                return Ok(None);
            };
            let mut saw_null = false;
            for item in list {
                match evaluate_expr(record, item)? {
                    Some(candidate) if compare(&value, &candidate)? == Ordering::Equal => return Ok(Some(true)),
                    Some(_) => {}
                    None => saw_null = true,
                }
            }
            Ok(if saw_null { None } else { Some(false) })
        }
        Predicate::IsNull(expr) => Ok(Some(evaluate_expr(record, expr)?.is_none())),
        Predicate::And(left, right) => Ok(match (evaluate(record, left)?, evaluate(record, right)?) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        }),
        Predicate::Or(left, right) => Ok(match (evaluate(record, left)?, evaluate(record, right)?) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        }),
        Predicate::Not(inner) => Ok(evaluate(record, inner)?.map(|b| !b)),
        Predicate::True => Ok(Some(true)),
        Predicate::False => Ok(Some(false)),
    }
}
