use indexmap::IndexMap;
use predql::ast::{ComparisonOperator, Expr, Identifier, Predicate};
use tracing::{debug, trace};

use crate::column_range::{ColumnRange, RangeOp};
use crate::config::AnalyzerConfig;
use crate::predicate::ConjunctFinder;

/// Turns predicate trees into column ranges.
#[derive(Debug, Clone, Default)]
pub struct RangeAnalyzer {
    config: AnalyzerConfig,
}

/// Analyze with the default configuration.
pub fn analyze(predicate: &Predicate) -> Option<ColumnRange> { RangeAnalyzer::default().analyze(predicate) }

impl RangeAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &AnalyzerConfig { &self.config }

    /// The range of a single column that is equivalent to `predicate`, or `None` if there is no such range:
    /// the predicate touches several columns, compares against something other than a constant, or uses a
    /// shape with no range form.
    pub fn analyze(&self, predicate: &Predicate) -> Option<ColumnRange> {
        let range = match predicate {
            Predicate::Comparison { left, operator, right } => self.analyze_comparison(predicate, left, *operator, right),
            Predicate::In { expr, list } => self.analyze_in_list(predicate, expr, list),
            Predicate::IsNull(expr) => Some(ColumnRange::from_is_null_condition(expr.as_identifier()?.clone(), predicate.clone())),
            Predicate::Not(inner) => self.analyze_negation(predicate, inner),
            Predicate::And(left, right) => self.analyze_junction(left, right, RangeOp::And),
            Predicate::Or(left, right) => self.analyze_junction(left, right, RangeOp::Or),
            Predicate::True | Predicate::False => None,
        };
        if range.is_none() {
            trace!("no range for {}", predicate);
        }
        range
    }

    /// [`ColumnRange::combine`], abandoning results larger than the configured segment limit.
    pub fn combine(&self, left: &ColumnRange, right: &ColumnRange, op: RangeOp) -> Option<ColumnRange> {
        self.bounded(ColumnRange::combine(left, right, op)?)
    }

    /// Split a conjunction into per-column ranges and the residual conjuncts that have to be evaluated as a filter.
    pub fn extract(&self, predicate: &Predicate) -> RangeExtraction {
        let mut ranges: IndexMap<Identifier, ColumnRange> = IndexMap::new();
        let mut residual = Vec::new();

        for conjunct in ConjunctFinder::find(predicate) {
            if conjunct == Predicate::True {
                continue;
            }
            let Some(range) = self.analyze(&conjunct) else {
                residual.push(conjunct);
                continue;
            };
            let merged = match ranges.get(range.column()) {
                Some(existing) => self.combine(existing, &range, RangeOp::And),
                None => Some(range),
            };
            match merged {
                Some(merged) => {
                    ranges.insert(merged.column().clone(), merged);
                }
                None => residual.push(conjunct),
            }
        }

        debug!("extracted ranges for {} column(s) with {} residual conjunct(s)", ranges.len(), residual.len());
        RangeExtraction { ranges, residual }
    }

    fn analyze_comparison(&self, source: &Predicate, left: &Expr, operator: ComparisonOperator, right: &Expr) -> Option<ColumnRange> {
        // normalize to `column <op> constant`
        let (column, operator, constant) = match (left, right) {
            (Expr::Identifier(column), Expr::Literal(constant)) => (column, operator, constant),
            (Expr::Literal(constant), Expr::Identifier(column)) => (column, operator.flip(), constant),
            _ => return None,
        };
        if operator == ComparisonOperator::NotEqual && !self.config.convert_not_equal {
            return None;
        }
        Some(ColumnRange::from_comparison_condition(column.clone(), operator, constant.clone(), source.clone()))
    }

    fn analyze_in_list(&self, source: &Predicate, expr: &Expr, list: &[Expr]) -> Option<ColumnRange> {
        let column = expr.as_identifier()?;
        if !self.config.admits_list(list.len()) {
            debug!("IN list on {} with {} items is too long to convert", column, list.len());
            return None;
        }
        let constants = list.iter().map(|item| item.as_literal().cloned()).collect::<Option<Vec<_>>>()?;
        self.bounded(ColumnRange::from_in_list_condition(column.clone(), constants, source.clone())?)
    }

    fn analyze_negation(&self, source: &Predicate, inner: &Predicate) -> Option<ColumnRange> {
        match inner {
            Predicate::IsNull(expr) => Some(ColumnRange::from_is_not_null_condition(expr.as_identifier()?.clone(), source.clone())),
            // NULL operands leave the comparison UNKNOWN either way, so negating the operator is exact
            Predicate::Comparison { left, operator, right } => self.analyze_comparison(source, left, operator.negate(), right),
            Predicate::In { expr, list } => {
                if !self.config.convert_not_equal {
                    return None;
                }
                let column = expr.as_identifier()?;
                // n distinct constants leave n + 1 segments
                if !self.config.admits_list(list.len()) {
                    debug!("NOT IN list on {} with {} items is too long to convert", column, list.len());
                    return None;
                }
                let mut excluded: Option<ColumnRange> = None;
                for item in list {
                    let constant = item.as_literal()?.clone();
                    let range = ColumnRange::from_comparison_condition(column.clone(), ComparisonOperator::NotEqual, constant, source.clone());
                    excluded = Some(match excluded {
                        None => range,
                        Some(excluded) => self.combine(&excluded, &range, RangeOp::And)?,
                    });
                }
                excluded
            }
            Predicate::Not(twice) => self.analyze(twice),
            _ => None,
        }
    }

    fn analyze_junction(&self, left: &Predicate, right: &Predicate, op: RangeOp) -> Option<ColumnRange> {
        let left = self.analyze(left)?;
        let right = self.analyze(right)?;
        self.combine(&left, &right, op)
    }

    fn bounded(&self, range: ColumnRange) -> Option<ColumnRange> {
        if self.config.within_limit(range.segments().len()) {
            Some(range)
        } else {
            debug!("range on {} has {} segments, more than the limit of {:?}", range.column(), range.segments().len(), self.config.max_segments);
            None
        }
    }
}

/// Per-column ranges extracted from a conjunction, in order of first appearance, plus what is left over.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExtraction {
    ranges: IndexMap<Identifier, ColumnRange>,
    residual: Vec<Predicate>,
}

impl RangeExtraction {
    pub fn ranges(&self) -> &IndexMap<Identifier, ColumnRange> { &self.ranges }

    pub fn range_for(&self, column: &Identifier) -> Option<&ColumnRange> { self.ranges.get(column) }

    /// Conjuncts that produced no range
    pub fn residual(&self) -> &[Predicate] { &self.residual }

    /// The residual conjuncts joined back with AND; `TRUE` when every conjunct became a range.
    pub fn residual_predicate(&self) -> Predicate { Predicate::conjunction(self.residual.iter().cloned()) }

    /// True when the conjunction can never hold.
    pub fn is_unsatisfiable(&self) -> bool { self.ranges.values().any(ColumnRange::is_empty) || self.residual.contains(&Predicate::False) }
}
