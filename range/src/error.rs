use thiserror::Error;

/// Two endpoints whose values do not collate against each other were asked for an ordering.
///
/// Only sorting needs a total answer; everywhere else the same situation is reported as
/// [`ComparisonOutcome::Invalid`](crate::endpoint::ComparisonOutcome::Invalid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal comparison between range endpoints {left} and {right}")]
pub struct IllegalComparison {
    pub left: String,
    pub right: String,
}
