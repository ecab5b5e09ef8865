//! Range-segment algebra for single-column predicates.
//!
//! Comparisons, IN-lists and NULL tests on one column, and AND/OR trees of them, are turned into a normalized
//! list of disjoint intervals that can drive an index range scan. Anything that has no exact range form is
//! reported as `None` and left to the filter.

pub mod algebra;
pub mod analyzer;
pub mod column_range;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod predicate;
pub mod scan;
pub mod segment;

pub use algebra::*;
pub use analyzer::*;
pub use column_range::*;
pub use config::*;
pub use endpoint::*;
pub use error::*;
pub use predicate::*;
pub use scan::*;
pub use segment::*;
