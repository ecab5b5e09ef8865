pub mod ast;
pub mod collation;
mod conversion;
mod display;
pub mod error;
pub mod filter;
pub mod grammar;
pub mod parser;

pub use parser::parse_selection;
