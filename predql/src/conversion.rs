use crate::ast::{Expr, Literal, Predicate};
use crate::error::ParseError;
use crate::parser;
use std::convert::TryFrom;

impl<'a> TryFrom<&'a str> for Predicate {
    type Error = ParseError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parser::parse_selection(value) }
}
impl TryFrom<String> for Predicate {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> { parser::parse_selection(&value) }
}

impl Expr {
    /// The constant this expression denotes, if it is a literal.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&crate::ast::Identifier> {
        match self {
            Expr::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }
}
