use crate::ast;
use crate::error::ParseError;
use crate::grammar::{self, Rule};
use pest::iterators::Pair;
use pest::Parser;

/// Parse a selection expression into a predicate AST.
/// The selection must be a single boolean condition built from comparisons, IN lists, IS [NOT] NULL tests,
/// NOT, AND and OR.
pub fn parse_selection(input: &str) -> Result<ast::Predicate, ParseError> {
    let pairs = grammar::PredqlParser::parse(Rule::Selection, input)?;

    // Selection is silent, so the first pair is the top-level Expr (followed by EOI)
    let expr = pairs.into_iter().next().ok_or(ParseError::EmptyExpression)?;
    if expr.as_rule() != Rule::Expr {
        return Err(ParseError::UnexpectedRule { expected: "Expr", got: expr.as_rule() });
    }

    parse_expr(expr)
}

/// Expr is a disjunction of conjunctions; fold each level left to right.
fn parse_expr(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    let mut result: Option<ast::Predicate> = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::Or => continue,
            Rule::Conjunction => {
                let conjunction = parse_conjunction(inner)?;
                result = Some(match result {
                    Some(left) => ast::Predicate::or(left, conjunction),
                    None => conjunction,
                });
            }
            other => return Err(ParseError::UnexpectedRule { expected: "Conjunction or Or", got: other }),
        }
    }
    result.ok_or(ParseError::EmptyExpression)
}

fn parse_conjunction(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    let mut result: Option<ast::Predicate> = None;
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::And {
            continue;
        }
        let operand = parse_unary(inner)?;
        result = Some(match result {
            Some(left) => ast::Predicate::and(left, operand),
            None => operand,
        });
    }
    result.ok_or(ParseError::MissingOperand("conjunction"))
}

fn parse_unary(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    match pair.as_rule() {
        Rule::Negation => {
            // Negation = { Not ~ Unary }
            let inner = pair.into_inner().find(|p| p.as_rule() != Rule::Not).ok_or(ParseError::MissingOperand("NOT"))?;
            Ok(ast::Predicate::not(parse_unary(inner)?))
        }
        Rule::ExpressionInParentheses => {
            let inner = pair.into_inner().next().ok_or(ParseError::EmptyExpression)?;
            parse_expr(inner)
        }
        Rule::Comparison => parse_comparison(pair),
        Rule::InList => parse_in_list(pair),
        Rule::IsNullTest => parse_is_null(pair),
        Rule::True => Ok(ast::Predicate::True),
        Rule::False => Ok(ast::Predicate::False),
        other => Err(ParseError::UnexpectedRule { expected: "condition", got: other }),
    }
}

fn parse_comparison(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    let mut inner = pair.into_inner();
    let left = parse_operand(inner.next().ok_or(ParseError::MissingOperand("left"))?)?;
    let op = inner.next().ok_or(ParseError::MissingOperand("operator"))?;
    let operator = match op.as_rule() {
        Rule::Eq => ast::ComparisonOperator::Equal,
        Rule::NotEq => ast::ComparisonOperator::NotEqual,
        Rule::Gt => ast::ComparisonOperator::GreaterThan,
        Rule::GtEq => ast::ComparisonOperator::GreaterThanOrEqual,
        Rule::Lt => ast::ComparisonOperator::LessThan,
        Rule::LtEq => ast::ComparisonOperator::LessThanOrEqual,
        other => return Err(ParseError::UnexpectedRule { expected: "comparison operator", got: other }),
    };
    let right = parse_operand(inner.next().ok_or(ParseError::MissingOperand("right"))?)?;
    Ok(ast::Predicate::comparison(left, operator, right))
}

fn parse_in_list(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    let mut negated = false;
    let mut expr = None;
    let mut list = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::Not => negated = true,
            Rule::In => {}
            _ if expr.is_none() => expr = Some(parse_operand(inner)?),
            _ => list.push(parse_operand(inner)?),
        }
    }
    let expr = expr.ok_or(ParseError::MissingOperand("IN"))?;
    let predicate = ast::Predicate::In { expr: Box::new(expr), list };
    Ok(if negated { ast::Predicate::not(predicate) } else { predicate })
}

fn parse_is_null(pair: Pair<Rule>) -> Result<ast::Predicate, ParseError> {
    let mut negated = false;
    let mut expr = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::Not => negated = true,
            Rule::Is | Rule::Null => {}
            _ => expr = Some(parse_operand(inner)?),
        }
    }
    let expr = expr.ok_or(ParseError::MissingOperand("IS NULL"))?;
    let predicate = ast::Predicate::IsNull(Box::new(expr));
    Ok(if negated { ast::Predicate::not(predicate) } else { predicate })
}

fn parse_operand(pair: Pair<Rule>) -> Result<ast::Expr, ParseError> {
    match pair.as_rule() {
        Rule::Integer => {
            let text = pair.as_str();
            text.parse::<i64>()
                .map(|i| ast::Expr::Literal(ast::Literal::I64(i)))
                .map_err(|e| ParseError::InvalidLiteral { text: text.to_string(), reason: e.to_string() })
        }
        Rule::Float => {
            let text = pair.as_str();
            text.parse::<f64>()
                .map(|f| ast::Expr::Literal(ast::Literal::F64(f)))
                .map_err(|e| ParseError::InvalidLiteral { text: text.to_string(), reason: e.to_string() })
        }
        Rule::SingleQuotedString => {
            let text = pair.as_str();
            // Strip the surrounding quotes and collapse '' escapes
            let unquoted = &text[1..text.len() - 1];
            Ok(ast::Expr::Literal(ast::Literal::String(unquoted.replace("''", "'"))))
        }
        Rule::True => Ok(ast::Expr::Literal(ast::Literal::Bool(true))),
        Rule::False => Ok(ast::Expr::Literal(ast::Literal::Bool(false))),
        Rule::Call => {
            let mut inner = pair.into_inner();
            let name = inner.next().ok_or(ParseError::MissingOperand("function name"))?.as_str().to_string();
            let args = inner.map(parse_operand).collect::<Result<Vec<_>, _>>()?;
            Ok(ast::Expr::Call { name, args })
        }
        Rule::IdentifierWithOptionalContinuation => {
            let mut inner = pair.into_inner();
            let first = inner.next().ok_or(ParseError::MissingOperand("identifier"))?.as_str().to_string();
            match inner.next() {
                Some(continuation) => {
                    let property = continuation.into_inner().next().ok_or(ParseError::MissingOperand("property"))?.as_str().to_string();
                    Ok(ast::Expr::Identifier(ast::Identifier::CollectionProperty(first, property)))
                }
                None => Ok(ast::Expr::Identifier(ast::Identifier::Property(first))),
            }
        }
        other => Err(ParseError::UnexpectedRule { expected: "operand", got: other }),
    }
}
