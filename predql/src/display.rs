//! Render condition trees back to selection text. The output re-parses to the same tree, which is what plan
//! explain output and log messages rely on.

use std::fmt::{self, Display, Formatter, Write};

use crate::ast::{Expr, Identifier, Literal, Predicate};

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::I64(i) => write!(f, "{}", i),
            // `Display` for f64 never uses exponent notation; the grammar wants a fractional part
            Literal::F64(float) if float.is_finite() && float.fract() == 0.0 => write!(f, "{}.0", float),
            Literal::F64(float) => write!(f, "{}", float),
            Literal::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Literal::String(s) => {
                f.write_char('\'')?;
                for c in s.chars() {
                    match c {
                        '\'' => f.write_str("''")?, // Single quote -> doubled quote (SQL standard)
                        _ => f.write_char(c)?,
                    }
                }
                f.write_char('\'')
            }
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Property(name) => f.write_str(name),
            Identifier::CollectionProperty(collection, name) => write!(f, "{}.{}", collection, name),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Identifier(identifier) => identifier.fmt(f),
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                write_list(f, args)?;
                f.write_char(')')
            }
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison { left, operator, right } => write!(f, "{} {} {}", left, operator.symbol(), right),
            Predicate::IsNull(expr) => write!(f, "{} IS NULL", expr),
            Predicate::In { expr, list } => {
                write!(f, "{} IN (", expr)?;
                write_list(f, list)?;
                f.write_char(')')
            }
            Predicate::And(left, right) => {
                write_child(f, left, |p| matches!(p, Predicate::Or(..)))?;
                f.write_str(" AND ")?;
                write_child(f, right, |p| matches!(p, Predicate::Or(..) | Predicate::And(..)))
            }
            Predicate::Or(left, right) => {
                left.fmt(f)?;
                f.write_str(" OR ")?;
                write_child(f, right, |p| matches!(p, Predicate::Or(..)))
            }
            Predicate::Not(inner) => match inner.as_ref() {
                Predicate::IsNull(expr) => write!(f, "{} IS NOT NULL", expr),
                Predicate::In { expr, list } => {
                    write!(f, "{} NOT IN (", expr)?;
                    write_list(f, list)?;
                    f.write_char(')')
                }
                other => {
                    f.write_str("NOT ")?;
                    write_child(f, other, |p| matches!(p, Predicate::Or(..) | Predicate::And(..)))
                }
            },
            Predicate::True => f.write_str("true"),
            Predicate::False => f.write_str("false"),
        }
    }
}

fn write_list(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

fn write_child(f: &mut Formatter<'_>, child: &Predicate, needs_parens: impl Fn(&Predicate) -> bool) -> fmt::Result {
    if needs_parens(child) {
        write!(f, "({})", child)
    } else {
        child.fmt(f)
    }
}
