use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    Call { name: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    I64(i64),
    F64(f64),
    Bool(bool),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    Property(String),
    CollectionProperty(String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Comparison { left: Box<Expr>, operator: ComparisonOperator, right: Box<Expr> },
    IsNull(Box<Expr>),
    In { expr: Box<Expr>, list: Vec<Expr> },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    Equal,              // =
    NotEqual,           // <> or !=
    GreaterThan,        // >
    GreaterThanOrEqual, // >=
    LessThan,           // <
    LessThanOrEqual,    // <=
}

impl ComparisonOperator {
    /// The operator to use when the operands trade places: `5 < x` is `x > 5`.
    pub fn flip(self) -> Self {
        match self {
            ComparisonOperator::GreaterThan => ComparisonOperator::LessThan,
            ComparisonOperator::GreaterThanOrEqual => ComparisonOperator::LessThanOrEqual,
            ComparisonOperator::LessThan => ComparisonOperator::GreaterThan,
            ComparisonOperator::LessThanOrEqual => ComparisonOperator::GreaterThanOrEqual,
            ComparisonOperator::Equal | ComparisonOperator::NotEqual => self,
        }
    }

    /// The operator matching exactly the non-null values this one rejects.
    pub fn negate(self) -> Self {
        match self {
            ComparisonOperator::Equal => ComparisonOperator::NotEqual,
            ComparisonOperator::NotEqual => ComparisonOperator::Equal,
            ComparisonOperator::GreaterThan => ComparisonOperator::LessThanOrEqual,
            ComparisonOperator::GreaterThanOrEqual => ComparisonOperator::LessThan,
            ComparisonOperator::LessThan => ComparisonOperator::GreaterThanOrEqual,
            ComparisonOperator::LessThanOrEqual => ComparisonOperator::GreaterThan,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
        }
    }
}

impl Identifier {
    /// The bare property name, without any collection qualifier.
    pub fn name(&self) -> &str {
        match self {
            Identifier::Property(name) | Identifier::CollectionProperty(_, name) => name,
        }
    }
}

impl Predicate {
    pub fn and(left: Predicate, right: Predicate) -> Self { Predicate::And(Box::new(left), Box::new(right)) }
    pub fn or(left: Predicate, right: Predicate) -> Self { Predicate::Or(Box::new(left), Box::new(right)) }
    pub fn not(inner: Predicate) -> Self { Predicate::Not(Box::new(inner)) }

    pub fn comparison(left: Expr, operator: ComparisonOperator, right: Expr) -> Self {
        Predicate::Comparison { left: Box::new(left), operator, right: Box::new(right) }
    }

    /// Join predicates with AND, left to right. An empty input is `TRUE`.
    pub fn conjunction(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        predicates.into_iter().reduce(Predicate::and).unwrap_or(Predicate::True)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self { Literal::String(value.to_string()) }
}
impl From<String> for Literal {
    fn from(value: String) -> Self { Literal::String(value) }
}
impl From<i64> for Literal {
    fn from(value: i64) -> Self { Literal::I64(value) }
}
impl From<i32> for Literal {
    fn from(value: i32) -> Self { Literal::I64(value as i64) }
}
impl From<f64> for Literal {
    fn from(value: f64) -> Self { Literal::F64(value) }
}
impl From<bool> for Literal {
    fn from(value: bool) -> Self { Literal::Bool(value) }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self { Expr::Literal(value) }
}

impl From<Identifier> for Expr {
    fn from(value: Identifier) -> Self { Expr::Identifier(value) }
}
