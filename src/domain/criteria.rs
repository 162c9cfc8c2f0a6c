//! Search criteria passed to managers.
//!
//! A [`Criteria`] carries a condition tree built from [`Criteria::compare`] and
//! [`Criteria::combine`], an optional sort order and a result slice. Managers
//! translate it into their storage query language; see
//! [`crate::infrastructure::persistence::sql`] for the PostgreSQL rendering.
//!
//! ```rust,ignore
//! let mut search = Criteria::new();
//! let expr = Criteria::combine(
//!     Combinator::And,
//!     vec![
//!         Criteria::compare(Operator::Eq, "product.lists.parentid", vec![1_i64, 2]),
//!         Criteria::compare(Operator::Eq, "product.lists.domain", vec!["text", "media"]),
//!     ],
//! );
//! search.set_conditions(expr);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default number of items returned by a search.
pub const DEFAULT_LIMIT: u64 = 100;

/// Errors raised while building criteria from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),

    #[error("unknown combination operator '{0}'")]
    UnknownCombinator(String),

    #[error("sort key must not be empty")]
    EmptySortKey,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`, or "any of" for list values.
    Eq,
    /// `!=`, or "none of" for list values.
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `=~`, prefix match on strings.
    Like,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Like => "=~",
        }
    }
}

impl FromStr for Operator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "=~" => Ok(Operator::Like),
            other => Err(CriteriaError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical operators joining several expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl FromStr for Combinator {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "&&" => Ok(Combinator::And),
            "||" => Ok(Combinator::Or),
            other => Err(CriteriaError::UnknownCombinator(other.to_string())),
        }
    }
}

/// A value on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<Value>),
}

impl Value {
    /// Returns a short name of the value kind, used in error details.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// Orders two scalar values of the same kind.
    ///
    /// Returns `None` for lists, nulls and mixed kinds.
    pub fn partial_cmp_scalar(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(v: &[T]) -> Self {
        Value::List(v.iter().cloned().map(Into::into).collect())
    }
}

/// A node of the condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Matches every item.
    All,
    Compare {
        op: Operator,
        key: String,
        value: Value,
    },
    Combine {
        op: Combinator,
        exprs: Vec<Expr>,
    },
    Not(Box<Expr>),
}

impl Expr {
    /// Returns the attribute keys referenced by the expression, in tree order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a str>) {
        match self {
            Expr::All => {}
            Expr::Compare { key, .. } => keys.push(key),
            Expr::Combine { exprs, .. } => exprs.iter().for_each(|e| e.collect_keys(keys)),
            Expr::Not(inner) => inner.collect_keys(keys),
        }
    }

    /// Evaluates the expression against an item.
    ///
    /// `lookup` resolves an attribute key to the item's value, returning `None`
    /// for keys the item does not have. Unknown keys never match.
    pub fn matches<F>(&self, lookup: &F) -> bool
    where
        F: Fn(&str) -> Option<Value>,
    {
        match self {
            Expr::All => true,
            Expr::Compare { op, key, value } => match lookup(key) {
                Some(actual) => compare(*op, &actual, value),
                None => false,
            },
            Expr::Combine {
                op: Combinator::And,
                exprs,
            } => exprs.iter().all(|e| e.matches(lookup)),
            Expr::Combine {
                op: Combinator::Or,
                exprs,
            } => exprs.is_empty() || exprs.iter().any(|e| e.matches(lookup)),
            Expr::Not(inner) => !inner.matches(lookup),
        }
    }
}

fn compare(op: Operator, actual: &Value, expected: &Value) -> bool {
    match (op, expected) {
        (Operator::Eq, Value::List(values)) => values.iter().any(|v| v == actual),
        (Operator::Ne, Value::List(values)) => values.iter().all(|v| v != actual),
        (Operator::Eq, v) => v == actual,
        (Operator::Ne, v) => v != actual,
        (Operator::Like, Value::String(prefix)) => {
            matches!(actual, Value::String(s) if s.starts_with(prefix.as_str()))
        }
        (Operator::Like, _) => false,
        (op, v) => match actual.partial_cmp_scalar(v) {
            Some(ord) => match op {
                Operator::Lt => ord == Ordering::Less,
                Operator::Le => ord != Ordering::Greater,
                Operator::Gt => ord == Ordering::Greater,
                Operator::Ge => ord != Ordering::Less,
                _ => false,
            },
            None => false,
        },
    }
}

/// Sort direction of a [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One entry of the sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub key: String,
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }
}

/// Search criteria: conditions, sort order and slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    conditions: Expr,
    sort: Vec<SortKey>,
    offset: u64,
    limit: u64,
}

impl Default for Criteria {
    fn default() -> Self {
        Self::new()
    }
}

impl Criteria {
    /// Creates criteria matching everything, unsorted, with the default slice.
    pub fn new() -> Self {
        Self {
            conditions: Expr::All,
            sort: Vec::new(),
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Builds a comparison between an attribute key and a value.
    pub fn compare(op: Operator, key: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::Compare {
            op,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Joins expressions with a logical operator.
    ///
    /// A single expression is returned unchanged and an empty list yields
    /// [`Expr::All`]. [`Expr::All`] operands are dropped under `And` and
    /// absorb the whole expression under `Or`.
    pub fn combine(op: Combinator, exprs: Vec<Expr>) -> Expr {
        if op == Combinator::Or && exprs.contains(&Expr::All) {
            return Expr::All;
        }

        let mut exprs: Vec<Expr> = exprs.into_iter().filter(|e| *e != Expr::All).collect();
        match exprs.len() {
            0 => Expr::All,
            1 => exprs.remove(0),
            _ => Expr::Combine { op, exprs },
        }
    }

    pub fn not(expr: Expr) -> Expr {
        Expr::Not(Box::new(expr))
    }

    pub fn set_conditions(&mut self, expr: Expr) -> &mut Self {
        self.conditions = expr;
        self
    }

    pub fn conditions(&self) -> &Expr {
        &self.conditions
    }

    pub fn set_sort(&mut self, sort: Vec<SortKey>) -> &mut Self {
        self.sort = sort;
        self
    }

    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn set_slice(&mut self, offset: u64, limit: u64) -> &mut Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Returns `(offset, limit)`.
    pub fn slice(&self) -> (u64, u64) {
        (self.offset, self.limit)
    }

    /// Parses a comma separated sort string such as `-product.ctime,product.id`.
    ///
    /// A leading `-` sorts descending, a leading `+` or no prefix ascending.
    pub fn parse_sort(raw: &str) -> Result<Vec<SortKey>, CriteriaError> {
        raw.split(',')
            .map(str::trim)
            .map(|part| {
                let (direction, key) = match part.strip_prefix('-') {
                    Some(key) => (Direction::Desc, key),
                    None => (Direction::Asc, part.strip_prefix('+').unwrap_or(part)),
                };
                if key.is_empty() {
                    return Err(CriteriaError::EmptySortKey);
                }
                Ok(SortKey {
                    key: key.to_string(),
                    direction,
                })
            })
            .collect()
    }
}
