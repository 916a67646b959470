//! Expression trees for query filters, ordering keys, limits and projections.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, Serializer};

/// Comparison and arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `=~` regular expression match
    Match,
    /// `!=~` negated regular expression match
    NotMatch,
    /// `in` membership test against an array
    In,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator `{0}`")]
pub struct UnknownOperator(pub String);

impl BinaryOp {
    pub const ALL: [BinaryOp; 14] = [
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::Match,
        BinaryOp::NotMatch,
        BinaryOp::In,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Match => "=~",
            BinaryOp::NotMatch => "!=~",
            BinaryOp::In => "in",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    /// True for operators that produce a boolean.
    pub fn is_comparison(self) -> bool {
        !matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }

    /// Binding strength used when rendering; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 5,
            BinaryOp::Add | BinaryOp::Sub => 4,
            _ => 3,
        }
    }
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            LogicalOp::And => 2,
            LogicalOp::Or => 1,
        }
    }
}

impl FromStr for BinaryOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl FromStr for LogicalOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(LogicalOp::And),
            "or" => Ok(LogicalOp::Or),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// A value-producing or boolean expression. Always a finite tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpression {
    /// Field access. `base: None` reads from the current object.
    Attr {
        base: Option<Box<QueryExpression>>,
        field: String,
    },
    Literal(Literal),
    Regexp {
        pattern: String,
        flags: String,
    },
    Array(Vec<QueryExpression>),
    Binary {
        op: BinaryOp,
        lhs: Box<QueryExpression>,
        rhs: Box<QueryExpression>,
    },
    Logical {
        op: LogicalOp,
        lhs: Box<QueryExpression>,
        rhs: Box<QueryExpression>,
    },
    Call {
        name: String,
        args: Vec<QueryExpression>,
    },
}

impl QueryExpression {
    /// Top-level attribute `name`.
    pub fn attr(field: impl Into<String>) -> Self {
        QueryExpression::Attr {
            base: None,
            field: field.into(),
        }
    }

    /// Field access on another expression: `base.field`.
    pub fn attr_of(base: QueryExpression, field: impl Into<String>) -> Self {
        QueryExpression::Attr {
            base: Some(Box::new(base)),
            field: field.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        QueryExpression::Literal(Literal::String(value.into()))
    }

    pub fn number(value: f64) -> Self {
        QueryExpression::Literal(Literal::Number(value))
    }

    pub fn binary(op: BinaryOp, lhs: QueryExpression, rhs: QueryExpression) -> Self {
        QueryExpression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn logical(op: LogicalOp, lhs: QueryExpression, rhs: QueryExpression) -> Self {
        QueryExpression::Logical {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `self and other`, used to fold repeated filters.
    pub fn and(self, other: QueryExpression) -> Self {
        QueryExpression::logical(LogicalOp::And, self, other)
    }

    /// Tag used in the JSON array shape.
    pub fn tag(&self) -> &'static str {
        match self {
            QueryExpression::Attr { .. } => "attr",
            QueryExpression::Literal(lit) => lit.tag(),
            QueryExpression::Regexp { .. } => "regexp",
            QueryExpression::Array(_) => "array",
            QueryExpression::Binary { op, .. } => op.as_str(),
            QueryExpression::Logical { op, .. } => op.as_str(),
            QueryExpression::Call { .. } => "call",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            QueryExpression::Binary { op, .. } => op.precedence(),
            QueryExpression::Logical { op, .. } => op.precedence(),
            _ => u8::MAX,
        }
    }
}

impl Literal {
    pub fn tag(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Number(_) => "number",
            Literal::Bool(_) => "boolean",
            Literal::Null => "null",
        }
    }
}

/// Integral numbers serialize as integers so `1` stays `1` in JSON.
enum JsonNumber {
    Int(i64),
    Float(f64),
}

impl JsonNumber {
    fn new(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
            JsonNumber::Int(value as i64)
        } else {
            JsonNumber::Float(value)
        }
    }
}

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonNumber::Int(n) => serializer.serialize_i64(*n),
            JsonNumber::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::String(s) => ("string", s).serialize(serializer),
            Literal::Number(n) => ("number", JsonNumber::new(*n)).serialize(serializer),
            Literal::Bool(b) => ("boolean", b).serialize(serializer),
            Literal::Null => ("null",).serialize(serializer),
        }
    }
}

impl Serialize for QueryExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryExpression::Attr { base: None, field } => ("attr", field).serialize(serializer),
            QueryExpression::Attr {
                base: Some(base),
                field,
            } => ("attr", base, field).serialize(serializer),
            QueryExpression::Literal(lit) => lit.serialize(serializer),
            QueryExpression::Regexp { pattern, flags } => {
                ("regexp", pattern, flags).serialize(serializer)
            }
            QueryExpression::Array(items) => ("array", items).serialize(serializer),
            QueryExpression::Binary { op, lhs, rhs } => {
                (op.as_str(), lhs, rhs).serialize(serializer)
            }
            QueryExpression::Logical { op, lhs, rhs } => {
                (op.as_str(), lhs, rhs).serialize(serializer)
            }
            QueryExpression::Call { name, args } => ("call", name, args).serialize(serializer),
        }
    }
}

pub(crate) fn format_number(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match JsonNumber::new(value) {
        JsonNumber::Int(n) => write!(f, "{n}"),
        JsonNumber::Float(n) => write!(f, "{n}"),
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
            Literal::Number(n) => format_number(*n, f),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Null => f.write_str("null"),
        }
    }
}

/// Renders back to query surface syntax, parenthesizing only where needed.
impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryExpression::Attr { base: None, field } => f.write_str(field),
            QueryExpression::Attr {
                base: Some(base),
                field,
            } => write!(f, "{base}.{field}"),
            QueryExpression::Literal(lit) => write!(f, "{lit}"),
            QueryExpression::Regexp { pattern, .. } => write!(f, "/{pattern}/"),
            QueryExpression::Array(items) => {
                f.write_str("[")?;
                write_list(items, f)?;
                f.write_str("]")
            }
            QueryExpression::Binary { op, lhs, rhs } => {
                write_infix(op.as_str(), op.precedence(), lhs, rhs, f)
            }
            QueryExpression::Logical { op, lhs, rhs } => {
                write_infix(op.as_str(), op.precedence(), lhs, rhs, f)
            }
            QueryExpression::Call { name, args } => {
                write!(f, "{name}(")?;
                write_list(args, f)?;
                f.write_str(")")
            }
        }
    }
}

fn write_list(items: &[QueryExpression], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_infix(
    op: &str,
    precedence: u8,
    lhs: &QueryExpression,
    rhs: &QueryExpression,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    // Operators are left-associative: the right operand needs parens on ties.
    if lhs.precedence() < precedence {
        write!(f, "({lhs})")?;
    } else {
        write!(f, "{lhs}")?;
    }
    write!(f, " {op} ")?;
    if rhs.precedence() <= precedence {
        write!(f, "({rhs})")
    } else {
        write!(f, "{rhs}")
    }
}
