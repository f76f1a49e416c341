use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use crate::EvalError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A resolved cell value. This is what operations consume and produce,
/// distinct from the raw literals callers submit (those are parsed into
/// `Value`s at evaluation time).
///
/// Errors are ordinary values: an operation may *return* `#DIV/0!` as its
/// result, and that error then flows through the pass cache into any
/// dependent cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Array(Vec<Value>), // one-dimensional sequences (sum/criteria ranges)
    Empty,             // missing literal / blank cell

    Error(EvalError),
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Int(i) => i.hash(state),
            Value::Number(n) => n.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Boolean(b) => b.hash(state),
            Value::Array(a) => a.hash(state),
            Value::Empty => state.write_u8(0),
            Value::Error(e) => e.hash(state),
        }
    }
}

impl Eq for Value {}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Error(e) => write!(f, "{e}"),
            Value::Array(a) => write!(f, "{a:?}"),
            Value::Empty => write!(f, ""),
        }
    }
}

impl Value {
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Error(_) => false,
            Value::Empty => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Borrow the elements of an `Array`, or `None` for any scalar.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}
