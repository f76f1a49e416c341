//! Evaluation-error representation shared by the registry and the engine.
//!
//! - **`EvalErrorKind`** : the canonical set of failure codes
//! - **`EvalError`**     : kind + optional message + optional cell
//!
//! `Display` renders the short spreadsheet-style code (`#DIV/0!`, `#CIRC!`,
//! …) followed by the message, which is what callers receive in their
//! `error` field.

use std::{error::Error, fmt};

use crate::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// All recognised failure codes.
///
/// **Note:** names are CamelCase (idiomatic Rust) while `Display` renders
/// the wire codes (`#NAME?`, `#VALUE!`, …).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// Missing required submission fields; rejected before batch entry.
    Validation,
    /// Operation name not present in the registry.
    UnknownOp,
    /// Arity or argument-type failure inside an operation.
    Value,
    Div,
    Num,
    /// The whole batch failed: its dependency graph contains a cycle.
    Circular,
    /// Caller-side ceiling elapsed; non-authoritative.
    Timeout,
    /// Pending entry displaced by a newer submission for the same cell.
    Cancelled,
    /// Catch-all for entries the resolver never visited.
    Internal,
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validation => "#VALIDATION!",
            Self::UnknownOp => "#NAME?",
            Self::Value => "#VALUE!",
            Self::Div => "#DIV/0!",
            Self::Num => "#NUM!",
            Self::Circular => "#CIRC!",
            Self::Timeout => "#TIMEOUT!",
            Self::Cancelled => "#CANCELLED!",
            Self::Internal => "#ERROR!",
        })
    }
}

impl EvalErrorKind {
    /// Inverse of `Display`. Unrecognised codes map to `Internal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "#validation!" => Self::Validation,
            "#name?" => Self::UnknownOp,
            "#value!" => Self::Value,
            "#div/0!" => Self::Div,
            "#num!" => Self::Num,
            "#circ!" => Self::Circular,
            "#timeout!" => Self::Timeout,
            "#cancelled!" => Self::Cancelled,
            _ => Self::Internal,
        }
    }
}

/// The single error struct the API passes around.
///
/// * **kind**    – the mandatory failure code
/// * **message** – optional human explanation
/// * **cell**    – the cell the failure is attributed to, when known
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: Option<String>,
    pub cell: Option<String>,
}

/* ───────────────────── Constructors & helpers ─────────────────────── */

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            message: None,
            cell: None,
        }
    }
}

impl EvalError {
    /// Basic constructor (no message, no cell).
    pub fn new(kind: EvalErrorKind) -> Self {
        kind.into()
    }

    /// Attach a human-readable explanation.
    pub fn with_message<S: Into<String>>(mut self, msg: S) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Attach the cell the failure belongs to.
    pub fn with_cell<S: Into<String>>(mut self, cell: S) -> Self {
        self.cell = Some(cell.into());
        self
    }

    pub fn from_error_string(s: &str) -> Self {
        Self::new(EvalErrorKind::parse(s))
    }
}

/* ───────────────────────── Display / Error ────────────────────────── */

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        if let Some(ref cell) = self.cell {
            write!(f, " (cell {cell})")?;
        }
        Ok(())
    }
}

impl Error for EvalError {}

impl From<EvalError> for String {
    fn from(error: EvalError) -> Self {
        format!("{error}")
    }
}

impl From<EvalError> for Value {
    fn from(error: EvalError) -> Self {
        Value::Error(error)
    }
}

impl PartialEq<str> for EvalErrorKind {
    fn eq(&self, other: &str) -> bool {
        format!("{self}") == other
    }
}

impl PartialEq<&str> for EvalError {
    fn eq(&self, other: &&str) -> bool {
        self.kind.to_string() == *other
    }
}

impl PartialEq<str> for EvalError {
    fn eq(&self, other: &str) -> bool {
        self.kind.to_string() == other
    }
}
