//! Wire shapes for embedding the engine behind a JSON boundary.
//!
//! The engine itself is transport-agnostic; these types pin down the JSON
//! layout callers use, and the conversions into engine arguments. Numbers
//! that fit `i64` arrive as integers, everything else as floats, matching
//! the literal-parsing rules for text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cellbatch_common::{CellRef, EvalError, Value};

use crate::engine::Argument;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported literal: {0}")]
    UnsupportedLiteral(String),
}

/// One evaluation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub cell: String,
    pub operation: String,
    #[serde(default)]
    pub args: Vec<ArgPayload>,
}

impl SubmitRequest {
    pub fn from_json(payload: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Split into the pieces `Engine::submit` takes.
    pub fn into_parts(self) -> Result<(String, String, Vec<Argument>), ProtocolError> {
        let args = self
            .args
            .into_iter()
            .map(ArgPayload::into_argument)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((self.cell, self.operation, args))
    }
}

/// One argument on the wire: a cell reference, a literal, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgPayload {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl ArgPayload {
    pub fn into_argument(self) -> Result<Argument, ProtocolError> {
        Ok(Argument {
            reference: self.reference.map(|r| CellRef::normalize(&r)),
            literal: self.value.map(json_to_value).transpose()?,
        })
    }
}

/// JSON scalar / array to engine value. Objects have no value counterpart.
pub fn json_to_value(json: serde_json::Value) -> Result<Value, ProtocolError> {
    Ok(match json {
        serde_json::Value::Null => Value::Empty,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Number(f)
            } else {
                return Err(ProtocolError::UnsupportedLiteral(n.to_string()));
            }
        }
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(json_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_json::Value::Object(_) => {
            return Err(ProtocolError::UnsupportedLiteral("object".into()));
        }
    })
}

/// Engine value to JSON. Error values render as their code string, the way
/// callers see `#DIV/0!` inside an otherwise successful response.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(i) => (*i).into(),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(Into::into)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => s.clone().into(),
        Value::Boolean(b) => (*b).into(),
        Value::Empty => serde_json::Value::Null,
        Value::Array(items) => items.iter().map(value_to_json).collect(),
        Value::Error(e) => e.kind.to_string().into(),
    }
}

/// One evaluation response: exactly one of `result` / `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub cell: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    pub fn from_outcome(cell: &str, outcome: Result<Value, EvalError>) -> Self {
        match outcome {
            Ok(value) => Self {
                cell: cell.to_string(),
                result: Some(value_to_json(&value)),
                error: None,
            },
            Err(e) => Self {
                cell: cell.to_string(),
                result: None,
                error: Some(ErrorPayload {
                    code: e.kind.to_string(),
                    message: e.message,
                }),
            },
        }
    }
}

/// The introspection listing of registered operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsListing {
    pub operations: Vec<String>,
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub mode: String,
}

impl Health {
    pub fn ok() -> Self {
        Self {
            status: "healthy".into(),
            mode: "batch".into(),
        }
    }
}
