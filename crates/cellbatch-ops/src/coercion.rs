//! Scalar coercion shared by the builtin operations.

use cellbatch_common::{EvalError, EvalErrorKind, Value};

/// Coerce a scalar to `f64`, accepting numeric-looking text.
///
/// `Empty` does not coerce: an argument whose reference missed the batch and
/// whose literal was blank must fail the operation, not silently become zero.
/// Error values propagate as the failure they carry.
pub fn to_number_lenient(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.trim().parse::<f64>().map_err(|_| {
            EvalError::new(EvalErrorKind::Value).with_message(format!("'{s}' is not numeric"))
        }),
        Value::Empty => Err(EvalError::new(EvalErrorKind::Value)
            .with_message("empty value where a number is required")),
        Value::Array(_) => Err(EvalError::new(EvalErrorKind::Value)
            .with_message("sequence where a scalar number is required")),
        Value::Error(e) => Err(e.clone()),
    }
}

/// Display-render a scalar for the text operations.
pub fn to_text(value: &Value) -> String {
    value.to_string()
}
