//! Literal parsing.
//!
//! Callers submit argument literals as raw text (or already-typed JSON
//! values). Before any operation runs, every scalar goes through the rules
//! here so that `"5"` and `5` behave identically:
//!
//! - blank or whitespace-only text becomes [`Value::Empty`]
//! - `true` / `false` in any case become [`Value::Boolean`]
//! - text containing a `.` that parses as a float becomes [`Value::Number`]
//! - text without a `.` that parses as an integer becomes [`Value::Int`]
//! - anything else stays [`Value::Text`], trimmed
//!
//! The decimal-separator rule is deliberate: `"7"` stays an integer while
//! `"7.0"` becomes a float, and scientific notation such as `"1e5"` is left
//! as text because it carries no separator.

use cellbatch_common::Value;

/// Parse one raw text literal into a typed [`Value`].
pub fn parse_text(raw: &str) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::Empty;
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if s.contains('.') {
        if let Ok(n) = s.parse::<f64>() {
            return Value::Number(n);
        }
    } else if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }
    Value::Text(s.to_string())
}

/// Re-parse an already-typed value.
///
/// Applied to every argument right before dispatch, on both paths: values
/// read from the pass cache and literal fallbacks. Text re-enters
/// [`parse_text`]; every other variant passes through unchanged, so a cached
/// `#DIV/0!` error or a computed float is never mangled.
pub fn parse_value(value: Value) -> Value {
    match value {
        Value::Text(s) => parse_text(&s),
        other => other,
    }
}
