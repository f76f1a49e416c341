//! Criteria parsing and matching for conditional aggregation.
//!
//! A criteria literal is either a comparison (`">10"`, `"<=2.5"`, `"<>0"`),
//! a wildcard pattern (`"met*"`, `"?at"`), or a plain equality target. Text
//! equality and wildcard matching are case-insensitive; ordering comparisons
//! only ever match numeric elements.

use cellbatch_common::Value;

use crate::coercion::to_text;

#[derive(Debug, Clone, PartialEq)]
pub enum CriteriaPredicate {
    /// Equality, numeric-aware and case-insensitive for text.
    Eq(Value),
    /// Negated equality.
    Ne(Value),
    Gt(f64),
    Ge(f64),
    Lt(f64),
    Le(f64),
    /// Wildcard pattern with `*` (any run) and `?` (any one character).
    TextLike { pattern: String },
}

/// Parse one criteria value into a predicate.
///
/// Non-text criteria are equality targets as-is. Text is scanned for a
/// comparison prefix; an ordering prefix with a non-numeric bound yields a
/// predicate that matches nothing (NaN compares false against everything).
pub fn parse_criteria(criteria: &Value) -> CriteriaPredicate {
    let text = match criteria {
        Value::Text(s) => s.trim(),
        other => return CriteriaPredicate::Eq(other.clone()),
    };
    if let Some(rest) = text.strip_prefix(">=") {
        return ordered(rest, CriteriaPredicate::Ge);
    }
    if let Some(rest) = text.strip_prefix("<=") {
        return ordered(rest, CriteriaPredicate::Le);
    }
    if let Some(rest) = text.strip_prefix("<>") {
        return match numeric_bound(rest) {
            Some(n) => CriteriaPredicate::Ne(Value::Number(n)),
            None => CriteriaPredicate::Ne(Value::Text(rest.trim().to_string())),
        };
    }
    if let Some(rest) = text.strip_prefix('>') {
        return ordered(rest, CriteriaPredicate::Gt);
    }
    if let Some(rest) = text.strip_prefix('<') {
        return ordered(rest, CriteriaPredicate::Lt);
    }
    let bare = text.strip_prefix('=').unwrap_or(text);
    if bare.contains('*') || bare.contains('?') {
        return CriteriaPredicate::TextLike {
            pattern: bare.to_string(),
        };
    }
    CriteriaPredicate::Eq(crate::parse::parse_text(bare))
}

fn ordered(rest: &str, ctor: fn(f64) -> CriteriaPredicate) -> CriteriaPredicate {
    match numeric_bound(rest) {
        Some(n) => ctor(n),
        None => ctor(f64::NAN),
    }
}

fn numeric_bound(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Test one range element against a predicate.
pub fn criteria_match(pred: &CriteriaPredicate, value: &Value) -> bool {
    match pred {
        CriteriaPredicate::Eq(target) => values_equal(target, value),
        CriteriaPredicate::Ne(target) => !values_equal(target, value),
        CriteriaPredicate::Gt(bound) => number_of(value).is_some_and(|v| v > *bound),
        CriteriaPredicate::Ge(bound) => number_of(value).is_some_and(|v| v >= *bound),
        CriteriaPredicate::Lt(bound) => number_of(value).is_some_and(|v| v < *bound),
        CriteriaPredicate::Le(bound) => number_of(value).is_some_and(|v| v <= *bound),
        CriteriaPredicate::TextLike { pattern } => wildcard_match(pattern, &to_text(value)),
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Number(n) => Some(*n),
        _ => None,
    }
}

fn values_equal(target: &Value, value: &Value) -> bool {
    if let (Some(a), Some(b)) = (number_of(target), number_of(value)) {
        return a == b;
    }
    match (target, value) {
        (Value::Text(a), Value::Text(b)) => {
            a.trim().to_lowercase() == b.trim().to_lowercase()
        }
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Empty, Value::Empty) => true,
        _ => false,
    }
}

/// Case-insensitive wildcard match with greedy `*` backtracking.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    let t: Vec<char> = text.to_lowercase().chars().collect();
    let mut pi = 0usize;
    let mut ti = 0usize;
    let mut star: Option<(usize, usize)> = None;
    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((sp, st)) = star {
            pi = sp + 1;
            ti = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
