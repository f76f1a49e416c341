//! Comparison and boolean operations.
//!
//! `equals` is numeric-aware (`2 == 2.0`, `true == 1`) and otherwise strict
//! per variant; text comparison is case-sensitive here, unlike criteria
//! matching. The boolean folds (`and`, `or`, `not`, `if`) use truthiness and
//! propagate error values instead of folding over them.

use cellbatch_common::{EvalError, EvalErrorKind, Value};

use super::utils::binary_numeric_args;
use crate::function::Operation;

fn numeric(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Number(n) => Some(*n),
        Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn loose_eq(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (numeric(a), numeric(b)) {
        return x == y;
    }
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Empty, Value::Empty) => true,
        (Value::Error(x), Value::Error(y)) => x == y,
        _ => false,
    }
}

/* ─────────────────────────── equals() ──────────────────────────── */

#[derive(Debug)]
pub struct EqualsFn;

impl Operation for EqualsFn {
    fn name(&self) -> &'static str {
        "equals"
    }
    fn min_args(&self) -> usize {
        2
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Boolean(loose_eq(&args[0], &args[1])))
    }
}


/* ───────────────── greater() / less() / greater_equal() / less_equal() ───────────────── */

macro_rules! ordering_op {
    ($struct_name:ident, $op_name:literal, $cmp:tt) => {
        #[derive(Debug)]
        pub struct $struct_name;

        impl Operation for $struct_name {
            fn name(&self) -> &'static str {
                $op_name
            }
            fn min_args(&self) -> usize {
                2
            }

            fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
                let (a, b) = binary_numeric_args(args)?;
                Ok(Value::Boolean(a $cmp b))
            }
        }
    };
}

ordering_op!(GreaterFn, "greater", >);
ordering_op!(LessFn, "less", <);
ordering_op!(GreaterEqualFn, "greater_equal", >=);
ordering_op!(LessEqualFn, "less_equal", <=);

#[cfg(test)]
mod tests_ordering {
    use super::*;

    #[test]
    fn orderings_compare_numerically() {
        assert_eq!(
            GreaterFn.eval(&[Value::Int(3), Value::Int(2)]).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            LessFn.eval(&[Value::Number(1.5), Value::Int(2)]).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            GreaterEqualFn.eval(&[Value::Int(2), Value::Int(2)]).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            LessEqualFn.eval(&[Value::Int(3), Value::Int(2)]).unwrap(),
            Value::Boolean(false)
        );
    }

    #[test]
    fn non_numeric_operands_fail() {
        let err = GreaterFn
            .eval(&[Value::Text("tall".into()), Value::Int(2)])
            .unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Value);
    }
}

/* ─────────────────────────── and() / or() / not() ──────────────────────────── */

#[derive(Debug)]
pub struct AndFn;

impl Operation for AndFn {
    fn name(&self) -> &'static str {
        "and"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        for arg in args {
            if let Value::Error(e) = arg {
                return Ok(Value::Error(e.clone()));
            }
            if !arg.is_truthy() {
                return Ok(Value::Boolean(false));
            }
        }
        Ok(Value::Boolean(true))
    }
}

#[derive(Debug)]
pub struct OrFn;

impl Operation for OrFn {
    fn name(&self) -> &'static str {
        "or"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        for arg in args {
            if let Value::Error(e) = arg {
                return Ok(Value::Error(e.clone()));
            }
            if arg.is_truthy() {
                return Ok(Value::Boolean(true));
            }
        }
        Ok(Value::Boolean(false))
    }
}

#[derive(Debug)]
pub struct NotFn;

impl Operation for NotFn {
    fn name(&self) -> &'static str {
        "not"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        if let Value::Error(e) = &args[0] {
            return Ok(Value::Error(e.clone()));
        }
        Ok(Value::Boolean(!args[0].is_truthy()))
    }
}


/* ─────────────────────────── if() ──────────────────────────── */

#[derive(Debug)]
pub struct IfFn;

impl Operation for IfFn {
    fn name(&self) -> &'static str {
        "if"
    }
    fn min_args(&self) -> usize {
        3
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        if let Value::Error(e) = &args[0] {
            return Ok(Value::Error(e.clone()));
        }
        let picked = if args[0].is_truthy() { &args[1] } else { &args[2] };
        Ok(picked.clone())
    }
}

#[cfg(test)]
mod tests_if {
    use super::*;

    #[test]
    fn picks_by_truthiness() {
        assert_eq!(
            IfFn.eval(&[Value::Boolean(true), Value::Int(1), Value::Int(2)]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            IfFn.eval(&[Value::Int(0), Value::Int(1), Value::Int(2)]).unwrap(),
            Value::Int(2)
        );
    }
}

/* ─────────────────────────── iferror() ──────────────────────────── */

#[derive(Debug)]
pub struct IfErrorFn;

impl Operation for IfErrorFn {
    fn name(&self) -> &'static str {
        "iferror"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        if args.len() > 2 {
            return Err(EvalError::new(EvalErrorKind::Value)
                .with_message(format!("iferror expects 1 or 2 arguments, got {}", args.len())));
        }
        let fallback = args.get(1).cloned().unwrap_or(Value::Int(0));
        match &args[0] {
            Value::Error(_) => Ok(fallback),
            // Error codes that arrive as text (a cached `#DIV/0!` rendered
            // through a text operation) count as errors too.
            Value::Text(s) if s.starts_with('#') => Ok(fallback),
            other => Ok(other.clone()),
        }
    }
}


pub fn register_builtins(reg: &mut crate::registry::OperationRegistry) {
    reg.register(std::sync::Arc::new(EqualsFn));
    reg.register(std::sync::Arc::new(GreaterFn));
    reg.register(std::sync::Arc::new(LessFn));
    reg.register(std::sync::Arc::new(GreaterEqualFn));
    reg.register(std::sync::Arc::new(LessEqualFn));
    reg.register(std::sync::Arc::new(AndFn));
    reg.register(std::sync::Arc::new(OrFn));
    reg.register(std::sync::Arc::new(NotFn));
    reg.register(std::sync::Arc::new(IfFn));
    reg.register(std::sync::Arc::new(IfErrorFn));
}
