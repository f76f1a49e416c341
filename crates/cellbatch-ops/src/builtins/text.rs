//! Text operations. Every input is Display-rendered first, so numbers and
//! booleans concatenate and transform without explicit conversion.

use cellbatch_common::{EvalError, Value};

use crate::coercion::to_text;
use crate::function::Operation;

/* ─────────────────────────── concat() ──────────────────────────── */

#[derive(Debug)]
pub struct ConcatFn;

impl Operation for ConcatFn {
    fn name(&self) -> &'static str {
        "concat"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let mut out = String::new();
        for arg in args {
            out.push_str(&to_text(arg));
        }
        Ok(Value::Text(out))
    }
}


/* ─────────────────────────── upper() / lower() / trim() ──────────────────────────── */

#[derive(Debug)]
pub struct UpperFn;

impl Operation for UpperFn {
    fn name(&self) -> &'static str {
        "upper"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Text(to_text(&args[0]).to_uppercase()))
    }
}

#[derive(Debug)]
pub struct LowerFn;

impl Operation for LowerFn {
    fn name(&self) -> &'static str {
        "lower"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Text(to_text(&args[0]).to_lowercase()))
    }
}

#[derive(Debug)]
pub struct TrimFn;

impl Operation for TrimFn {
    fn name(&self) -> &'static str {
        "trim"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Text(to_text(&args[0]).trim().to_string()))
    }
}


/* ─────────────────────────── len() ──────────────────────────── */

#[derive(Debug)]
pub struct LenFn;

impl Operation for LenFn {
    fn name(&self) -> &'static str {
        "len"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Int(to_text(&args[0]).chars().count() as i64))
    }
}


pub fn register_builtins(reg: &mut crate::registry::OperationRegistry) {
    reg.register(std::sync::Arc::new(ConcatFn));
    reg.register(std::sync::Arc::new(UpperFn));
    reg.register(std::sync::Arc::new(LowerFn));
    reg.register(std::sync::Arc::new(TrimFn));
    reg.register(std::sync::Arc::new(LenFn));
}
