//! Folding aggregates over the argument list.

use cellbatch_common::{EvalError, EvalErrorKind, Value};

use super::utils::coerce_num;
use crate::function::Operation;

/* ─────────────────────────── max() / min() ──────────────────────────── */

fn pick_extreme(args: &[Value], take_greater: bool) -> Result<Value, EvalError> {
    let mut best: Option<(f64, &Value)> = None;
    for arg in args {
        let n = coerce_num(arg)?;
        let replace = match best {
            None => true,
            Some((current, _)) => {
                if take_greater {
                    n > current
                } else {
                    n < current
                }
            }
        };
        if replace {
            best = Some((n, arg));
        }
    }
    match best {
        Some((_, v)) => Ok(v.clone()),
        None => Err(EvalError::new(EvalErrorKind::Value)
            .with_message("Expected at least 1 argument, got 0")),
    }
}

#[derive(Debug)]
pub struct MaxFn;

impl Operation for MaxFn {
    fn name(&self) -> &'static str {
        "max"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        pick_extreme(args, true)
    }
}

#[derive(Debug)]
pub struct MinFn;

impl Operation for MinFn {
    fn name(&self) -> &'static str {
        "min"
    }
    fn min_args(&self) -> usize {
        1
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        pick_extreme(args, false)
    }
}

#[cfg(test)]
mod tests_max_min {
    use super::*;

    #[test]
    fn extremes_return_the_original_value() {
        assert_eq!(
            MaxFn.eval(&[Value::Int(2), Value::Number(2.5), Value::Int(1)]).unwrap(),
            Value::Number(2.5)
        );
        assert_eq!(
            MinFn.eval(&[Value::Int(2), Value::Number(2.5), Value::Int(1)]).unwrap(),
            Value::Int(1)
        );
    }

    #[test]
    fn ties_keep_the_first_seen() {
        assert_eq!(
            MaxFn.eval(&[Value::Int(3), Value::Number(3.0)]).unwrap(),
            Value::Int(3)
        );
    }

    #[test]
    fn non_numeric_argument_fails() {
        let err = MaxFn.eval(&[Value::Text("tall".into())]).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Value);
    }
}

/* ─────────────────────────── average() ──────────────────────────── */

#[derive(Debug)]
pub struct AverageFn;

impl Operation for AverageFn {
    fn name(&self) -> &'static str {
        "average"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        if args.is_empty() {
            return Ok(Value::Int(0));
        }
        let mut sum = 0.0;
        for arg in args {
            sum += coerce_num(arg)?;
        }
        Ok(Value::Number(sum / args.len() as f64))
    }
}

#[cfg(test)]
mod tests_average {
    use super::*;

    #[test]
    fn mean_is_always_a_float() {
        assert_eq!(
            AverageFn.eval(&[Value::Int(2), Value::Int(4)]).unwrap(),
            Value::Number(3.0)
        );
    }

    #[test]
    fn empty_average_is_zero() {
        assert_eq!(AverageFn.eval(&[]).unwrap(), Value::Int(0));
    }
}

/* ─────────────────────────── count() ──────────────────────────── */

#[derive(Debug)]
pub struct CountFn;

impl Operation for CountFn {
    fn name(&self) -> &'static str {
        "count"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        Ok(Value::Int(args.len() as i64))
    }
}


pub fn register_builtins(reg: &mut crate::registry::OperationRegistry) {
    reg.register(std::sync::Arc::new(MaxFn));
    reg.register(std::sync::Arc::new(MinFn));
    reg.register(std::sync::Arc::new(AverageFn));
    reg.register(std::sync::Arc::new(CountFn));
}
