//! Arithmetic operations.
//!
//! Integer inputs keep integer results where the operation is closed over
//! integers (`plus`, `minus`, `multiply`, `abs`, `mod`); `divide`, `sqrt`
//! and `average` always produce floats. Division by zero is special-cased:
//! `divide` yields a `#DIV/0!` *value* (visible to dependents through the
//! pass cache, replaceable by `iferror`), while `mod` by zero fails the cell.

use cellbatch_common::{EvalError, EvalErrorKind, Value};

use super::utils::{binary_numeric_args, coerce_num, int_domain, num_result, unary_numeric_arg};
use crate::function::Operation;

/* ─────────────────────────── plus() ──────────────────────────── */

#[derive(Debug)]
pub struct PlusFn;

impl Operation for PlusFn {
    fn name(&self) -> &'static str {
        "plus"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let mut total = 0.0;
        for arg in args {
            total += coerce_num(arg)?;
        }
        Ok(num_result(total, int_domain(args)))
    }
}

#[cfg(test)]
mod tests_plus {
    use super::*;

    #[test]
    fn sums_integers_to_an_integer() {
        assert_eq!(PlusFn.eval(&[Value::Int(2), Value::Int(3)]).unwrap(), Value::Int(5));
    }

    #[test]
    fn any_float_input_widens_the_result() {
        assert_eq!(
            PlusFn.eval(&[Value::Int(2), Value::Number(0.5)]).unwrap(),
            Value::Number(2.5)
        );
    }

    #[test]
    fn empty_argument_list_sums_to_zero() {
        assert_eq!(PlusFn.eval(&[]).unwrap(), Value::Int(0));
    }

    #[test]
    fn non_numeric_argument_fails() {
        let err = PlusFn
            .eval(&[Value::Int(1), Value::Text("x".into())])
            .unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Value);
    }
}

/* ─────────────────────────── minus() ──────────────────────────── */

#[derive(Debug)]
pub struct MinusFn;

impl Operation for MinusFn {
    fn name(&self) -> &'static str {
        "minus"
    }
    fn min_args(&self) -> usize {
        2
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let (a, b) = binary_numeric_args(args)?;
        Ok(num_result(a - b, int_domain(args)))
    }
}


/* ─────────────────────────── multiply() ──────────────────────────── */

#[derive(Debug)]
pub struct MultiplyFn;

impl Operation for MultiplyFn {
    fn name(&self) -> &'static str {
        "multiply"
    }
    fn min_args(&self) -> usize {
        0
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let mut product = 1.0;
        for arg in args {
            product *= coerce_num(arg)?;
        }
        Ok(num_result(product, int_domain(args)))
    }
}


/* ─────────────────────────── divide() ──────────────────────────── */

#[derive(Debug)]
pub struct DivideFn;

impl Operation for DivideFn {
    fn name(&self) -> &'static str {
        "divide"
    }
    fn min_args(&self) -> usize {
        2
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let (a, b) = binary_numeric_args(args)?;
        if b == 0.0 {
            // A value, not a failure: dependents see `#DIV/0!` through the
            // pass cache and `iferror` can substitute for it.
            return Ok(Value::Error(EvalError::new(EvalErrorKind::Div)));
        }
        Ok(Value::Number(a / b))
    }
}


/* ─────────────────────────── power() ──────────────────────────── */

#[derive(Debug)]
pub struct PowerFn;

impl Operation for PowerFn {
    fn name(&self) -> &'static str {
        "power"
    }
    fn min_args(&self) -> usize {
        2
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let (a, b) = binary_numeric_args(args)?;
        // Small integer exponents stay exact in the integer domain.
        if int_domain(args) && b.fract() == 0.0 && (0.0..=62.0).contains(&b) {
            if let Some(i) = (a as i64).checked_pow(b as u32) {
                return Ok(Value::Int(i));
            }
        }
        let out = a.powf(b);
        if !out.is_finite() {
            return Err(EvalError::new(EvalErrorKind::Num)
                .with_message(format!("{a}^{b} is not representable")));
        }
        Ok(Value::Number(out))
    }
}


/* ─────────────────────────── mod() ──────────────────────────── */

#[derive(Debug)]
pub struct ModFn;

impl Operation for ModFn {
    fn name(&self) -> &'static str {
        "mod"
    }
    fn min_args(&self) -> usize {
        2
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let (a, b) = binary_numeric_args(args)?;
        if b == 0.0 {
            return Err(EvalError::new(EvalErrorKind::Div).with_message("mod by zero"));
        }
        // Floored remainder: the result takes the sign of the divisor.
        let out = a - b * (a / b).floor();
        Ok(num_result(out, int_domain(args)))
    }
}


/* ─────────────────────────── sqrt() ──────────────────────────── */

#[derive(Debug)]
pub struct SqrtFn;

impl Operation for SqrtFn {
    fn name(&self) -> &'static str {
        "sqrt"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let n = unary_numeric_arg(args)?;
        if n < 0.0 {
            return Err(EvalError::new(EvalErrorKind::Num)
                .with_message(format!("sqrt of negative number {n}")));
        }
        Ok(Value::Number(n.sqrt()))
    }
}


/* ─────────────────────────── abs() ──────────────────────────── */

#[derive(Debug)]
pub struct AbsFn;

impl Operation for AbsFn {
    fn name(&self) -> &'static str {
        "abs"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let n = unary_numeric_arg(args)?;
        Ok(num_result(n.abs(), int_domain(args)))
    }
}


/* ─────────────────────────── round() ──────────────────────────── */

#[derive(Debug)]
pub struct RoundFn;

impl Operation for RoundFn {
    fn name(&self) -> &'static str {
        "round"
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
                .with_message(format!("round expects 1 or 2 arguments, got {}", args.len())));
        }
        let n = coerce_num(&args[0])?;
        let digits = if args.len() == 2 {
            coerce_num(&args[1])?.trunc() as i32
        } else {
            0
        };
        let factor = 10f64.powi(digits);
        let out = (n * factor).round_ties_even() / factor;
        if args.len() == 1 {
            // Single-argument rounding always lands on a whole number.
            return Ok(num_result(out, true));
        }
        Ok(num_result(out, int_domain(&args[..1])))
    }
}


/* ─────────────────────────── floor() / ceil() ──────────────────────────── */

#[derive(Debug)]
pub struct FloorFn;

impl Operation for FloorFn {
    fn name(&self) -> &'static str {
        "floor"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let n = unary_numeric_arg(args)?;
        Ok(num_result(n.floor(), true))
    }
}

#[derive(Debug)]
pub struct CeilFn;

impl Operation for CeilFn {
    fn name(&self) -> &'static str {
        "ceil"
    }
    fn min_args(&self) -> usize {
        1
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        let n = unary_numeric_arg(args)?;
        Ok(num_result(n.ceil(), true))
    }
}


pub fn register_builtins(reg: &mut crate::registry::OperationRegistry) {
    reg.register(std::sync::Arc::new(PlusFn));
    reg.register(std::sync::Arc::new(MinusFn));
    reg.register(std::sync::Arc::new(MultiplyFn));
    reg.register(std::sync::Arc::new(DivideFn));
    reg.register(std::sync::Arc::new(PowerFn));
    reg.register(std::sync::Arc::new(ModFn));
    reg.register(std::sync::Arc::new(SqrtFn));
    reg.register(std::sync::Arc::new(AbsFn));
    reg.register(std::sync::Arc::new(RoundFn));
    reg.register(std::sync::Arc::new(FloorFn));
    reg.register(std::sync::Arc::new(CeilFn));
}
