use cellbatch_common::{EvalError, EvalErrorKind, Value};

/// Largest magnitude at which every integer is exactly representable in f64.
pub(crate) const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Coerce a `Value` to `f64` with lenient text handling.
pub(crate) fn coerce_num(value: &Value) -> Result<f64, EvalError> {
    crate::coercion::to_number_lenient(value)
}

/// Get a single numeric argument, with error passthrough.
pub(crate) fn unary_numeric_arg(args: &[Value]) -> Result<f64, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::new(EvalErrorKind::Value)
            .with_message(format!("Expected 1 argument, got {}", args.len())));
    }
    coerce_num(&args[0])
}

/// Get two numeric arguments, with error passthrough.
pub(crate) fn binary_numeric_args(args: &[Value]) -> Result<(f64, f64), EvalError> {
    if args.len() != 2 {
        return Err(EvalError::new(EvalErrorKind::Value)
            .with_message(format!("Expected 2 arguments, got {}", args.len())));
    }
    Ok((coerce_num(&args[0])?, coerce_num(&args[1])?))
}

/// Whether every argument stays in the integer domain.
pub(crate) fn int_domain(args: &[Value]) -> bool {
    args.iter()
        .all(|v| matches!(v, Value::Int(_) | Value::Boolean(_)))
}

/// Pick the result variant: integer-domain inputs whose result is a whole
/// number come back as `Int`, everything else as `Number`.
pub(crate) fn num_result(n: f64, int_inputs: bool) -> Value {
    if int_inputs && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
        Value::Int(n as i64)
    } else {
        Value::Number(n)
    }
}
