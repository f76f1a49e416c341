//! The operation seam between the registry and the evaluator.

use std::fmt;

use cellbatch_common::{EvalError, EvalErrorKind, Value};

/// A pure, stateless operation over already-resolved argument values.
///
/// Implementations never see references or cells: by the time `eval` runs
/// the evaluator has substituted cached results and parsed literals. Arity
/// is gated by the registry through [`check_arity`]; operations with an
/// optional trailing argument (`round`, `iferror`) declare themselves
/// variadic and enforce their own upper bound.
pub trait Operation: Send + Sync + fmt::Debug {
    /// Lowercase registry name.
    fn name(&self) -> &'static str;

    fn min_args(&self) -> usize;

    fn variadic(&self) -> bool {
        false
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError>;
}

/// Shared arity gate, applied before any `eval` call.
pub fn check_arity(op: &dyn Operation, supplied: usize) -> Result<(), EvalError> {
    let min = op.min_args();
    if op.variadic() {
        if supplied < min {
            return Err(EvalError::new(EvalErrorKind::Value).with_message(format!(
                "{} expects at least {min} argument(s), got {supplied}",
                op.name()
            )));
        }
    } else if supplied != min {
        return Err(EvalError::new(EvalErrorKind::Value).with_message(format!(
            "{} expects exactly {min} argument(s), got {supplied}",
            op.name()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedTwo;

    impl Operation for FixedTwo {
        fn name(&self) -> &'static str {
            "fixed_two"
        }
        fn min_args(&self) -> usize {
            2
        }
        fn eval(&self, _args: &[Value]) -> Result<Value, EvalError> {
            Ok(Value::Empty)
        }
    }

    #[derive(Debug)]
    struct AtLeastOne;

    impl Operation for AtLeastOne {
        fn name(&self) -> &'static str {
            "at_least_one"
        }
        fn min_args(&self) -> usize {
            1
        }
        fn variadic(&self) -> bool {
            true
        }
        fn eval(&self, _args: &[Value]) -> Result<Value, EvalError> {
            Ok(Value::Empty)
        }
    }

    #[test]
    fn fixed_arity_rejects_high_and_low() {
        assert!(check_arity(&FixedTwo, 2).is_ok());
        let err = check_arity(&FixedTwo, 3).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::Value);
        assert!(err.message.unwrap().contains("exactly 2"));
        assert!(check_arity(&FixedTwo, 1).is_err());
    }

    #[test]
    fn variadic_only_checks_the_floor() {
        assert!(check_arity(&AtLeastOne, 1).is_ok());
        assert!(check_arity(&AtLeastOne, 9).is_ok());
        let err = check_arity(&AtLeastOne, 0).unwrap_err();
        assert!(err.message.unwrap().contains("at least 1"));
    }
}
