//! Conditional aggregation: `sumifs`.

use cellbatch_common::{EvalError, EvalErrorKind, Value};
use smallvec::SmallVec;

use super::utils::coerce_num;
use crate::criteria::{criteria_match, parse_criteria, CriteriaPredicate};
use crate::function::Operation;

/* ─────────────────────────── sumifs() ──────────────────────────── */

enum CritSource<'a> {
    Seq(&'a [Value]),
    Scalar(&'a Value),
}

/// `sumifs(sum_range, criteria_range1, criteria1, ...)`
///
/// Sums the elements of `sum_range` at positions where every
/// `(criteria_range, criteria)` pair matches. Criteria ranges must be the
/// same length as the sum range; a scalar in range position is broadcast.
/// Non-numeric elements of the sum range are skipped, never an error.
#[derive(Debug)]
pub struct SumIfsFn;

impl Operation for SumIfsFn {
    fn name(&self) -> &'static str {
        "sumifs"
    }
    fn min_args(&self) -> usize {
        3
    }
    fn variadic(&self) -> bool {
        true
    }

    fn eval(&self, args: &[Value]) -> Result<Value, EvalError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("sumifs").entered();

        if args.len() < 3 || (args.len() - 1) % 2 != 0 {
            return Err(EvalError::new(EvalErrorKind::Value).with_message(format!(
                "sumifs expects 1 sum_range followed by pairs of (criteria_range, criteria); got {} args",
                args.len()
            )));
        }

        let Some(sum_range) = args[0].as_array() else {
            return scalar_fallback(args);
        };

        let mut preds: SmallVec<[(CritSource<'_>, CriteriaPredicate); 4]> = SmallVec::new();
        for pair in args[1..].chunks(2) {
            let source = match pair[0].as_array() {
                Some(seq) => {
                    if seq.len() != sum_range.len() {
                        return Err(EvalError::new(EvalErrorKind::Value).with_message(format!(
                            "criteria_range has {} elements but sum_range has {}",
                            seq.len(),
                            sum_range.len()
                        )));
                    }
                    CritSource::Seq(seq)
                }
                None => CritSource::Scalar(&pair[0]),
            };
            preds.push((source, parse_criteria(&pair[1])));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(len = sum_range.len(), pairs = preds.len(), "sumifs_dims");

        let mut total = 0.0;
        for (idx, item) in sum_range.iter().enumerate() {
            let all_match = preds.iter().all(|(source, pred)| {
                let probe = match source {
                    CritSource::Seq(seq) => &seq[idx],
                    CritSource::Scalar(v) => *v,
                };
                criteria_match(pred, probe)
            });
            if !all_match {
                continue;
            }
            if let Ok(n) = coerce_num(item) {
                total += n;
            }
        }
        Ok(Value::Number(total))
    }
}

/// All-scalar invocation: sum the single value if every pair matches it.
fn scalar_fallback(args: &[Value]) -> Result<Value, EvalError> {
    for pair in args[1..].chunks(2) {
        let pred = parse_criteria(&pair[1]);
        if !criteria_match(&pred, &pair[0]) {
            return Ok(Value::Number(0.0));
        }
    }
    Ok(Value::Number(coerce_num(&args[0]).unwrap_or(0.0)))
}


pub fn register_builtins(reg: &mut crate::registry::OperationRegistry) {
    reg.register(std::sync::Arc::new(SumIfsFn));
}
