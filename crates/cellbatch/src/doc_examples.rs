use std::time::Duration;

use crate::{new_engine, Argument, BatchConfig, EvalError, Value};

/// Evaluate one operation through a throwaway short-window engine and
/// return the resulting value.
///
/// This helper is intended for documentation examples to avoid repetitive
/// setup.
///
/// # Example
///
/// ```rust
/// # use cellbatch::{doc_examples::eval_once, Argument, Value};
/// # tokio::runtime::Builder::new_current_thread()
/// #     .enable_time()
/// #     .build()
/// #     .unwrap()
/// #     .block_on(async {
/// let value = eval_once(
///     "plus",
///     vec![
///         Argument::literal(Value::Int(2)),
///         Argument::literal(Value::Int(3)),
///     ],
/// )
/// .await?;
/// assert_eq!(value, Value::Int(5));
/// # Ok::<(), cellbatch::EvalError>(())
/// # })
/// # .unwrap();
/// ```
pub async fn eval_once(operation: &str, args: Vec<Argument>) -> Result<Value, EvalError> {
    let engine = new_engine(BatchConfig {
        debounce_window: Duration::from_millis(10),
        reply_timeout: Duration::from_secs(5),
    });
    engine.submit("A1", operation, args).await
}
