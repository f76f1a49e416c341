//! Shared helpers for engine tests.

use tokio::sync::oneshot;

use cellbatch_common::{CellRef, EvalError, Value};

use crate::engine::batch::{Argument, Batch, PendingEntry};

pub type Probe = oneshot::Receiver<Result<Value, EvalError>>;

pub fn entry(cell: &str, operation: &str, args: Vec<Argument>) -> (PendingEntry, Probe) {
    let (tx, rx) = oneshot::channel();
    (
        PendingEntry {
            cell: CellRef::normalize(cell),
            operation: operation.to_string(),
            args,
            reply: tx,
        },
        rx,
    )
}

pub fn batch_of(entries: Vec<PendingEntry>) -> Batch {
    let mut batch = Batch::default();
    for e in entries {
        batch.insert(e);
    }
    batch
}

pub fn lit(n: i64) -> Argument {
    Argument::literal(Value::Int(n))
}

pub fn reference(cell: &str) -> Argument {
    Argument::reference(cell)
}

/// The signaled outcome; panics if the entry was never answered.
pub fn outcome(mut probe: Probe) -> Result<Value, EvalError> {
    probe.try_recv().expect("entry was never signaled")
}
