//! The debounced batch evaluator.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use cellbatch_common::{CellRef, EvalError, EvalErrorKind, Value};
use cellbatch_ops::{OperationRegistry, parse_value};
use rustc_hash::FxHashMap;

use super::batch::{Argument, Batch, PendingEntry};
use super::graph::DependencyGraph;
use super::scheduler::Scheduler;
use super::BatchConfig;

/// Cheaply cloneable handle to the batching engine.
///
/// All clones share one open batch. `submit` queues a cell and waits for the
/// batch it joined to resolve; resolution happens on a timer task once the
/// debounce window passes without a newer submission.
#[derive(Clone)]
pub struct Engine {
    inner: Arc<Inner>,
}

struct Inner {
    config: BatchConfig,
    registry: Arc<OperationRegistry>,
    shared: Mutex<Shared>,
}

/// State behind the engine mutex. The epoch counter invalidates stale timer
/// tasks: each submission bumps it, and a timer that wakes to a mismatched
/// epoch stands down without touching the batch.
#[derive(Default)]
struct Shared {
    batch: Batch,
    epoch: u64,
    timer: Option<JoinHandle<()>>,
}

impl Engine {
    pub fn new(registry: Arc<OperationRegistry>, config: BatchConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                registry,
                shared: Mutex::new(Shared::default()),
            }),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.inner.config
    }

    /// Sorted names of every registered operation.
    pub fn operation_names(&self) -> Vec<&'static str> {
        self.inner.registry.names()
    }

    /// Number of cells waiting in the open batch.
    pub fn pending(&self) -> usize {
        self.inner.shared.lock().unwrap().batch.len()
    }

    /// Queue one cell evaluation and wait for its result.
    ///
    /// The call joins the open batch (displacing any previous entry for the
    /// same cell) and restarts the debounce window. It returns when the
    /// batch resolves, or fails with `Timeout` after the configured reply
    /// timeout. Must run inside a tokio runtime.
    pub async fn submit(
        &self,
        cell: &str,
        operation: &str,
        args: Vec<Argument>,
    ) -> Result<Value, EvalError> {
        let cell = CellRef::normalize(cell);
        if cell.is_empty() {
            return Err(
                EvalError::new(EvalErrorKind::Validation).with_message("cell is required")
            );
        }
        let operation = operation.trim().to_ascii_lowercase();
        if operation.is_empty() {
            return Err(
                EvalError::new(EvalErrorKind::Validation).with_message("operation is required")
            );
        }

        let (tx, rx) = oneshot::channel();
        let displaced = {
            let mut shared = self.inner.shared.lock().unwrap();
            shared.epoch += 1;
            let epoch = shared.epoch;
            let displaced = shared.batch.insert(PendingEntry {
                cell: cell.clone(),
                operation,
                args,
                reply: tx,
            });
            if let Some(stale) = shared.timer.take() {
                stale.abort();
            }
            shared.timer = Some(tokio::spawn(run_window(Arc::clone(&self.inner), epoch)));
            displaced
        };

        if let Some(old) = displaced {
            #[cfg(feature = "tracing")]
            tracing::debug!(cell = %old.cell, "entry superseded");
            let _ = old.reply.send(Err(EvalError::new(EvalErrorKind::Cancelled)
                .with_message("superseded by a newer submission for the same cell")
                .with_cell(old.cell.as_str())));
        }

        match tokio::time::timeout(self.inner.config.reply_timeout, rx).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(_)) => Err(EvalError::new(EvalErrorKind::Internal)
                .with_message("batch dropped before resolution")
                .with_cell(cell.as_str())),
            Err(_) => Err(EvalError::new(EvalErrorKind::Timeout)
                .with_message(format!(
                    "no result within {:?}",
                    self.inner.config.reply_timeout
                ))
                .with_cell(cell.as_str())),
        }
    }

    /// Detach and resolve the open batch immediately, without waiting out
    /// the debounce window. A later timer for the old window finds the
    /// epoch moved on and stands down.
    pub fn flush(&self) -> ResolveSummary {
        let batch = {
            let mut shared = self.inner.shared.lock().unwrap();
            shared.epoch += 1;
            if let Some(stale) = shared.timer.take() {
                stale.abort();
            }
            std::mem::take(&mut shared.batch)
        };
        if batch.is_empty() {
            return ResolveSummary::default();
        }
        resolve_batch(&self.inner.registry, batch)
    }
}

/// Timer task: sleep out the window, then detach and resolve the batch if
/// no newer submission arrived in the meantime.
async fn run_window(inner: Arc<Inner>, epoch: u64) {
    tokio::time::sleep(inner.config.debounce_window).await;
    let batch = {
        let mut shared = inner.shared.lock().unwrap();
        if shared.epoch != epoch {
            return;
        }
        // Clearing the handle inside the lock keeps a concurrent submit
        // from aborting this task once resolution has started.
        shared.timer = None;
        std::mem::take(&mut shared.batch)
    };
    if batch.is_empty() {
        return;
    }
    resolve_batch(&inner.registry, batch);
}

/// Outcome counts for one resolved batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveSummary {
    pub evaluated: usize,
    pub failed: usize,
    pub cycle: bool,
}

/// Resolve a detached batch: build the dependency graph, schedule it, then
/// evaluate cells in order with a pass-scoped value cache. Every entry is
/// signaled exactly once.
pub(crate) fn resolve_batch(registry: &OperationRegistry, mut batch: Batch) -> ResolveSummary {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("resolve_batch", cells = batch.len()).entered();

    let graph = DependencyGraph::build(&batch);
    let schedule = Scheduler::new(&graph).create_schedule();

    let mut summary = ResolveSummary::default();
    if schedule.has_cycle() {
        summary.cycle = true;
        summary.failed = batch.len();
        let members = schedule
            .cycle
            .iter()
            .map(CellRef::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let err = EvalError::new(EvalErrorKind::Circular)
            .with_message(format!("circular dependency among: {members}"));
        // The whole batch fails, not just the cells on the cycle.
        for entry in batch.drain() {
            let _ = entry.reply.send(Err(err.clone().with_cell(entry.cell.as_str())));
        }
        #[cfg(feature = "tracing")]
        tracing::warn!(failed = summary.failed, "batch rejected on cycle");
        return summary;
    }

    let mut computed: FxHashMap<CellRef, Value> = FxHashMap::default();
    for cell in &schedule.order {
        let Some(entry) = batch.remove(cell) else { continue };
        let args = resolve_args(&entry.args, &computed);
        match registry.dispatch(&entry.operation, &args) {
            Ok(value) => {
                summary.evaluated += 1;
                computed.insert(cell.clone(), value.clone());
                let _ = entry.reply.send(Ok(value));
            }
            Err(e) => {
                // Failed cells leave no cache entry; dependents fall back
                // to their literals.
                summary.failed += 1;
                let _ = entry.reply.send(Err(e.with_cell(cell.as_str())));
            }
        }
    }

    // Every entry must be answered; anything the schedule missed fails as
    // internal instead of leaving its caller to time out.
    for entry in batch.drain() {
        summary.failed += 1;
        let _ = entry.reply.send(Err(EvalError::new(EvalErrorKind::Internal)
            .with_message("cell was never scheduled")
            .with_cell(entry.cell.as_str())));
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        evaluated = summary.evaluated,
        failed = summary.failed,
        "batch resolved"
    );
    summary
}

/// Substitute arguments for one cell: a reference that computed earlier in
/// this pass wins over the literal; otherwise the literal is used, and a
/// missing literal becomes `Empty`. Both paths re-parse text.
fn resolve_args(args: &[Argument], computed: &FxHashMap<CellRef, Value>) -> Vec<Value> {
    args.iter()
        .map(|arg| {
            if let Some(reference) = &arg.reference {
                if let Some(value) = computed.get(reference) {
                    return parse_value(value.clone());
                }
            }
            parse_value(arg.literal.clone().unwrap_or(Value::Empty))
        })
        .collect()
}
