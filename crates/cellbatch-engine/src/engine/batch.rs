//! The open batch: pending entries keyed by cell, in submission order.

use cellbatch_common::{CellRef, EvalError, Value};
use rustc_hash::FxHashMap;
use tokio::sync::oneshot;

/// One submitted argument: an optional reference to another cell in the
/// batch plus an optional literal fallback.
///
/// When the referenced cell computed a value earlier in the same pass, that
/// value is used; otherwise the literal is, and a missing literal resolves
/// to [`Value::Empty`].
#[derive(Debug, Clone, Default)]
pub struct Argument {
    pub reference: Option<CellRef>,
    pub literal: Option<Value>,
}

impl Argument {
    /// A plain literal argument.
    pub fn literal(value: Value) -> Self {
        Self {
            reference: None,
            literal: Some(value),
        }
    }

    /// A reference-only argument; resolves to `Empty` if the referenced cell
    /// never computes in this pass.
    pub fn reference(cell: &str) -> Self {
        Self {
            reference: Some(CellRef::normalize(cell)),
            literal: None,
        }
    }

    /// A reference with a literal to fall back on.
    pub fn reference_or(cell: &str, fallback: Value) -> Self {
        Self {
            reference: Some(CellRef::normalize(cell)),
            literal: Some(fallback),
        }
    }
}

/// An entry waiting for its batch to resolve. The reply channel is consumed
/// exactly once, whatever the outcome.
#[derive(Debug)]
pub(crate) struct PendingEntry {
    pub cell: CellRef,
    pub operation: String,
    pub args: Vec<Argument>,
    pub reply: oneshot::Sender<Result<Value, EvalError>>,
}

/// Pending entries keyed by cell.
///
/// Insertion order is preserved for deterministic scheduling; re-submitting
/// a cell keeps its original position and displaces the previous entry.
#[derive(Debug, Default)]
pub(crate) struct Batch {
    entries: FxHashMap<CellRef, PendingEntry>,
    order: Vec<CellRef>,
}

impl Batch {
    pub fn insert(&mut self, entry: PendingEntry) -> Option<PendingEntry> {
        let cell = entry.cell.clone();
        let displaced = self.entries.insert(cell.clone(), entry);
        if displaced.is_none() {
            self.order.push(cell);
        }
        displaced
    }

    pub fn remove(&mut self, cell: &CellRef) -> Option<PendingEntry> {
        self.entries.remove(cell)
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.entries.contains_key(cell)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cells in submission order.
    pub fn order(&self) -> &[CellRef] {
        &self.order
    }

    /// Entries in submission order.
    pub fn iter_in_order(&self) -> impl Iterator<Item = &PendingEntry> {
        self.order.iter().filter_map(|cell| self.entries.get(cell))
    }

    /// Remove and return every remaining entry, in submission order.
    pub fn drain(&mut self) -> Vec<PendingEntry> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|cell| self.entries.remove(&cell))
            .collect()
    }
}
