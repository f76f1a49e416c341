//! Intra-batch dependency graph.
//!
//! Edges exist only between cells of the same batch: a reference to a cell
//! outside the batch is not a dependency (it falls back to its literal), and
//! a cell referencing itself is likewise not an edge.

use cellbatch_common::CellRef;
use rustc_hash::{FxHashMap, FxHashSet};

use super::batch::Batch;

#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: Vec<CellRef>,
    dependents: FxHashMap<CellRef, Vec<CellRef>>,
    in_degree: FxHashMap<CellRef, usize>,
    edge_count: usize,
}

impl DependencyGraph {
    /// Build the graph for a detached batch. Duplicate references from one
    /// entry collapse into a single edge.
    pub(crate) fn build(batch: &Batch) -> Self {
        let nodes: Vec<CellRef> = batch.order().to_vec();
        let mut dependents: FxHashMap<CellRef, Vec<CellRef>> = FxHashMap::default();
        let mut in_degree: FxHashMap<CellRef, usize> =
            nodes.iter().map(|cell| (cell.clone(), 0)).collect();
        let mut edge_count = 0;

        for entry in batch.iter_in_order() {
            let mut seen: FxHashSet<&CellRef> = FxHashSet::default();
            for arg in &entry.args {
                let Some(dep) = &arg.reference else { continue };
                if dep == &entry.cell || !batch.contains(dep) || !seen.insert(dep) {
                    continue;
                }
                dependents.entry(dep.clone()).or_default().push(entry.cell.clone());
                if let Some(degree) = in_degree.get_mut(&entry.cell) {
                    *degree += 1;
                }
                edge_count += 1;
            }
        }

        Self {
            nodes,
            dependents,
            in_degree,
            edge_count,
        }
    }

    /// Cells in submission order.
    pub fn nodes(&self) -> &[CellRef] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn in_degree_of(&self, cell: &CellRef) -> usize {
        self.in_degree.get(cell).copied().unwrap_or(0)
    }

    /// Cells that consume `cell`, in the order their entries were submitted.
    pub fn dependents_of(&self, cell: &CellRef) -> &[CellRef] {
        self.dependents.get(cell).map(Vec::as_slice).unwrap_or(&[])
    }
}
