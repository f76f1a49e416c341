//! Topological scheduling over the batch dependency graph.
//!
//! Kahn's algorithm with a FIFO ready queue seeded in submission order, so
//! cells with no ordering constraint between them always evaluate in the
//! order they arrived. Identical batch, identical schedule.

use std::collections::VecDeque;

use cellbatch_common::CellRef;
use rustc_hash::{FxHashMap, FxHashSet};

use super::graph::DependencyGraph;

/// The outcome of scheduling: a dependency-respecting evaluation order, or
/// the set of cells left unordered because they sit on a cycle.
#[derive(Debug, Default)]
pub struct Schedule {
    pub order: Vec<CellRef>,
    /// Cells that could not be ordered. Non-empty means the batch fails as
    /// a whole; members appear in submission order.
    pub cycle: Vec<CellRef>,
}

impl Schedule {
    pub fn has_cycle(&self) -> bool {
        !self.cycle.is_empty()
    }
}

pub struct Scheduler<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> Scheduler<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    pub fn create_schedule(&self) -> Schedule {
        let nodes = self.graph.nodes();
        let mut in_degree: FxHashMap<&CellRef, usize> = nodes
            .iter()
            .map(|cell| (cell, self.graph.in_degree_of(cell)))
            .collect();

        let mut ready: VecDeque<&CellRef> = nodes
            .iter()
            .filter(|cell| self.graph.in_degree_of(cell) == 0)
            .collect();

        let mut order = Vec::with_capacity(nodes.len());
        while let Some(cell) = ready.pop_front() {
            order.push(cell.clone());
            for dependent in self.graph.dependents_of(cell) {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(dependent);
                    }
                }
            }
        }

        let cycle = if order.len() < nodes.len() {
            let ordered: FxHashSet<&CellRef> = order.iter().collect();
            nodes
                .iter()
                .filter(|cell| !ordered.contains(cell))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Schedule { order, cycle }
    }
}
