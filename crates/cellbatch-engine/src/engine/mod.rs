//! Debounced batch evaluation.
//!
//! Near-simultaneous cell submissions coalesce into one batch: every
//! submission restarts a quiet-period timer, and when the window elapses the
//! whole batch resolves in one pass over its intra-batch dependency graph.
//! Each caller is signaled individually the moment its own cell settles.

pub mod batch;
pub mod eval;
pub mod graph;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use batch::Argument;
pub use eval::{Engine, ResolveSummary};
pub use graph::DependencyGraph;
pub use scheduler::{Schedule, Scheduler};

use std::time::Duration;

/// Timing configuration for the engine.
///
/// Injected at construction; nothing is read from ambient globals, so tests
/// run with millisecond windows and the clock the runtime provides.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Quiet period after the most recent submission before the open batch
    /// detaches and resolves.
    pub debounce_window: Duration,
    /// How long a caller waits for its result before giving up.
    pub reply_timeout: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_secs(2),
            reply_timeout: Duration::from_secs(30),
        }
    }
}

/// Construct an engine over the shared builtin operation catalog.
pub fn new_engine(config: BatchConfig) -> Engine {
    Engine::new(cellbatch_ops::builtin_registry(), config)
}
