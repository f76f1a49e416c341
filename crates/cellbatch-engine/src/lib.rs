pub mod engine;
pub mod protocol;

pub use engine::{new_engine, Argument, BatchConfig, Engine, ResolveSummary};
