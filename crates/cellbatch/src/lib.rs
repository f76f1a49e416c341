//! Meta crate that re-exports the cellbatch building blocks. Downstream
//! users depend on this crate for the whole stack while keeping access to
//! the underlying crates when deeper integration is required.

pub use cellbatch_common as common;
pub use cellbatch_engine as engine;
pub use cellbatch_ops as ops;

pub use cellbatch_common::{CellRef, EvalError, EvalErrorKind, Value};
pub use cellbatch_engine::protocol::{
    ArgPayload, ErrorPayload, Health, OperationsListing, ProtocolError, SubmitRequest,
    SubmitResponse,
};
pub use cellbatch_engine::{new_engine, Argument, BatchConfig, Engine, ResolveSummary};
pub use cellbatch_ops::{builtin_registry, Operation, OperationRegistry};

pub mod doc_examples;
