//! Operation lookup and dispatch.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use cellbatch_common::{EvalError, EvalErrorKind, Value};

use crate::function::{check_arity, Operation};

/// Name-to-operation table.
///
/// Built once and then read-only; engines share one behind an `Arc`.
/// Embedders that need extra operations register them on their own instance
/// before handing it to the engine.
#[derive(Debug, Default)]
pub struct OperationRegistry {
    ops: FxHashMap<&'static str, Arc<dyn Operation>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the whole builtin catalog.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        crate::builtins::register_builtins(&mut reg);
        reg
    }

    /// Register under the operation's own (lowercase) name, replacing any
    /// previous registration.
    pub fn register(&mut self, op: Arc<dyn Operation>) {
        self.ops.insert(op.name(), op);
    }

    /// Case-insensitive lookup: callers submit `PLUS` and `plus` alike.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Operation>> {
        self.ops.get(name.to_ascii_lowercase().as_str()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name.to_ascii_lowercase().as_str())
    }

    /// Sorted operation names, for the introspection listing.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Resolve a name and invoke it.
    ///
    /// Unknown names are `#NAME?`, arity mismatches `#VALUE!`, and the
    /// operation's own failure surfaces unchanged.
    pub fn dispatch(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        let Some(op) = self.get(name) else {
            return Err(EvalError::new(EvalErrorKind::UnknownOp)
                .with_message(format!("unknown operation: {}", name.to_ascii_lowercase())));
        };
        check_arity(op.as_ref(), args.len())?;
        op.eval(args)
    }
}

/// The shared builtin table.
///
/// Engines default to this when no custom registry is supplied; cloning the
/// `Arc` is the only cost.
pub fn builtin_registry() -> Arc<OperationRegistry> {
    static BUILTINS: Lazy<Arc<OperationRegistry>> =
        Lazy::new(|| Arc::new(OperationRegistry::with_builtins()));
    Arc::clone(&BUILTINS)
}
