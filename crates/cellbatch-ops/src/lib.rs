pub mod coercion;
pub mod criteria;
pub mod function;
pub mod parse;
pub mod registry;

pub mod builtins;

pub use function::Operation;
pub use parse::{parse_text, parse_value};
pub use registry::{builtin_registry, OperationRegistry};
