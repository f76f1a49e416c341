pub mod aggregate;
pub mod criteria_aggregates;
pub mod logical;
pub mod math;
pub mod text;

mod utils;

use crate::registry::OperationRegistry;

/// Load the complete builtin catalog into a registry.
pub fn register_builtins(reg: &mut OperationRegistry) {
    aggregate::register_builtins(reg);
    criteria_aggregates::register_builtins(reg);
    logical::register_builtins(reg);
    math::register_builtins(reg);
    text::register_builtins(reg);
}
