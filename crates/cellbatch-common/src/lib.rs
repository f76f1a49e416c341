pub mod cellref;
pub mod error;
pub mod value;

pub use cellref::*;
pub use error::*;
pub use value::*;
