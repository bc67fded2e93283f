//! Rust types representing a parsed TL definition.

mod category;
mod definition;
mod parameter;
mod ty;

pub use category::Category;
pub use definition::Definition;
pub use parameter::Parameter;
pub use ty::Type;
