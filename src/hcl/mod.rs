//! HCL document model: typed values, expressions, attributes and blocks.
//!
//! Documents are assembled through [`Body`] and rendered in canonical
//! `terraform fmt` layout through their `Display` implementation.

mod format;
mod ident;
mod structure;
mod value;

pub use ident::{is_identifier, sanitize_identifier};
pub use structure::{Attribute, Block, Body, Expression, FuncCall, Traversal};
pub use value::{Value, ValueType};
