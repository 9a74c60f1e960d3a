//! Foundation module - Shared domain primitives.
//!
//! Contains the value types every talk-indexing entity is built from:
//! timestamps, tagged field values and the field maps that hold them.

mod errors;
mod field_value;
mod timestamp;

pub use errors::ValidationError;
pub use field_value::{FieldMap, FieldValue};
pub use timestamp::Timestamp;
