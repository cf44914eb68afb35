//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared data model.
//! CONTEXT: Re-exports the field value and record types for use by the
//! table view pipeline crate.

pub mod record;
pub mod value;

// Re-export commonly used types at the crate root
pub use record::Record;
pub use value::{compare_values, FieldValue};
