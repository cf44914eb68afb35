//! FILENAME: table-engine/src/error.rs

use thiserror::Error;

/// Caller contract violations surfaced by the pipeline.
///
/// The error taxonomy is narrow on purpose: missing fields, empty filter
/// sets, and out-of-range pages all have defined fallback behavior and are
/// not errors. Host-supplied filter predicates are not caught either; a
/// panicking predicate propagates to the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("sort spec mismatch: {sort_by} sort keys but {sort_desc} direction flags")]
    SortSpecMismatch { sort_by: usize, sort_desc: usize },
}
