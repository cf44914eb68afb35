//! FILENAME: table-engine/src/lib.rs
//! Table view pipeline for tabular data widgets.
//!
//! This crate turns a raw, unordered record collection and a declarative
//! column specification into a deterministic, paginated, optionally
//! grouped view ready for a presentation layer. It depends on `engine`
//! only for shared types (FieldValue, Record).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the view IS)
//! - `iterate`: Generic search/sort/paginate defaults (the reusable base)
//! - `pipeline`: Table-specific calculation (HOW we compute)
//! - `view`: Renderable output for the frontend (WHAT we display)
//! - `state`: The coordinator owning the mutable inputs

pub mod definition;
pub mod error;
pub mod iterate;
pub mod pipeline;
pub mod state;
pub mod view;

pub use definition::{
    ColumnFilter, ColumnWidth, FieldKey, Header, HeaderSet, RowsPerPage, SortKey, SortSpec,
    ViewOptions,
};
pub use pipeline::{calculate_table_view, effective_sort_keys, filter_columns, group_rows};
pub use error::ViewError;
pub use iterate::{compare_records, page_window, search_rows, sort_rows};
pub use state::{TableMode, TableState};
pub use view::{Group, PageWindow, TableRows, TableView};
