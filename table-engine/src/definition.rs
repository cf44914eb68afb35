//! FILENAME: table-engine/src/definition.rs
//! Table View Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a table view.
//! These structures are designed to be:
//! - Serializable (for saving view state or crossing a host bridge)
//! - Immutable snapshots of user intent
//!
//! The one exception is the host-supplied column predicate, which is a
//! closure and is skipped during serialization.

use std::fmt;
use std::sync::Arc;

use engine::FieldValue;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ViewError;

/// Name of a record field referenced by headers, sort keys, or the group key.
pub type FieldKey = String;

// ============================================================================
// COLUMN WIDTH
// ============================================================================

/// An explicit column width declared on a header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnWidth {
    /// Proportional flex units. Any header declaring this switches the
    /// whole header set into flex-width mode.
    Units(f64),
    /// An opaque length string passed through to the renderer (e.g. "12em").
    Css(String),
}

// ============================================================================
// HEADER
// ============================================================================

/// Host-supplied predicate applied to a record's value at this column.
pub type ColumnFilter = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// A column specification: which field it reads, an optional per-column
/// filter predicate, and an optional explicit width.
///
/// Headers are keyed by `value`; consumers assume `value` is unique across
/// the set. That is a caller contract and is not enforced here.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// The record field this column reads.
    pub value: FieldKey,

    /// Column filter predicate. Items are retained only if every header
    /// carrying a predicate accepts the item's value at that field.
    /// Closures do not serialize; a deserialized header has no filter.
    #[serde(skip)]
    pub filter: Option<ColumnFilter>,

    /// Explicit width, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub width: Option<ColumnWidth>,
}

impl Header {
    pub fn new(value: impl Into<FieldKey>) -> Self {
        Header {
            value: value.into(),
            filter: None,
            width: None,
        }
    }

    /// Sets an explicit width.
    pub fn with_width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the column filter predicate.
    pub fn with_filter(
        mut self,
        filter: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("value", &self.value)
            .field("filter", &self.filter.as_ref().map(|_| ".."))
            .field("width", &self.width)
            .finish()
    }
}

// ============================================================================
// HEADER SET
// ============================================================================

/// The header registry: owns the column specifications as given and exposes
/// the derived layout queries. Input headers are never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSet {
    headers: Vec<Header>,
}

impl HeaderSet {
    pub fn new(headers: Vec<Header>) -> Self {
        HeaderSet { headers }
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Headers carrying a column filter predicate.
    pub fn filter_columns(&self) -> impl Iterator<Item = &Header> {
        self.headers.iter().filter(|h| h.filter.is_some())
    }

    /// True when any header declares a numeric width. In that case the
    /// whole set is laid out in proportional flex units.
    pub fn is_flex_width(&self) -> bool {
        self.headers
            .iter()
            .any(|h| matches!(h.width, Some(ColumnWidth::Units(_))))
    }

    /// Per-header widths: the explicit width if declared, otherwise one
    /// flex unit in flex mode, otherwise None (natural sizing).
    pub fn widths(&self) -> Vec<Option<ColumnWidth>> {
        let flex = self.is_flex_width();
        self.headers
            .iter()
            .map(|h| match &h.width {
                Some(w) => Some(w.clone()),
                None if flex => Some(ColumnWidth::Units(1.0)),
                None => None,
            })
            .collect()
    }
}

// ============================================================================
// SORT SPECIFICATION
// ============================================================================

/// A single sort key with its direction. Earlier keys in a spec dominate
/// later ones (tie-break precedence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    pub key: FieldKey,
    pub descending: bool,
}

impl SortKey {
    pub fn new(key: impl Into<FieldKey>, descending: bool) -> Self {
        SortKey {
            key: key.into(),
            descending,
        }
    }

    /// Ascending sort on `key`.
    pub fn ascending(key: impl Into<FieldKey>) -> Self {
        SortKey::new(key, false)
    }
}

/// Effective sort key list built per recompute. Inline capacity covers the
/// common case of a group key plus a few user keys.
pub type SortSpec = SmallVec<[SortKey; 4]>;

// ============================================================================
// ROWS PER PAGE
// ============================================================================

/// Page size: a positive row count, or `All` for no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowsPerPage {
    Limited(usize),
    All,
}

impl RowsPerPage {
    /// The row limit, or None when unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self {
            RowsPerPage::Limited(n) => Some(*n),
            RowsPerPage::All => None,
        }
    }
}

impl Default for RowsPerPage {
    fn default() -> Self {
        RowsPerPage::Limited(10)
    }
}

// ============================================================================
// VIEW OPTIONS
// ============================================================================

/// The mutable view configuration: the single source of truth driving the
/// sort and pagination stages.
///
/// `sort_by` and `sort_desc` are parallel arrays and must stay the same
/// length. A mismatch is a caller contract violation and fails fast at
/// recompute instead of being silently repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    /// Current page, 1-based.
    pub page: usize,

    /// Page size.
    pub rows_per_page: RowsPerPage,

    /// Sort keys in precedence order.
    pub sort_by: Vec<FieldKey>,

    /// Per-key direction flags, parallel to `sort_by`.
    pub sort_desc: Vec<bool>,

    /// Free-text search query, matched case-insensitively against the
    /// display text of every field value.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub search: Option<String>,

    /// When set, toggling a descending key flips it back to ascending
    /// instead of removing it, so at least that key stays active.
    #[serde(default)]
    pub must_sort: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            page: 1,
            rows_per_page: RowsPerPage::default(),
            sort_by: Vec::new(),
            sort_desc: Vec::new(),
            search: None,
            must_sort: false,
        }
    }
}

impl ViewOptions {
    /// Checks the parallel-array invariant.
    pub fn validate(&self) -> Result<(), ViewError> {
        if self.sort_by.len() != self.sort_desc.len() {
            return Err(ViewError::SortSpecMismatch {
                sort_by: self.sort_by.len(),
                sort_desc: self.sort_desc.len(),
            });
        }
        Ok(())
    }

    /// The requested sort keys as (key, direction) pairs.
    pub fn sort_keys(&self) -> Result<SortSpec, ViewError> {
        self.validate()?;
        Ok(self
            .sort_by
            .iter()
            .zip(self.sort_desc.iter())
            .map(|(key, desc)| SortKey::new(key.clone(), *desc))
            .collect())
    }

    /// Cycles the sort state of a column: ascending, then descending, then
    /// removed. With `must_sort`, descending flips back to ascending
    /// instead of removal. Keys not yet in the spec are appended ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        match self.sort_by.iter().position(|k| k == key) {
            None => {
                self.sort_by.push(key.to_string());
                self.sort_desc.push(false);
            }
            Some(i) if !self.sort_desc[i] => {
                self.sort_desc[i] = true;
            }
            Some(i) if self.must_sort => {
                self.sort_desc[i] = false;
            }
            Some(i) => {
                self.sort_by.remove(i);
                self.sort_desc.remove(i);
            }
        }
    }
}
