//! FILENAME: table-engine/src/view.rs
//! Table View - Renderable output for the frontend.
//!
//! This module contains the computed, publishable side of the pipeline:
//! the page window, the grouped-or-flat row sequence, and the derived
//! column layout. Everything here is an ephemeral value recomputed per
//! pipeline invocation and never mutated in place.

use engine::{FieldValue, Record};
use serde::{Deserialize, Serialize};

use crate::definition::{ColumnWidth, RowsPerPage};

// ============================================================================
// PAGE WINDOW
// ============================================================================

/// The computed slice bounds for the current page.
/// Consumers slice the upstream sequence with `[start, stop)`.
///
/// Invariant: `0 <= start <= stop <= items_length`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    /// Current page, 1-based.
    pub page: usize,

    /// Page size used to compute the window.
    pub rows_per_page: RowsPerPage,

    /// Length of the sequence being paged (groups when grouping is
    /// active, items otherwise).
    pub items_length: usize,

    /// Inclusive slice start.
    pub start: usize,

    /// Exclusive slice stop.
    pub stop: usize,
}

impl PageWindow {
    /// Number of entries in the window.
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }

    /// Total number of pages, at least 1 even for an empty sequence.
    pub fn page_count(&self) -> usize {
        match self.rows_per_page.limit() {
            None | Some(0) => 1,
            Some(n) => ((self.items_length + n - 1) / n).max(1),
        }
    }

    /// True when the window reaches the end of the sequence.
    pub fn is_last_page(&self) -> bool {
        self.stop >= self.items_length
    }
}

// ============================================================================
// GROUPS
// ============================================================================

/// A contiguous run of records sharing one group key value.
/// Items keep the order they had in the sorted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// The shared field value (the first-seen representative; grouping
    /// buckets by display text).
    pub key: FieldValue,

    /// Member records, in sorted order.
    pub items: Vec<Record>,
}

// ============================================================================
// ROW SEQUENCE
// ============================================================================

/// The final ordered sequence published to the renderer: flat records, or
/// groups when a group key is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableRows {
    Flat(Vec<Record>),
    Grouped(Vec<Group>),
}

impl TableRows {
    /// Number of top-level entries (records or groups).
    pub fn len(&self) -> usize {
        match self {
            TableRows::Flat(items) => items.len(),
            TableRows::Grouped(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TABLE VIEW
// ============================================================================

/// The complete computed view of the table.
/// This is what gets published to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Item count after the filter stage (column predicates plus search),
    /// independent of pagination. Drives "N results" messaging.
    pub filtered_count: usize,

    /// The page slice of the grouped-or-flat sequence.
    pub rows: TableRows,

    /// Slice bounds the rows were taken from.
    pub window: PageWindow,

    /// True when any header declares a numeric width.
    pub is_flex_width: bool,

    /// Per-header derived widths.
    pub widths: Vec<Option<ColumnWidth>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(items_length: usize, rows_per_page: RowsPerPage) -> PageWindow {
        PageWindow {
            page: 1,
            rows_per_page,
            items_length,
            start: 0,
            stop: items_length.min(rows_per_page.limit().unwrap_or(items_length)),
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(window(5, RowsPerPage::Limited(2)).page_count(), 3);
        assert_eq!(window(6, RowsPerPage::Limited(2)).page_count(), 3);
        assert_eq!(window(0, RowsPerPage::Limited(2)).page_count(), 1);
        assert_eq!(window(500, RowsPerPage::All).page_count(), 1);
    }

    #[test]
    fn last_page_detection() {
        let w = PageWindow {
            page: 3,
            rows_per_page: RowsPerPage::Limited(2),
            items_length: 5,
            start: 4,
            stop: 5,
        };
        assert!(w.is_last_page());
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn view_serializes_with_camel_case_keys() {
        let view = TableView {
            filtered_count: 2,
            rows: TableRows::Flat(vec![Record::new().with("name", "ada")]),
            window: window(2, RowsPerPage::Limited(10)),
            is_flex_width: false,
            widths: vec![None],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["filteredCount"], 2);
        assert_eq!(json["isFlexWidth"], false);
        assert!(json["window"]["itemsLength"].is_number());
        assert!(json["rows"]["flat"].is_array());
    }
}
