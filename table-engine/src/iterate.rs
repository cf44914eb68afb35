//! FILENAME: table-engine/src/iterate.rs
//! Generic iteration base: search, sort, and pagination defaults.
//!
//! These are the stages every record collection supports, independent of
//! table-specific behavior. The table layer in `engine.rs` composes them
//! with column predicates and grouping precedence instead of overriding
//! them. All functions are pure: they take row indices into a shared item
//! slice and return new index sequences, never touching the records.

use std::cmp::Ordering;

use engine::{compare_values, Record};

use crate::definition::{RowsPerPage, SortKey};
use crate::view::PageWindow;

// ============================================================================
// FREE-TEXT SEARCH
// ============================================================================

/// Retains the rows whose records match the query: case-insensitive
/// substring containment against the display text of any field value.
/// An empty or whitespace-only query is a passthrough.
pub fn search_rows(items: &[Record], rows: Vec<usize>, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|&row| {
            items[row]
                .values()
                .any(|value| value.display_value().to_lowercase().contains(&needle))
        })
        .collect()
}

// ============================================================================
// MULTI-KEY STABLE SORT
// ============================================================================

/// Compares two records key-by-key in spec order. The first key that does
/// not tie decides; a descending key negates its comparison. Missing
/// fields read as `Empty`, the minimal value of the underlying order.
pub fn compare_records(a: &Record, b: &Record, spec: &[SortKey]) -> Ordering {
    for sort_key in spec {
        let ord = compare_values(a.value_of(&sort_key.key), b.value_of(&sort_key.key));
        let ord = if sort_key.descending { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Stable multi-key sort over row indices. Rows tied on every key keep
/// their relative input order, which is what makes grouping and pagination
/// deterministic across recomputes. An empty spec is a passthrough.
pub fn sort_rows(items: &[Record], mut rows: Vec<usize>, spec: &[SortKey]) -> Vec<usize> {
    if spec.is_empty() {
        return rows;
    }

    rows.sort_by(|&a, &b| compare_records(&items[a], &items[b], spec));
    rows
}

// ============================================================================
// PAGINATION
// ============================================================================

/// Converts a 1-based page index and page size into clamped slice bounds
/// over a sequence of `items_length` entries.
pub fn page_window(items_length: usize, page: usize, rows_per_page: RowsPerPage) -> PageWindow {
    let page = page.max(1);
    let (start, stop) = match rows_per_page.limit() {
        Some(limit) => {
            let start = (page - 1).saturating_mul(limit).min(items_length);
            let stop = start.saturating_add(limit).min(items_length);
            (start, stop)
        }
        None => (0, items_length),
    };

    PageWindow {
        page,
        rows_per_page,
        items_length,
        start,
        stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::FieldValue;

    fn people() -> Vec<Record> {
        vec![
            Record::new().with("name", "carol").with("age", 31.0),
            Record::new().with("name", "alice").with("age", 27.0),
            Record::new().with("name", "bob").with("age", 31.0),
            Record::new().with("name", "dave"), // no age field
        ]
    }

    fn all_rows(items: &[Record]) -> Vec<usize> {
        (0..items.len()).collect()
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let items = people();
        let rows = search_rows(&items, all_rows(&items), "ALI");
        assert_eq!(rows, vec![1]);

        // Numbers match against their display text
        let rows = search_rows(&items, all_rows(&items), "31");
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn blank_search_is_a_passthrough() {
        let items = people();
        assert_eq!(search_rows(&items, all_rows(&items), "   "), all_rows(&items));
    }

    #[test]
    fn sort_orders_by_key_then_preserves_input_order() {
        let items = people();
        let spec = [SortKey::ascending("age")];
        let rows = sort_rows(&items, all_rows(&items), &spec);
        // dave has no age, so he sorts first; carol and bob tie on 31 and
        // keep their input order
        assert_eq!(rows, vec![3, 1, 0, 2]);
    }

    #[test]
    fn sort_is_idempotent() {
        let items = people();
        let spec = [SortKey::new("age", true), SortKey::ascending("name")];
        let once = sort_rows(&items, all_rows(&items), &spec);
        let twice = sort_rows(&items, once.clone(), &spec);
        assert_eq!(once, twice);
    }

    #[test]
    fn descending_places_missing_values_last() {
        let items = people();
        let spec = [SortKey::new("age", true)];
        let rows = sort_rows(&items, all_rows(&items), &spec);
        assert_eq!(*rows.last().unwrap(), 3);
        assert_eq!(items[rows[3]].value_of("age"), &FieldValue::Empty);
    }

    #[test]
    fn later_keys_break_ties() {
        let items = people();
        let spec = [SortKey::ascending("age"), SortKey::new("name", true)];
        let rows = sort_rows(&items, all_rows(&items), &spec);
        // 31-year-olds ordered carol before bob by the descending name key
        assert_eq!(rows, vec![3, 1, 0, 2]);
    }

    #[test]
    fn empty_spec_keeps_input_order() {
        let items = people();
        assert_eq!(sort_rows(&items, all_rows(&items), &[]), all_rows(&items));
    }

    #[test]
    fn page_window_middle_page() {
        let w = page_window(5, 2, RowsPerPage::Limited(2));
        assert_eq!((w.start, w.stop), (2, 4));
    }

    #[test]
    fn page_window_clamps_final_page() {
        let w = page_window(5, 3, RowsPerPage::Limited(2));
        assert_eq!((w.start, w.stop), (4, 5));
    }

    #[test]
    fn page_window_past_the_end_is_empty() {
        let w = page_window(5, 9, RowsPerPage::Limited(2));
        assert_eq!((w.start, w.stop), (5, 5));
        assert!(w.is_empty());
    }

    #[test]
    fn page_window_all_spans_everything() {
        let w = page_window(123, 7, RowsPerPage::All);
        assert_eq!((w.start, w.stop), (0, 123));
    }

    #[test]
    fn page_window_bounds_invariant() {
        for len in [0usize, 1, 5, 17] {
            for page in 1..6 {
                for limit in [1usize, 2, 3, 10] {
                    let w = page_window(len, page, RowsPerPage::Limited(limit));
                    assert!(w.start <= w.stop, "start <= stop for len={len} page={page}");
                    assert!(w.stop <= len, "stop <= len for len={len} page={page}");
                    assert!(w.len() <= limit, "window no larger than page size");
                }
            }
        }
    }
}
