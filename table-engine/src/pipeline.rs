//! FILENAME: table-engine/src/pipeline.rs
//! Table Pipeline - The calculation core that transforms records into a view.
//!
//! This module layers the table-specific behavior over the generic
//! iteration base in `iterate.rs`:
//! - Column predicates joined by logical AND ahead of the free-text pass
//! - The group key prepended ascending to the sort spec at comparison time
//! - A linear grouping pass keyed by the group value's display text
//! - The full-pipeline orchestrator `calculate_table_view`
//!
//! Data flows strictly left to right: items -> filter -> sort -> group ->
//! page. Every stage is a pure function of its inputs.

use engine::Record;
use log::debug;
use rustc_hash::FxHashMap;
use smallvec::smallvec;

use crate::definition::{HeaderSet, SortKey, SortSpec, ViewOptions};
use crate::error::ViewError;
use crate::iterate::{page_window, search_rows, sort_rows};
use crate::view::{Group, TableRows, TableView};

// ============================================================================
// COLUMN FILTER PASS
// ============================================================================

/// Retains the rows accepted by every header that carries a filter
/// predicate, applied to the record's value at that header's field.
/// Headers without predicates do not participate; if none carry one the
/// pass is a passthrough.
pub fn filter_columns(items: &[Record], rows: Vec<usize>, headers: &HeaderSet) -> Vec<usize> {
    let columns: Vec<_> = headers
        .filter_columns()
        .filter_map(|h| h.filter.as_ref().map(|f| (h.value.as_str(), f)))
        .collect();
    if columns.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|&row| {
            columns
                .iter()
                .all(|(field, filter)| filter(items[row].value_of(field)))
        })
        .collect()
}

// ============================================================================
// EFFECTIVE SORT SPEC
// ============================================================================

/// Builds the key list the sort stage actually compares with.
///
/// When a group key is set it is prepended ascending, regardless of any
/// direction the caller supplied for that key; a user entry for the same
/// key further down the list is dominated by the prepended one (equal
/// values tie there). The caller-visible options are never rewritten.
pub fn effective_sort_keys(
    options: &ViewOptions,
    group_by: Option<&str>,
) -> Result<SortSpec, ViewError> {
    let requested = options.sort_keys()?;
    match group_by {
        Some(key) => {
            let mut spec: SortSpec = smallvec![SortKey::ascending(key)];
            spec.extend(requested);
            Ok(spec)
        }
        None => Ok(requested),
    }
}

// ============================================================================
// GROUPING PASS
// ============================================================================

/// Partitions rows into groups keyed by their value at `key`, in a single
/// linear pass. Buckets are created on first encounter and appended to in
/// input order, so group order is first-appearance order and intra-group
/// order equals input order. The pass never reorders rows; invoke it on a
/// sequence already sorted with `key` as the primary sort key or group
/// contiguity in the rendered output is not guaranteed.
///
/// Buckets are identified by the value's display text, so records missing
/// the field all land in the single bucket keyed by `Empty`.
pub fn group_rows(items: &[Record], rows: &[usize], key: &str) -> Vec<Group> {
    let mut bucket_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<Group> = Vec::new();

    for &row in rows {
        let value = items[row].value_of(key);
        let index = *bucket_index
            .entry(value.display_value())
            .or_insert_with(|| {
                groups.push(Group {
                    key: value.clone(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
        groups[index].items.push(items[row].clone());
    }

    groups
}

// ============================================================================
// PIPELINE ORCHESTRATION
// ============================================================================

/// Runs the full managed pipeline over `items` and produces the view:
/// filter (column predicates, then free-text search), stable sort with
/// grouping precedence, optional grouping, pagination, and the derived
/// header layout.
///
/// Inputs are read-only; invoking this twice with unchanged inputs yields
/// a structurally identical view.
pub fn calculate_table_view(
    items: &[Record],
    headers: &HeaderSet,
    options: &ViewOptions,
    group_by: Option<&str>,
) -> Result<TableView, ViewError> {
    // Validates the sort invariant before any work happens
    let spec = effective_sort_keys(options, group_by)?;

    let rows: Vec<usize> = (0..items.len()).collect();
    let rows = filter_columns(items, rows, headers);
    let rows = match &options.search {
        Some(query) => search_rows(items, rows, query),
        None => rows,
    };
    let filtered_count = rows.len();

    let rows = sort_rows(items, rows, &spec);

    let (window, table_rows) = match group_by {
        Some(key) => {
            let mut groups = group_rows(items, &rows, key);
            let window = page_window(groups.len(), options.page, options.rows_per_page);
            let page: Vec<Group> = groups.drain(window.start..window.stop).collect();
            (window, TableRows::Grouped(page))
        }
        None => {
            let window = page_window(rows.len(), options.page, options.rows_per_page);
            let page: Vec<Record> = rows[window.start..window.stop]
                .iter()
                .map(|&row| items[row].clone())
                .collect();
            (window, TableRows::Flat(page))
        }
    };

    debug!(
        "table view recomputed: {} of {} items after filter, {} sort keys, window {}..{}",
        filtered_count,
        items.len(),
        spec.len(),
        window.start,
        window.stop
    );

    Ok(TableView {
        filtered_count,
        rows: table_rows,
        window,
        is_flex_width: headers.is_flex_width(),
        widths: headers.widths(),
    })
}
