//! FILENAME: table-engine/src/state.rs
//! View State Coordinator - owns the inputs and recomputes the view.
//!
//! The coordinator holds the only long-lived mutable state of the system:
//! the items, the header set, the view options, and the group key. It owns
//! no derived state; `recompute` re-runs the whole pipeline on demand and
//! consumers poll it after known mutations. Every computation reads one
//! consistent snapshot of the options.

use engine::Record;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::definition::{FieldKey, HeaderSet, RowsPerPage, ViewOptions};
use crate::pipeline::calculate_table_view;
use crate::error::ViewError;
use crate::iterate::page_window;
use crate::view::{TableRows, TableView};

/// How the coordinator treats the host's collection, chosen at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TableMode {
    /// Run the full pipeline: filter, sort, group, page.
    Managed,
    /// Forward the host-prepared collection untouched and compute only the
    /// header-derived layout metadata.
    Passthrough,
}

/// The mutable aggregate driving the pipeline.
#[derive(Debug, Clone)]
pub struct TableState {
    mode: TableMode,
    items: Vec<Record>,
    headers: HeaderSet,
    options: ViewOptions,
    group_by: Option<FieldKey>,
}

impl TableState {
    pub fn new(mode: TableMode) -> Self {
        TableState {
            mode,
            items: Vec::new(),
            headers: HeaderSet::default(),
            options: ViewOptions::default(),
            group_by: None,
        }
    }

    /// A coordinator that runs the full pipeline.
    pub fn managed() -> Self {
        TableState::new(TableMode::Managed)
    }

    /// A coordinator that forwards host-shaped data.
    pub fn passthrough() -> Self {
        TableState::new(TableMode::Passthrough)
    }

    // ------------------------------------------------------------------
    // Builders
    // ------------------------------------------------------------------

    pub fn with_items(mut self, items: Vec<Record>) -> Self {
        self.items = items;
        self
    }

    pub fn with_headers(mut self, headers: HeaderSet) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_group_by(mut self, key: impl Into<FieldKey>) -> Self {
        self.group_by = Some(key.into());
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    // ------------------------------------------------------------------
    // Mutations (single writer: the host goes through these)
    // ------------------------------------------------------------------

    pub fn set_items(&mut self, items: Vec<Record>) {
        self.items = items;
    }

    pub fn set_headers(&mut self, headers: HeaderSet) {
        self.headers = headers;
    }

    pub fn set_options(&mut self, options: ViewOptions) {
        self.options = options;
    }

    pub fn set_group_by(&mut self, key: Option<FieldKey>) {
        self.group_by = key;
    }

    /// Jumps to a page. The window clamps, so out-of-range pages are safe.
    pub fn set_page(&mut self, page: usize) {
        self.options.page = page;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        self.options.rows_per_page = rows_per_page;
        self.options.page = 1;
    }

    /// Changes the search query and returns to the first page.
    pub fn set_search(&mut self, search: Option<String>) {
        self.options.search = search;
        self.options.page = 1;
    }

    /// Cycles the sort state of a column. See `ViewOptions::toggle_sort`.
    pub fn toggle_sort(&mut self, key: &str) {
        self.options.toggle_sort(key);
    }

    // ------------------------------------------------------------------
    // Recompute
    // ------------------------------------------------------------------

    /// Re-runs the pipeline over the current inputs and publishes a fresh
    /// view. In passthrough mode the collection is forwarded as given and
    /// only the header-derived layout is computed.
    pub fn recompute(&self) -> Result<TableView, ViewError> {
        match self.mode {
            TableMode::Managed => {
                // One snapshot of the options for the whole computation
                let options = self.options.clone();
                calculate_table_view(
                    &self.items,
                    &self.headers,
                    &options,
                    self.group_by.as_deref(),
                )
            }
            TableMode::Passthrough => {
                debug!("passthrough view: {} items forwarded", self.items.len());
                Ok(TableView {
                    filtered_count: self.items.len(),
                    rows: TableRows::Flat(self.items.clone()),
                    window: page_window(self.items.len(), 1, RowsPerPage::All),
                    is_flex_width: self.headers.is_flex_width(),
                    widths: self.headers.widths(),
                })
            }
        }
    }
}
