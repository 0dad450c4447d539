//! Application state types for the texture explorer.
//!
//! Contains the input mode and the pre-computed render state for the catalog
//! page, built fresh each frame from the view and copy controller.

use crate::preview::Thumbnail;
use crate::view::LoadStatus;

/// Application mode for handling different input states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AppMode {
    Normal,      // Page and row navigation
    SearchInput, // '/' pressed, editing the query live
}

/// One table row on the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRenderData {
    /// Catalog position (copy affordance key)
    pub position: usize,
    /// 1-based index within the filtered view
    pub number: usize,
    /// Normalized path shown and copied
    pub display_path: String,
    /// Copy acknowledgment currently showing
    pub copied: bool,
}

/// Data needed to render the catalog page.
#[derive(Debug, Clone)]
pub struct PageRenderData {
    /// Rows on the current page
    pub rows: Vec<RowRenderData>,
    /// Query as typed
    pub query: String,
    pub current_page: usize,
    pub total_pages: usize,
    /// Entries matching the query
    pub matched_count: usize,
    /// Entries in the catalog
    pub total_count: usize,
    pub load_status: LoadStatus,
    /// Selected row within the page
    pub selected_row: Option<usize>,
    /// Preview of the selected row
    pub thumbnail: Option<Thumbnail>,
}

impl PageRenderData {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
