//! Catalog view: the query/page state machine over a loaded catalog.
//!
//! Only the inputs are stored (catalog, query, current page, row selection).
//! The filtered view and page bounds are recomputed from them on demand, so
//! the page invariant cannot drift out of sync with the query.

use ratatui::widgets::TableState;

use crate::catalog::{Catalog, FilteredView, LoadError, TextureEntry};
use crate::paginate::{self, ITEMS_PER_PAGE};

/// Progress of the catalog load backing the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A load is in flight (initial or reload)
    Pending,
    /// Catalog loaded with this many entries
    Loaded(usize),
    /// Last load failed; catalog is empty
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CatalogView {
    catalog: Catalog,
    query: String,
    current_page: usize,
    page_size: usize,
    load_status: LoadStatus,
    /// Row selection within the current page
    pub table_state: TableState,
}

impl CatalogView {
    /// Empty view waiting for its first load.
    pub fn new() -> Self {
        Self::with_page_size(ITEMS_PER_PAGE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            catalog: Catalog::default(),
            query: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            load_status: LoadStatus::Pending,
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn is_loading(&self) -> bool {
        self.load_status == LoadStatus::Pending
    }

    /// Entries matching the current query.
    pub fn filtered(&self) -> FilteredView<'_> {
        self.catalog.filter(&self.query)
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.filtered().len(), self.page_size)
    }

    /// Replace the query. A changed query returns to page 1, even if the old
    /// page would still exist under it; an identical query is a no-op.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.reset_to_first_page();
    }

    pub fn next_page(&mut self) {
        let next = paginate::next_page(self.current_page, self.total_pages());
        self.move_to_page(next);
    }

    pub fn previous_page(&mut self) {
        let prev = paginate::previous_page(self.current_page);
        self.move_to_page(prev);
    }

    /// Jump to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        let page = paginate::clamp_page(page, self.total_pages());
        self.move_to_page(page);
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Mark a (re)load as in flight. The current catalog stays visible until
    /// the result arrives.
    pub fn begin_load(&mut self) {
        self.load_status = LoadStatus::Pending;
    }

    /// Apply a finished load.
    ///
    /// Success replaces the catalog; failure discards it. Either way the query
    /// is kept and the view returns to page 1. The error is handed back so the
    /// caller can report it.
    pub fn apply_load(&mut self, result: Result<Catalog, LoadError>) -> Result<usize, LoadError> {
        let outcome = match result {
            Ok(catalog) => {
                let len = catalog.len();
                self.catalog = catalog;
                self.load_status = LoadStatus::Loaded(len);
                Ok(len)
            }
            Err(e) => {
                self.catalog = Catalog::default();
                self.load_status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        };
        self.reset_to_first_page();
        outcome
    }

    /// Catalog positions shown on the current page.
    pub fn page_positions(&self) -> Vec<usize> {
        let view = self.filtered();
        paginate::paginate(view.positions(), self.current_page, self.page_size)
            .items
            .to_vec()
    }

    /// Entries on the current page with their catalog positions.
    pub fn page_entries(&self) -> Vec<(usize, &TextureEntry)> {
        self.page_positions()
            .into_iter()
            .filter_map(|i| self.catalog.get(i).map(|entry| (i, entry)))
            .collect()
    }

    /// Index within the filtered view of the first row on the current page.
    pub fn page_offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// Currently selected entry and its catalog position.
    pub fn selected_entry(&self) -> Option<(usize, &TextureEntry)> {
        let row = self.table_state.selected()?;
        self.page_entries().into_iter().nth(row)
    }

    pub fn select_next_row(&mut self) {
        let rows = self.page_positions().len();
        if let Some(selected) = self.table_state.selected() {
            if selected + 1 < rows {
                self.table_state.select(Some(selected + 1));
            }
        }
    }

    pub fn select_previous_row(&mut self) {
        if let Some(selected) = self.table_state.selected() {
            if selected > 0 {
                self.table_state.select(Some(selected - 1));
            }
        }
    }

    pub fn select_first_row(&mut self) {
        self.table_state.select(Some(0));
    }

    pub fn select_last_row(&mut self) {
        let rows = self.page_positions().len();
        self.table_state.select(Some(rows.saturating_sub(1)));
    }

    fn reset_to_first_page(&mut self) {
        self.current_page = 1;
        self.table_state = TableState::default().with_selected(Some(0));
    }

    fn move_to_page(&mut self, page: usize) {
        if page != self.current_page {
            self.current_page = page;
            self.table_state = TableState::default().with_selected(Some(0));
        }
    }
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_view(n: usize) -> CatalogView {
        let mut view = CatalogView::new();
        let paths: Vec<String> = (0..n).map(|i| format!("textures/t{}.png", i)).collect();
        view.apply_load(Ok(Catalog::load(paths))).unwrap();
        view
    }

    #[test]
    fn test_view_initial_state() {
        let view = CatalogView::new();
        assert_eq!(view.query(), "");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.page_size(), ITEMS_PER_PAGE);
        assert!(view.catalog().is_empty());
        assert!(view.is_loading());
        assert_eq!(view.total_pages(), 1);
        assert!(view.page_entries().is_empty());
    }

    #[test]
    fn test_row_selection_bounded_by_page() {
        let mut view = loaded_view(25);
        view.select_last_row();
        assert_eq!(view.table_state.selected(), Some(19));
        view.select_next_row();
        assert_eq!(view.table_state.selected(), Some(19));

        view.next_page();
        assert_eq!(view.table_state.selected(), Some(0), "Page change resets selection");
        view.select_last_row();
        assert_eq!(view.table_state.selected(), Some(4));
        assert_eq!(view.selected_entry().map(|(i, _)| i), Some(24));

        view.select_first_row();
        view.select_previous_row();
        assert_eq!(view.table_state.selected(), Some(0));
    }

    #[test]
    fn test_page_offset() {
        let mut view = loaded_view(45);
        assert_eq!(view.page_offset(), 0);
        view.next_page();
        view.next_page();
        assert_eq!(view.page_offset(), 40);
        assert_eq!(view.page_positions(), vec![40, 41, 42, 43, 44]);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut view = loaded_view(45);
        view.go_to_page(99);
        assert_eq!(view.current_page(), 3);
        view.go_to_page(0);
        assert_eq!(view.current_page(), 1);
    }
}
