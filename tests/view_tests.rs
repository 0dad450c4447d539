//! Integration tests for the catalog view state machine and its rendering.
//!
//! Covers query/page transitions, load success and failure, the end-to-end
//! filter + paginate path, and the empty-state row drawn into a test backend.

use std::io;
use std::time::Instant;

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use texture_explorer::catalog::{Catalog, LoadError};
use texture_explorer::clipboard::{Clipboard, CopyController, CopyError};
use texture_explorer::render::{build_page_render_data, render_app, EMPTY_STATE, LOADING_STATE};
use texture_explorer::state::AppMode;
use texture_explorer::view::{CatalogView, LoadStatus};

struct NullClipboard;

impl Clipboard for NullClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), CopyError> {
        Ok(())
    }
}

/// Helper to create a loaded view with `n` entries.
fn create_view(n: usize) -> CatalogView {
    let paths: Vec<String> = (0..n)
        .map(|i| format!("textures/blocks/block_{:03}.png", i))
        .collect();
    let mut view = CatalogView::new();
    view.apply_load(Ok(Catalog::load(paths))).unwrap();
    view
}

fn load_failure() -> LoadError {
    LoadError::Io {
        path: "texture_list.json".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "missing"),
    }
}

/// Render the screen and return its text, one string per line.
fn render_to_lines(view: &mut CatalogView, copies: &CopyController) -> Vec<String> {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    let page = build_page_render_data(view, copies, None);
    terminal
        .draw(|frame| {
            render_app(frame, &page, &mut view.table_state, AppMode::Normal, "", None);
        })
        .unwrap();

    let buffer = terminal.backend().buffer().clone();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect()
}

#[test]
fn test_end_to_end_filter_and_paginate() {
    let mut view = CatalogView::with_page_size(2);
    view.apply_load(Ok(Catalog::load(["a/x.png", "a/y.png", "b/x.png"])))
        .unwrap();

    view.set_query("x");

    let paths: Vec<&str> = view.filtered().entries().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["a/x.png", "b/x.png"]);
    assert_eq!(view.total_pages(), 1);

    let page: Vec<&str> = view
        .page_entries()
        .into_iter()
        .map(|(_, e)| e.path.as_str())
        .collect();
    assert_eq!(page, vec!["a/x.png", "b/x.png"]);
    assert_eq!(view.page_positions(), vec![0, 2]);
}

#[test]
fn test_query_change_resets_page() {
    let mut view = create_view(100);
    view.next_page();
    view.next_page();
    assert_eq!(view.current_page(), 3);

    // New query still has enough matches for page 3, but the page resets anyway
    view.set_query("block_");
    assert_eq!(view.total_pages(), 5);
    assert_eq!(view.current_page(), 1);
}

#[test]
fn test_unchanged_query_keeps_page() {
    let mut view = create_view(100);
    view.set_query("block_");
    view.next_page();
    assert_eq!(view.current_page(), 2);

    view.set_query("block_");
    assert_eq!(view.current_page(), 2, "Setting the same query is not a change");

    view.set_query("block_1");
    assert_eq!(view.current_page(), 1);
}

#[test]
fn test_navigation_bounds() {
    let mut view = create_view(45);
    assert!(!view.has_previous_page());
    view.previous_page();
    assert_eq!(view.current_page(), 1);

    view.next_page();
    view.next_page();
    assert_eq!(view.current_page(), 3);
    assert!(!view.has_next_page());
    view.next_page();
    assert_eq!(view.current_page(), 3, "next at last page is a no-op");
}

#[test]
fn test_page_invariant_after_every_transition() {
    let mut view = create_view(65);
    let check = |view: &CatalogView| {
        assert!(view.current_page() >= 1);
        assert!(view.current_page() <= view.total_pages());
    };

    for step in 0..10 {
        match step % 4 {
            0 => view.next_page(),
            1 => view.set_query(if step % 3 == 0 { "00" } else { "block" }),
            2 => view.next_page(),
            _ => view.previous_page(),
        }
        check(&view);
    }

    view.apply_load(Ok(Catalog::load(["only/one.png"]))).unwrap();
    check(&view);
}

#[test]
fn test_reload_keeps_query_and_resets_page() {
    let mut view = create_view(100);
    view.set_query("block");
    view.next_page();
    view.next_page();

    view.begin_load();
    assert!(view.is_loading());
    assert_eq!(view.catalog().len(), 100, "Old catalog stays visible while reloading");

    let count = view.apply_load(Ok(Catalog::load(["blocks/a.png", "items/b.png"])));
    assert_eq!(count.unwrap(), 2);
    assert_eq!(view.query(), "block");
    assert_eq!(view.current_page(), 1);
    assert_eq!(view.filtered().len(), 1);
    assert_eq!(view.load_status(), &LoadStatus::Loaded(2));
}

#[test]
fn test_failed_load_empties_catalog() {
    let mut view = create_view(30);
    view.next_page();

    let result = view.apply_load(Err(load_failure()));

    assert!(result.is_err());
    assert!(view.catalog().is_empty(), "No stale catalog is kept");
    assert_eq!(view.current_page(), 1);
    assert_eq!(view.total_pages(), 1);
    assert!(matches!(view.load_status(), LoadStatus::Failed(_)));
}

#[test]
fn test_render_data_rows() {
    let mut view = create_view(25);
    let copies = CopyController::new(Box::new(NullClipboard));
    view.next_page();

    let page = build_page_render_data(&view, &copies, Some("assets"));

    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.rows[0].number, 21);
    assert_eq!(page.rows[0].position, 20);
    assert_eq!(page.rows[0].display_path, "textures/blocks/block_020");
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.matched_count, 25);
    assert!(page.has_previous());
    assert!(!page.has_next());
    assert_eq!(
        page.thumbnail.map(|t| t.src),
        Some("assets/textures/blocks/block_020.png".to_string())
    );
}

#[test]
fn test_render_data_reflects_copy_state() {
    let mut view = create_view(3);
    let mut copies = CopyController::new(Box::new(NullClipboard));
    view.select_next_row();

    let (position, entry) = view.selected_entry().expect("row selected");
    let text = texture_explorer::path::normalize(&entry.path);
    copies.copy(position, &text, Instant::now()).unwrap();

    let page = build_page_render_data(&view, &copies, None);
    let copied: Vec<bool> = page.rows.iter().map(|r| r.copied).collect();
    assert_eq!(copied, vec![false, true, false]);
}

#[test]
fn test_render_empty_state_row() {
    let mut view = create_view(5);
    let copies = CopyController::new(Box::new(NullClipboard));
    view.set_query("zzz-no-match");

    let lines = render_to_lines(&mut view, &copies);
    assert!(
        lines.iter().any(|l| l.contains(EMPTY_STATE)),
        "Empty result should render the explicit empty-state row"
    );
}

#[test]
fn test_render_loading_state_row() {
    let mut view = CatalogView::new();
    let copies = CopyController::new(Box::new(NullClipboard));

    let lines = render_to_lines(&mut view, &copies);
    assert!(lines.iter().any(|l| l.contains(LOADING_STATE)));
}

#[test]
fn test_render_failed_load_shows_empty_state() {
    let mut view = CatalogView::new();
    let copies = CopyController::new(Box::new(NullClipboard));
    let _ = view.apply_load(Err(load_failure()));

    let lines = render_to_lines(&mut view, &copies);
    assert!(lines.iter().any(|l| l.contains(EMPTY_STATE)));
}

#[test]
fn test_render_pagination_only_with_multiple_pages() {
    let copies = CopyController::new(Box::new(NullClipboard));

    let mut single = create_view(5);
    let lines = render_to_lines(&mut single, &copies);
    assert!(!lines.iter().any(|l| l.contains("Page 1 of")));

    let mut multi = create_view(45);
    let lines = render_to_lines(&mut multi, &copies);
    assert!(lines.iter().any(|l| l.contains("Page 1 of 3")));
}
