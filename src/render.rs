//! Rendering functions for the terminal UI.
//!
//! Contains the render-data builder for the current page and the widgets that
//! draw the header, catalog table, preview panel, pagination bar and footer.

use crate::clipboard::CopyController;
use crate::path::normalize;
use crate::preview::Thumbnail;
use crate::state::{AppMode, PageRenderData, RowRenderData};
use crate::view::{CatalogView, LoadStatus};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

/// Text of the empty-state row.
pub const EMPTY_STATE: &str = "No textures found";

/// Text of the empty-state row while the first load is in flight.
pub const LOADING_STATE: &str = "Loading textures...";

/// Width of the preview panel (including borders).
const PREVIEW_WIDTH: u16 = 36;

/// Build render data for the current page.
pub fn build_page_render_data(
    view: &CatalogView,
    copies: &CopyController,
    asset_base: Option<&str>,
) -> PageRenderData {
    let filtered = view.filtered();
    let matched_count = filtered.len();
    let offset = view.page_offset();

    let rows: Vec<RowRenderData> = view
        .page_entries()
        .into_iter()
        .enumerate()
        .map(|(i, (position, entry))| RowRenderData {
            position,
            number: offset + i + 1,
            display_path: normalize(&entry.path),
            copied: copies.is_copied(position),
        })
        .collect();

    let thumbnail = view
        .selected_entry()
        .map(|(_, entry)| Thumbnail::for_entry(entry, asset_base));

    PageRenderData {
        rows,
        query: view.query().to_string(),
        current_page: view.current_page(),
        total_pages: view.total_pages(),
        matched_count,
        total_count: view.catalog().len(),
        load_status: view.load_status().clone(),
        selected_row: view.table_state.selected(),
        thumbnail,
    }
}

/// Build the header line: match counts and load progress.
pub fn build_title(page: &PageRenderData) -> String {
    let counts = if page.query.trim().is_empty() {
        format!("{} textures", page.total_count)
    } else {
        format!(
            "{} of {} textures match \"{}\"",
            page.matched_count,
            page.total_count,
            page.query.trim()
        )
    };

    let status = match &page.load_status {
        LoadStatus::Pending => " (loading...)".to_string(),
        LoadStatus::Loaded(_) => String::new(),
        LoadStatus::Failed(_) => " (load failed)".to_string(),
    };

    format!(" Texture Library | {}{} ", counts, status)
}

/// Render the catalog table for the current page.
///
/// An empty page renders one explicit empty-state row instead of a blank table.
pub fn render_catalog_table(
    frame: &mut Frame,
    area: Rect,
    page: &PageRenderData,
    table_state: &mut TableState,
) {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let header_row = Row::new(vec![
        Cell::from("#"),
        Cell::from("PATH"),
        Cell::from("ACTION"),
    ])
    .style(header_style);

    let widths = [
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(10),
    ];

    let block = Block::default()
        .title(build_title(page))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if page.rows.is_empty() {
        let message = if page.load_status == LoadStatus::Pending && page.total_count == 0 {
            LOADING_STATE
        } else {
            EMPTY_STATE
        };
        let empty_row = Row::new(vec![
            Cell::from(""),
            Cell::from(message).style(Style::default().fg(Color::DarkGray)),
            Cell::from(""),
        ]);
        let table = Table::new(vec![empty_row], widths)
            .header(header_row)
            .block(block);
        frame.render_widget(table, area);
        return;
    }

    let data_rows: Vec<Row> = page
        .rows
        .iter()
        .map(|row| {
            let action = if row.copied {
                Cell::from("✓ copied").style(Style::default().fg(Color::Green))
            } else {
                Cell::from("copy").style(Style::default().fg(Color::DarkGray))
            };
            Row::new(vec![
                Cell::from(row.number.to_string()),
                Cell::from(row.display_path.as_str()),
                action,
            ])
        })
        .collect();

    let table = Table::new(data_rows, widths)
        .header(header_row)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(table, area, table_state);
}

/// Render the preview panel for the selected row.
pub fn render_preview(frame: &mut Frame, area: Rect, thumbnail: Option<&Thumbnail>) {
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines: Vec<Line> = match thumbnail {
        Some(thumb) => {
            let availability = match thumb.local_exists() {
                Some(true) => Span::styled("asset found", Style::default().fg(Color::Green)),
                Some(false) => Span::styled("asset missing", Style::default().fg(Color::Red)),
                None => Span::styled("remote asset", Style::default().fg(Color::Cyan)),
            };
            vec![
                Line::from(Span::styled(
                    thumb.alt.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{}x{} px", thumb.width, thumb.height)),
                Line::from(availability),
                Line::from(""),
                Line::from(thumb.src.clone()),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Nothing selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Build the pagination line, e.g. `< Prev  Page 2 of 5  Next >`.
///
/// Controls at a boundary are dimmed.
pub fn build_pagination_line(page: &PageRenderData) -> Line<'static> {
    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    Line::from(vec![
        Span::styled(
            "< Prev",
            if page.has_previous() { enabled } else { disabled },
        ),
        Span::raw(format!("  Page {} of {}  ", page.current_page, page.total_pages)),
        Span::styled("Next >", if page.has_next() { enabled } else { disabled }),
    ])
}

/// Build context-appropriate controls hint string.
pub fn build_controls_hint(mode: AppMode) -> String {
    match mode {
        AppMode::Normal => {
            "j/k: row, n/p: page, c: copy, /: search, Esc: clear, r: reload, q: quit".to_string()
        }
        AppMode::SearchInput => "Type to filter, Enter: done, Esc: clear".to_string(),
    }
}

/// Render input bar for search mode.
pub fn render_input_bar(frame: &mut Frame, area: Rect, input_buffer: &str) {
    let input_text = format!("/{}", input_buffer);
    let input_widget = Paragraph::new(input_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(input_widget, area);
}

/// Render the whole screen.
///
/// Layout: catalog table + preview side by side, pagination bar (only when
/// there is more than one page), then input bar or status/controls footer.
pub fn render_app(
    frame: &mut Frame,
    page: &PageRenderData,
    table_state: &mut TableState,
    mode: AppMode,
    input_buffer: &str,
    status_message: Option<&str>,
) {
    let show_pagination = page.total_pages > 1;
    let footer_height = if mode == AppMode::SearchInput { 3 } else { 1 };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(if show_pagination { 1 } else { 0 }),
        Constraint::Length(footer_height),
    ])
    .split(frame.area());

    let body = Layout::horizontal([Constraint::Fill(1), Constraint::Length(PREVIEW_WIDTH)])
        .split(chunks[0]);

    render_catalog_table(frame, body[0], page, table_state);
    render_preview(frame, body[1], page.thumbnail.as_ref());

    if show_pagination {
        let pagination = Paragraph::new(build_pagination_line(page)).alignment(Alignment::Center);
        frame.render_widget(pagination, chunks[1]);
    }

    match mode {
        AppMode::SearchInput => render_input_bar(frame, chunks[2], input_buffer),
        AppMode::Normal => {
            let (text, style) = match status_message {
                Some(msg) => (msg.to_string(), Style::default().fg(Color::Yellow)),
                None => (
                    build_controls_hint(mode),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            frame.render_widget(Paragraph::new(text).style(style), chunks[2]);
        }
    }
}
