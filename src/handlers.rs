//! Keyboard input handlers for the texture explorer.
//!
//! Contains handler functions for each application mode and the KeyAction
//! enum to represent the result of handling a key event.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::AppMode;
use crate::view::CatalogView;

/// Result of handling a key event.
/// Tells the main loop what action to take after the handler returns.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Exit the application
    Quit,
    /// Display a status message
    StatusMessage(String),
    /// Change input mode
    ModeChange(AppMode),
    /// Copy the selected row's normalized path
    CopySelected,
    /// Start a fresh catalog load
    Reload,
}

/// Handle key events in normal mode.
///
/// `can_reload` is false for sources that can only be read once (stdin).
pub fn handle_normal_mode(key: &KeyEvent, view: &mut CatalogView, can_reload: bool) -> KeyAction {
    match key.code {
        // Quit on 'q' or Ctrl+C
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Enter search input mode
        KeyCode::Char('/') => KeyAction::ModeChange(AppMode::SearchInput),

        // Clear an active query
        KeyCode::Esc => {
            if !view.query().is_empty() {
                view.set_query("");
                KeyAction::StatusMessage("Search cleared".to_string())
            } else {
                KeyAction::None
            }
        }

        // Row navigation within the page
        KeyCode::Char('j') | KeyCode::Down => {
            view.select_next_row();
            KeyAction::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view.select_previous_row();
            KeyAction::None
        }
        KeyCode::Char('g') | KeyCode::Home => {
            view.select_first_row();
            KeyAction::None
        }
        KeyCode::Char('G') | KeyCode::End => {
            view.select_last_row();
            KeyAction::None
        }

        // Page navigation (no-op at the bounds)
        KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
            view.next_page();
            KeyAction::None
        }
        KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
            view.previous_page();
            KeyAction::None
        }

        // Copy selected path
        KeyCode::Char('c') | KeyCode::Char('y') | KeyCode::Enter => KeyAction::CopySelected,

        // Reload the catalog (ignored while a load is in flight)
        KeyCode::Char('r') => {
            if !can_reload {
                KeyAction::StatusMessage("This catalog source cannot be reloaded".to_string())
            } else if view.is_loading() {
                KeyAction::StatusMessage("Catalog is still loading".to_string())
            } else {
                KeyAction::Reload
            }
        }

        _ => KeyAction::None,
    }
}

/// Handle key events in search input mode.
///
/// Every edit is applied to the view immediately, so the results (and the
/// reset to page 1) follow the text as it is typed.
/// Returns bool indicating whether to return to Normal mode.
pub fn handle_search_input(key: &KeyEvent, input_buffer: &mut String, view: &mut CatalogView) -> bool {
    match key.code {
        // Clear the query and return to normal mode
        KeyCode::Esc => {
            input_buffer.clear();
            view.set_query("");
            true
        }

        // Keep the query and return to normal mode
        KeyCode::Enter => true,

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            input_buffer.clear();
            view.set_query("");
            true
        }

        // Text input
        KeyCode::Char(c) => {
            input_buffer.push(c);
            view.set_query(input_buffer.as_str());
            false
        }

        // Backspace
        KeyCode::Backspace => {
            if input_buffer.pop().is_some() {
                view.set_query(input_buffer.as_str());
            }
            false
        }

        _ => false,
    }
}
