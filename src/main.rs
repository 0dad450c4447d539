use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use serde::Serialize;

use texture_explorer::clipboard::{CopyController, SystemClipboard};
use texture_explorer::handlers::{handle_normal_mode, handle_search_input, KeyAction};
use texture_explorer::path::normalize;
use texture_explorer::render::{build_page_render_data, render_app};
use texture_explorer::source::{CatalogLoader, CatalogSource, DEFAULT_SOURCE};
use texture_explorer::state::AppMode;
use texture_explorer::view::CatalogView;

/// Upper bound on how long the event loop sleeps waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long a status message stays in the footer.
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Parser)]
#[command(name = "tex")]
#[command(about = "Browse, search and copy texture paths from a catalog")]
#[command(version)]
struct Cli {
    /// Catalog JSON: a file path, an http(s) URL, or "-" for stdin
    #[arg(default_value = DEFAULT_SOURCE)]
    source: String,

    /// Base location for thumbnail previews (defaults to the catalog's directory)
    #[arg(long)]
    asset_base: Option<String>,

    /// Print one page as JSON instead of starting the interactive browser
    #[arg(long)]
    list: bool,

    /// Query applied in --list mode
    #[arg(long, default_value = "")]
    query: String,

    /// Page printed in --list mode
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Write interactive-mode logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// One page of results in --list mode.
#[derive(Serialize)]
struct PageListing {
    query: String,
    page: usize,
    total_pages: usize,
    matched: usize,
    items: Vec<String>,
}

/// Configure `env_logger`. Interactive mode owns the terminal, so logs only go
/// to a file there; list mode logs to stderr.
fn init_logging(log_file: Option<&PathBuf>, interactive: bool) -> io::Result<()> {
    if interactive && log_file.is_none() {
        return Ok(());
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.init();
    Ok(())
}

/// Initialize the terminal for TUI rendering.
/// Enables raw mode, enters alternate screen, and creates a Terminal instance.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
/// Disables raw mode and leaves alternate screen.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Non-interactive mode: load, filter, print one page as JSON.
fn run_list(cli: &Cli, source: CatalogSource) -> io::Result<()> {
    let mut view = CatalogView::new();
    if let Err(e) = view.apply_load(source.load()) {
        log::error!("Error loading texture catalog: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    view.set_query(cli.query.as_str());
    view.go_to_page(cli.page);

    let listing = PageListing {
        query: view.query().to_string(),
        page: view.current_page(),
        total_pages: view.total_pages(),
        matched: view.filtered().len(),
        items: view
            .page_entries()
            .into_iter()
            .map(|(_, entry)| normalize(&entry.path))
            .collect(),
    };

    let json = serde_json::to_string_pretty(&listing).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref(), !cli.list)?;

    let source = CatalogSource::parse(&cli.source);
    let asset_base = cli.asset_base.clone().or_else(|| source.asset_base());

    if cli.list {
        return run_list(&cli, source);
    }

    // Set up panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut view = CatalogView::new();
    let mut copies = CopyController::new(Box::new(SystemClipboard::new()));
    let mut loader = Some(CatalogLoader::spawn(source.clone()));

    let mut mode = AppMode::Normal;
    let mut input_buffer = String::new();
    let mut status_message: Option<(String, Instant)> = None;

    let mut terminal = init_terminal()?;

    // Main event loop
    loop {
        let now = Instant::now();

        // Apply a finished load
        if let Some(result) = loader.as_mut().and_then(|l| l.try_finish()) {
            loader = None;
            copies.clear();
            match view.apply_load(result) {
                Ok(count) => {
                    log::info!("Loaded {} textures from {}", count, source);
                    status_message = Some((format!("Loaded {} textures", count), now));
                }
                Err(e) => {
                    log::error!("Error loading texture catalog: {}", e);
                    status_message = Some((format!("Error: {}", e), now));
                }
            }
        }

        copies.tick(now);
        if status_message
            .as_ref()
            .is_some_and(|(_, since)| now.duration_since(*since) >= STATUS_TTL)
        {
            status_message = None;
        }

        let page = build_page_render_data(&view, &copies, asset_base.as_deref());
        terminal.draw(|frame| {
            render_app(
                frame,
                &page,
                &mut view.table_state,
                mode,
                &input_buffer,
                status_message.as_ref().map(|(msg, _)| msg.as_str()),
            );
        })?;

        // Wake up in time for the next copy reset
        let timeout = copies
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(POLL_INTERVAL, |until| until.min(POLL_INTERVAL));

        if !event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match mode {
            AppMode::Normal => match handle_normal_mode(&key, &mut view, source.is_reloadable()) {
                KeyAction::None => {}
                KeyAction::Quit => break,
                KeyAction::StatusMessage(msg) => {
                    status_message = Some((msg, Instant::now()));
                }
                KeyAction::ModeChange(new_mode) => {
                    if new_mode == AppMode::SearchInput {
                        input_buffer = view.query().to_string();
                    }
                    mode = new_mode;
                }
                KeyAction::CopySelected => {
                    if let Some((position, entry)) = view.selected_entry() {
                        let text = normalize(&entry.path);
                        let msg = match copies.copy(position, &text, Instant::now()) {
                            Ok(()) => format!("Copied {}", text),
                            Err(e) => format!("Copy failed: {}", e),
                        };
                        status_message = Some((msg, Instant::now()));
                    }
                }
                KeyAction::Reload => {
                    log::info!("Reloading catalog from {}", source);
                    view.begin_load();
                    loader = Some(CatalogLoader::spawn(source.clone()));
                }
            },
            AppMode::SearchInput => {
                if handle_search_input(&key, &mut input_buffer, &mut view) {
                    input_buffer.clear();
                    mode = AppMode::Normal;
                }
            }
        }
    }

    // Clear terminal before exit
    terminal.clear()?;
    restore_terminal(&mut terminal)?;
    Ok(())
}
