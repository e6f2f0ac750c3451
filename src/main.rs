//! Gramdash - MGNREGA district employment statistics in the terminal
//!
//! A terminal dashboard that fetches district records from data.gov.in,
//! falls back to a disk cache and then to bundled sample data when
//! offline, and renders a summary, a six-month trend, and a top-5 ranking
//! with an optional Hindi read-aloud.

mod app;
mod cache;
mod cli;
mod data;
mod logging;
mod speech;
mod ui;
mod view;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, AppState};
use cli::{Cli, StartupConfig};

/// Sets up a panic hook that restores the terminal before printing the
/// panic message, so the terminal stays usable even on a crash.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::Dashboard => {
            ui::render_dashboard(frame, app);
        }
        AppState::LoadFailed(message) => {
            render_load_failed(frame, message);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("District data load ho raha hai...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Renders the unrecoverable-failure screen shown when no data source
/// could provide a dataset
fn render_load_failed(frame: &mut ratatui::Frame, message: &str) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        text::Line,
        widgets::Paragraph,
    };

    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(4),
            Constraint::Percentage(40),
        ])
        .split(area);

    let lines = vec![
        Line::from("Koi data uplabdh nahi hai."),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from("r: retry   q: quit"),
    ];
    let text = Paragraph::new(lines)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);

    frame.render_widget(text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli);

    // Keep the appender guard alive for the whole session
    let _log_guard = logging::init();

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(config);

    // In-flight read-aloud task, polled each loop iteration
    let mut speech_task: Option<tokio::task::JoinHandle<Result<(), speech::SpeechError>>> = None;

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    // Trigger initial data load
    app.load_data().await;

    // Main event loop
    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.refresh_requested {
            app.state = AppState::Loading;
            terminal.draw(|f| render_ui(f, &app))?;
            app.load_data().await;
        }

        if app.speak_requested {
            app.speak_requested = false;
            // One utterance at a time; further requests are dropped until
            // the current one finishes
            if speech_task.is_none() {
                if let Some(text) = app.view_model.as_ref().map(|vm| vm.read_aloud_text()) {
                    speech_task = Some(speech::spawn_speak(text));
                }
            }
        }

        if speech_task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = speech_task.take() {
                if let Ok(Err(e)) = task.await {
                    app.notice = Some(e.to_string());
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
