//! Application state management for gramdash
//!
//! Holds the dataset, the current district selection, the search filter and
//! the derived view model in one explicit struct, and updates them in
//! response to keyboard input. No rendering happens here; the ui module
//! reads this state and draws it.

use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::StartupConfig;
use crate::data::{DataClient, Dataset};
use crate::view::{self, ViewModel};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while resolving the dataset
    Loading,
    /// Main dashboard view
    Dashboard,
    /// No dataset could be resolved from any source
    LoadFailed(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// The resolved dataset, once loading has finished
    pub dataset: Option<Dataset>,
    /// Unique district names, sorted ascending
    pub choices: Vec<String>,
    /// Currently selected district, always present in `choices` (or empty
    /// when the dataset has no districts)
    pub selected: Option<String>,
    /// Derived view for the selected district; kept unchanged on a lookup
    /// miss so the previous view stays on screen
    pub view_model: Option<ViewModel>,
    /// Current search filter over the district list
    pub search_query: String,
    /// Whether keystrokes currently edit the search query
    pub search_active: bool,
    /// One-line status notice (speech failures, unknown districts)
    pub notice: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag indicating a data refresh has been requested
    pub refresh_requested: bool,
    /// Flag indicating a read-aloud has been requested
    pub speak_requested: bool,
    /// Whether the read-aloud key is active
    pub speech_enabled: bool,
    /// District to preselect after the first load
    initial_district: Option<String>,
    /// Data client resolving the dataset
    data_client: DataClient,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            dataset: None,
            choices: Vec::new(),
            selected: None,
            view_model: None,
            search_query: String::new(),
            search_active: false,
            notice: None,
            show_help: false,
            should_quit: false,
            refresh_requested: false,
            speak_requested: false,
            speech_enabled: true,
            initial_district: None,
            data_client: DataClient::new(),
        }
    }

    /// Creates a new App instance with the given startup configuration
    pub fn with_startup_config(config: StartupConfig) -> Self {
        let mut app = Self::new();
        app.initial_district = config.initial_district;
        app.speech_enabled = config.speech_enabled;
        app
    }

    /// Resolves the dataset and transitions to the dashboard, or to the
    /// failure screen when no source could provide one.
    pub async fn load_data(&mut self) {
        self.refresh_requested = false;
        match self.data_client.resolve().await {
            Ok(dataset) => self.apply_dataset(dataset),
            Err(e) => {
                self.state = AppState::LoadFailed(e.to_string());
            }
        }
    }

    /// Installs a resolved dataset, recomputing choices, selection and the
    /// view model. The previous selection is kept when still present;
    /// otherwise the first choice becomes the default.
    pub fn apply_dataset(&mut self, dataset: Dataset) {
        self.choices = view::district_choices(&dataset);

        let wanted = self
            .selected
            .take()
            .or_else(|| self.initial_district.take());
        self.selected = match wanted {
            Some(name) if self.choices.iter().any(|c| c == &name) => Some(name),
            Some(name) => {
                self.notice = Some(format!("District '{}' not found", name));
                self.choices.first().cloned()
            }
            None => self.choices.first().cloned(),
        };

        if let Some(ref district) = self.selected {
            self.view_model = view::build(&dataset, district);
        }

        self.dataset = Some(dataset);
        self.state = AppState::Dashboard;
    }

    /// Whether the offline/stale data banner should be shown
    pub fn offline(&self) -> bool {
        self.dataset
            .as_ref()
            .map(|d| d.source.is_offline())
            .unwrap_or(false)
    }

    /// Choices currently visible under the search filter
    pub fn visible_choices(&self) -> Vec<&str> {
        self.choices
            .iter()
            .filter(|c| view::matches_search(c, &self.search_query))
            .map(String::as_str)
            .collect()
    }

    /// Selects a district and rebuilds the view model
    ///
    /// A lookup miss leaves both the selection and the previous view model
    /// untouched (no partial update).
    pub fn select_district(&mut self, district: &str) {
        let Some(ref dataset) = self.dataset else {
            return;
        };
        if let Some(vm) = view::build(dataset, district) {
            self.selected = Some(district.to_string());
            self.view_model = Some(vm);
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit (Esc also quits when no search filter is set)
    /// - `Up`/`k`, `Down`/`j`: Move through visible districts
    /// - `/`: Edit the search filter (Enter keeps it, Esc clears it)
    /// - `s`: Read the summary aloud
    /// - `r`: Refresh data
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::LoadFailed(_) => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') => {
                    self.state = AppState::Loading;
                    self.refresh_requested = true;
                }
                _ => {}
            },
            AppState::Dashboard => {
                if self.search_active {
                    self.handle_search_key(key_event);
                    return;
                }
                match key_event.code {
                    KeyCode::Char('q') => {
                        self.should_quit = true;
                    }
                    KeyCode::Esc => {
                        if self.search_query.is_empty() {
                            self.should_quit = true;
                        } else {
                            self.search_query.clear();
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.move_selection(-1);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.move_selection(1);
                    }
                    KeyCode::Char('/') => {
                        self.search_active = true;
                        self.notice = None;
                    }
                    KeyCode::Char('s') => {
                        self.request_speech();
                    }
                    KeyCode::Char('r') => {
                        self.refresh_requested = true;
                    }
                    KeyCode::Char('?') => {
                        self.show_help = true;
                    }
                    _ => {}
                }
            }
        }
    }

    /// Handles keys while the search filter is being edited
    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.search_query.clear();
                self.search_active = false;
            }
            KeyCode::Enter => {
                self.search_active = false;
            }
            KeyCode::Backspace => {
                self.search_query.pop();
            }
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.snap_selection_to_visible();
            }
            _ => {}
        }
    }

    /// Marks a read-aloud request, or posts a notice when speech is off
    fn request_speech(&mut self) {
        if !self.speech_enabled {
            self.notice = Some("Read-aloud is disabled (--no-speech)".to_string());
            return;
        }
        if self.view_model.is_some() {
            self.speak_requested = true;
        }
    }

    /// Moves the selection through the visible districts, wrapping around
    fn move_selection(&mut self, delta: i64) {
        let visible: Vec<String> = self
            .visible_choices()
            .into_iter()
            .map(str::to_string)
            .collect();
        if visible.is_empty() {
            return;
        }

        let current = self
            .selected
            .as_ref()
            .and_then(|s| visible.iter().position(|v| v == s));

        let next = match current {
            Some(i) => {
                let len = visible.len() as i64;
                ((i as i64 + delta).rem_euclid(len)) as usize
            }
            // Selection hidden by the filter: snap to the first visible
            None => 0,
        };

        let district = visible[next].clone();
        self.select_district(&district);
    }

    /// Moves the selection to the first visible district when the current
    /// one is hidden by the search filter
    fn snap_selection_to_visible(&mut self) {
        let visible: Vec<String> = self
            .visible_choices()
            .into_iter()
            .map(str::to_string)
            .collect();
        let selected_visible = self
            .selected
            .as_ref()
            .map(|s| visible.iter().any(|v| v == s))
            .unwrap_or(false);
        if !selected_visible {
            if let Some(first) = visible.first().cloned() {
                self.select_district(&first);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
