//! UI rendering module for gramdash
//!
//! Contains all the rendering logic for the terminal user interface,
//! using the ratatui library. Rendering only reads the application state
//! and the view model; it never touches the resolver or dataset directly.

pub mod dashboard;
pub mod help_overlay;
pub mod widgets;

pub use dashboard::render as render_dashboard;
pub use help_overlay::render as render_help_overlay;
