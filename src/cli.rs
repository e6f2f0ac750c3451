//! Command-line interface parsing for gramdash
//!
//! The dashboard is fully interactive, so the CLI surface stays small:
//! an optional district preselection and a switch to disable read-aloud.

use clap::Parser;

/// Gramdash - MGNREGA district employment dashboard
#[derive(Parser, Debug)]
#[command(name = "gramdash")]
#[command(about = "MGNREGA district employment statistics in the terminal")]
#[command(version)]
pub struct Cli {
    /// Open with this district preselected (exact name, e.g. "Kanpur")
    ///
    /// Unknown districts fall back to the default selection with a notice;
    /// the dataset is only known after loading, so this is not validated
    /// up front.
    #[arg(long, value_name = "NAME")]
    pub district: Option<String>,

    /// Disable the read-aloud feature entirely
    #[arg(long)]
    pub no_speech: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// District to preselect once the dataset has loaded
    pub initial_district: Option<String>,
    /// Whether the read-aloud key is active
    pub speech_enabled: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            initial_district: cli.district.clone(),
            speech_enabled: !cli.no_speech,
        }
    }
}
