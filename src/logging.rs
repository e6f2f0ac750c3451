//! File-based logging setup
//!
//! The dashboard owns the terminal, so log output goes to a file in the
//! XDG cache directory instead of stderr. Fallback transitions (API fetch
//! failures, cache misses) are logged here rather than surfaced as errors.

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber writing to `gramdash.log` in the
/// cache directory.
///
/// Returns the appender guard, which must stay alive for the duration of
/// the program, or `None` when no cache directory is available (logging
/// is then disabled rather than treated as an error).
pub fn init() -> Option<WorkerGuard> {
    let project_dirs = ProjectDirs::from("", "", "gramdash")?;
    let log_dir = project_dirs.cache_dir();
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(log_dir, "gramdash.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gramdash=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
