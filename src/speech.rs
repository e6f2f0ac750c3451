//! Read-aloud support via an external speech engine
//!
//! Hands the summary sentences to a text-to-speech engine found on PATH,
//! with the voice fixed to Hindi. A missing engine is not fatal; the app
//! surfaces it as a status notice instead.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

/// Speech engines probed in order of preference
const ENGINES: [&str; 3] = ["espeak-ng", "espeak", "spd-say"];

/// Errors that can occur when reading text aloud
#[derive(Debug, Error)]
pub enum SpeechError {
    /// None of the known speech engines is installed
    #[error("No speech engine found (tried espeak-ng, espeak, spd-say)")]
    EngineUnavailable,

    /// The speech engine could not be launched
    #[error("Failed to launch speech engine: {0}")]
    Launch(#[from] std::io::Error),

    /// The speech engine exited with an error
    #[error("Speech engine '{0}' exited with an error")]
    EngineFailed(String),
}

/// Speaks the given text in Hindi using the first available engine
///
/// Blocks (asynchronously) until the engine finishes speaking.
pub async fn speak(text: &str) -> Result<(), SpeechError> {
    let engine = find_engine().ok_or(SpeechError::EngineUnavailable)?;
    let args = engine_args(&engine_name(&engine), text);

    let status = Command::new(&engine).args(&args).status().await?;
    if !status.success() {
        return Err(SpeechError::EngineFailed(engine_name(&engine)));
    }
    Ok(())
}

/// Starts speaking in a background task so the event loop keeps running
/// while the engine talks
///
/// The returned handle resolves to the result of [`speak`] once the
/// utterance finishes (or fails to start).
pub fn spawn_speak(text: String) -> tokio::task::JoinHandle<Result<(), SpeechError>> {
    tokio::spawn(async move { speak(&text).await })
}

/// Finds the first known speech engine on PATH
fn find_engine() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = std::env::split_paths(&path_var).collect();
    find_engine_in(&dirs)
}

/// Finds the first known speech engine within the given directories
fn find_engine_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    for engine in ENGINES {
        for dir in dirs {
            let candidate = dir.join(engine);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Extracts the engine's binary name from its resolved path
fn engine_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Builds the argument list that selects the Hindi voice for an engine
fn engine_args(engine: &str, text: &str) -> Vec<String> {
    match engine {
        // spd-say takes a language tag; -w waits until speech finishes
        "spd-say" => vec![
            "-l".to_string(),
            "hi".to_string(),
            "-w".to_string(),
            text.to_string(),
        ],
        // espeak and espeak-ng share the -v voice flag
        _ => vec!["-v".to_string(), "hi".to_string(), text.to_string()],
    }
}
