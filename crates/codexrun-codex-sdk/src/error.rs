//! Error types for the Codex SDK.

use thiserror::Error;

/// Errors that can occur while running a Codex task.
///
/// Everything short of a process-level failure degrades into report content
/// instead of an error: malformed stream lines are dropped, unclassified
/// events are only counted, and a non-zero exit code is data in the report.
#[derive(Debug, Error)]
pub enum CodexError {
    /// The Codex process could not be created (missing executable,
    /// permissions). No report is produced.
    #[error("Failed to spawn codex process: {0}")]
    Spawn(#[source] std::io::Error),

    /// I/O failure while reading the process output or awaiting its exit.
    #[error("I/O error during codex run: {0}")]
    Io(#[from] std::io::Error),
}
