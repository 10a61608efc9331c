//! Error types for the completion engine.
//!
//! The engine's failure philosophy is to degrade to "no matches but no
//! crash" wherever possible, so only genuinely actionable conditions become
//! errors:
//!
//! - [`CompleteError`] - ambiguity during external-command resolution
//! - [`AssocError`] - a malformed file-type association table

use thiserror::Error;

/// Completion-session errors reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompleteError {
    /// A typed command prefixes several executables and matches none of them
    /// exactly; no substitution is performed.
    #[error("command beginning is ambiguous")]
    AmbiguousCommand,
}

/// Failures while loading the file-type association table.
#[derive(Debug, Error)]
pub enum AssocError {
    #[error("invalid file-type table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid file pattern {pattern:?}: {reason}")]
    BadPattern { pattern: String, reason: String },
}
