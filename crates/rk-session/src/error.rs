//! Error types for session operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during a session. None of them are fatal.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed dice notation.
    #[error("invalid dice notation: {0}")]
    Parse(#[from] rk_dice::ParseError),

    /// A stat key that is not one of STR, DEX, CON, INT, WIS, CHA.
    #[error("unknown stat '{0}'")]
    UnknownStat(String),

    /// A location missing from the encounter table.
    #[error("unknown location '{0}'")]
    UnknownLocation(String),

    /// A difficulty that is not a tier of the location.
    #[error("unknown difficulty '{difficulty}' for {location}")]
    UnknownDifficulty {
        /// The location being resolved.
        location: String,
        /// The rejected difficulty text.
        difficulty: String,
    },

    /// A manually assigned stat outside 0-5.
    #[error("{stat} must be between 0 and 5, got {value}")]
    InvalidStatRange {
        /// The stat being assigned.
        stat: String,
        /// The rejected value.
        value: i64,
    },

    /// Character creation finished without a value for a stat.
    #[error("no value assigned for {0}")]
    MissingStat(String),

    /// A blank character name.
    #[error("character name cannot be empty")]
    EmptyName,

    /// Initiative with nobody in it.
    #[error("no participants")]
    NoParticipants,

    /// Command not understood by the session.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A known command with missing arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Game data or a saved log that is structurally valid JSON but unusable.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Reading or writing a file failed.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A file did not contain the expected JSON.
    #[error("malformed {path}: {source}")]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}
