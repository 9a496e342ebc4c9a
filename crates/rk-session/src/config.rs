//! Configuration for a session.

use std::path::{Path, PathBuf};

/// File name of the game data (encounters and flavor text).
pub const DATA_FILE: &str = "data.json";
/// File name of the saved character.
pub const CHARACTER_FILE: &str = "character.json";
/// File name of the saved session history.
pub const HISTORY_FILE: &str = "session_history.json";

/// Configuration for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Where a session's files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    /// Game data file.
    pub data: PathBuf,
    /// Character file.
    pub character: PathBuf,
    /// Session history file.
    pub history: PathBuf,
}

impl SessionPaths {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            data: dir.join(DATA_FILE),
            character: dir.join(CHARACTER_FILE),
            history: dir.join(HISTORY_FILE),
        }
    }
}

impl Default for SessionPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}
