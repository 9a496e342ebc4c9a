pub mod check;
pub mod create;
pub mod encounter;
pub mod initiative;
pub mod play;
pub mod roll;
pub mod summary;

use std::io::{self, BufRead, StdinLock, Write};
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rk_session::persist::{load_character, load_session, save_session};
use rk_session::{GameData, Session, SessionConfig, SessionPaths};

/// A loaded session together with the files it came from.
pub struct Loaded {
    pub session: Session,
    pub paths: SessionPaths,
}

impl Loaded {
    /// Write the session history back to disk.
    pub fn save(&self) -> Result<(), String> {
        save_session(&self.paths.history, &self.session.snapshot()).map_err(|e| e.to_string())
    }
}

/// Open the saved character, game data, and history in `dir`.
///
/// Fails when no character has been created yet.
pub fn open(dir: &Path, seed: Option<u64>) -> Result<Loaded, String> {
    tracing::debug!(dir = %dir.display(), ?seed, "opening session");
    let paths = SessionPaths::in_dir(dir);
    let data = GameData::load_or_default(&paths.data).map_err(|e| e.to_string())?;
    let character = load_character(&paths.character)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| {
            format!(
                "no character found in {}; run `rk create` first",
                dir.display()
            )
        })?;

    let mut session = Session::new(character, data, &config(seed));
    if let Some(saved) = load_session(&paths.history).map_err(|e| e.to_string())? {
        session.restore(saved);
    }
    Ok(Loaded { session, paths })
}

pub fn config(seed: Option<u64>) -> SessionConfig {
    match seed {
        Some(seed) => SessionConfig::default().with_seed(seed),
        None => SessionConfig::default(),
    }
}

pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Line-based prompts over a reader. `None` means the input ended.
pub struct Prompt<R> {
    reader: R,
    line: String,
}

impl Prompt<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    pub fn ask(&mut self, label: &str) -> Result<Option<String>, String> {
        print!("{label}");
        io::stdout().flush().map_err(|e| e.to_string())?;

        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(self.line.trim().to_string())),
            Err(e) => Err(e.to_string()),
        }
    }
}
