//! Character, encounter director, and session state for Rollkeeper.
//!
//! A [`Session`] ties a [`CharacterSheet`] and the [`GameData`] tables to
//! the dice engine. It logs every roll, resolves encounters whose difficulty
//! adapts to the player's recent luck, and can be saved and restored as a
//! [`SavedSession`].

pub mod character;
pub mod config;
pub mod data;
pub mod director;
pub mod error;
pub mod history;
pub mod luck;
pub mod persist;
pub mod session;
pub mod summary;

pub use character::{CharacterBuilder, CharacterSheet, MAX_MODIFIER, Stat};
pub use config::{SessionConfig, SessionPaths};
pub use data::{Difficulty, EncounterTable, GameData};
pub use director::{EncounterDirector, SUCCESS_THRESHOLD};
pub use error::{SessionError, SessionResult};
pub use history::{EncounterOutcome, RollKind, RollRecord, SavedSession, SessionHistory};
pub use luck::{LuckHistory, Trend, adjust_difficulty};
pub use session::Session;
pub use summary::SessionSummary;
