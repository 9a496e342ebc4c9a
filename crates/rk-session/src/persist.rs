//! JSON persistence for characters and session history.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::character::CharacterSheet;
use crate::error::{SessionError, SessionResult};
use crate::history::SavedSession;

/// Load a saved character, or `None` if the file does not exist.
pub fn load_character(path: &Path) -> SessionResult<Option<CharacterSheet>> {
    let sheet: Option<CharacterSheet> = read_json(path)?;
    if let Some(sheet) = &sheet {
        tracing::info!(name = sheet.name(), path = %path.display(), "loaded character");
    }
    Ok(sheet)
}

/// Save a character, replacing any existing file.
pub fn save_character(path: &Path, sheet: &CharacterSheet) -> SessionResult<()> {
    write_json(path, sheet)?;
    tracing::info!(name = sheet.name(), path = %path.display(), "saved character");
    Ok(())
}

/// Load a saved session, or `None` if the file does not exist.
pub fn load_session(path: &Path) -> SessionResult<Option<SavedSession>> {
    let saved: Option<SavedSession> = read_json(path)?;
    if let Some(saved) = &saved {
        tracing::info!(
            rolls = saved.history.rolls.len(),
            encounters = saved.history.encounters.len(),
            path = %path.display(),
            "loaded session history"
        );
    }
    Ok(saved)
}

/// Save a session, replacing any existing file.
pub fn save_session(path: &Path, saved: &SavedSession) -> SessionResult<()> {
    write_json(path, saved)?;
    tracing::info!(
        rolls = saved.history.rolls.len(),
        encounters = saved.history.encounters.len(),
        path = %path.display(),
        "saved session history"
    );
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SessionResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> SessionResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| SessionError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SessionError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Stat;
    use crate::data::Difficulty;
    use crate::history::{EncounterOutcome, RollKind, RollRecord};
    use chrono::Utc;
    use rk_dice::{ScriptedDice, parse, roll};

    #[test]
    fn missing_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_character(&dir.path().join("c.json")).unwrap().is_none());
        assert!(load_session(&dir.path().join("s.json")).unwrap().is_none());
    }

    #[test]
    fn character_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("character.json");
        let sheet = CharacterSheet::new("Tyrion", Stat::ALL.map(|s| (s, 2u8))).unwrap();
        save_character(&path, &sheet).unwrap();
        assert_eq!(load_character(&path).unwrap(), Some(sheet));
    }

    #[test]
    fn session_round_trip_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session_history.json");

        let mut saved = SavedSession::default();
        for (notation, draws) in [("1d20", [7u32]), ("1d8+2", [3u32])] {
            let result = roll(&parse(notation).unwrap(), &mut ScriptedDice::new(&draws));
            saved.history.rolls.push(RollRecord::new(&result, RollKind::Roll));
        }
        saved.history.encounters.push(EncounterOutcome {
            location: "dungeon".to_string(),
            requested: Difficulty::Hard,
            difficulty: Difficulty::Normal,
            encounter: "Mimic Chest".to_string(),
            roll: Some(4),
            success: false,
            timestamp: Some(Utc::now()),
        });
        saved.luck.record(4);
        saved.luck.record(17);

        save_session(&path, &saved).unwrap();
        let loaded = load_session(&path).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.history.rolls[1].dice, "1d8");
        assert_eq!(loaded.luck.samples(), [20.0, 85.0]);
    }

    #[test]
    fn loads_history_written_by_older_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_history.json");
        fs::write(
            &path,
            r#"{
                "history": {
                    "rolls": [
                        {"dice": "1d20", "mod": 2, "result": 15}
                    ],
                    "encounters": [
                        {"location": "city", "difficulty": "hard", "enemy": "Assassin",
                         "result": "Fail", "time": "21:04:11"}
                    ]
                },
                "luck": [65.0]
            }"#,
        )
        .unwrap();

        let saved = load_session(&path).unwrap().unwrap();
        assert_eq!(saved.history.rolls[0].modifier, 2);
        assert_eq!(saved.history.rolls[0].result, 15);
        assert_eq!(saved.history.encounters[0].encounter, "Assassin");
        assert!(!saved.history.encounters[0].success);
        assert_eq!(saved.luck.samples(), [65.0]);

        save_session(&path, &saved).unwrap();
        assert_eq!(load_session(&path).unwrap(), Some(saved));
    }

    #[test]
    fn character_file_missing_a_stat_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("character.json");
        fs::write(&path, r#"{"name": "Tyrion", "stats": {"STR": 2}}"#).unwrap();
        let err = load_character(&path).unwrap_err();
        assert!(matches!(err, SessionError::Json { .. }));
        assert!(err.to_string().contains("no value assigned for DEX"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("character.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_character(&path),
            Err(SessionError::Json { .. })
        ));
    }
}
