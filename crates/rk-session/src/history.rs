//! The session log: every executed roll and every resolved encounter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rk_dice::{AdvantageMode, RollResult};

use crate::data::Difficulty;
use crate::error::{SessionError, SessionResult};
use crate::luck::LuckHistory;

/// Why a roll was made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollKind {
    /// A free-form dice roll.
    #[default]
    Roll,
    /// A stat check.
    Check,
    /// The d20 that resolved an encounter.
    Encounter,
}

/// Summary of one executed roll.
///
/// Older logs store the modifier as `mod` and carry no kind or timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRecord {
    /// Dice term, e.g. `2d6`.
    pub dice: String,
    /// Flat modifier.
    #[serde(alias = "mod", default)]
    pub modifier: i32,
    /// Advantage mode used.
    #[serde(default)]
    pub advantage: AdvantageMode,
    /// Kept value per die.
    #[serde(default)]
    pub rolls: Vec<u32>,
    /// Final total.
    pub result: i64,
    /// Why the roll was made.
    #[serde(default)]
    pub kind: RollKind,
    /// When it was rolled, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RollRecord {
    /// Summarize a roll result.
    pub fn new(result: &RollResult, kind: RollKind) -> Self {
        Self {
            dice: result.request.dice(),
            modifier: result.request.modifier(),
            advantage: result.request.advantage(),
            rolls: result.rolls.clone(),
            result: result.total,
            kind,
            timestamp: Some(Utc::now()),
        }
    }
}

/// A resolved encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OutcomeRecord")]
pub struct EncounterOutcome {
    /// Location key.
    pub location: String,
    /// The tier the player asked for.
    pub requested: Difficulty,
    /// The tier actually used after luck adjustment.
    pub difficulty: Difficulty,
    /// The encounter that was drawn.
    pub encounter: String,
    /// The resolving d20. Missing from older logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<i64>,
    /// Whether the d20 met the success threshold.
    pub success: bool,
    /// When it was resolved, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// On-disk form of an outcome, also accepting the older
/// `{"enemy": .., "result": "Success"}` shape.
#[derive(Deserialize)]
struct OutcomeRecord {
    location: String,
    #[serde(default)]
    requested: Option<Difficulty>,
    difficulty: Difficulty,
    #[serde(alias = "enemy")]
    encounter: String,
    #[serde(default)]
    roll: Option<i64>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<OutcomeRecord> for EncounterOutcome {
    type Error = SessionError;

    fn try_from(record: OutcomeRecord) -> SessionResult<Self> {
        let success = match (record.success, record.result.as_deref()) {
            (Some(success), _) => success,
            (None, Some(r)) if r.eq_ignore_ascii_case("success") => true,
            (None, Some(r)) if r.eq_ignore_ascii_case("fail") => false,
            _ => {
                return Err(SessionError::InvalidData(format!(
                    "encounter '{}' has no outcome",
                    record.encounter
                )));
            }
        };
        Ok(Self {
            location: record.location.trim().to_lowercase(),
            requested: record.requested.unwrap_or(record.difficulty),
            difficulty: record.difficulty,
            encounter: record.encounter,
            roll: record.roll,
            success,
            timestamp: record.timestamp,
        })
    }
}

impl EncounterOutcome {
    /// Whether luck changed the requested tier.
    pub fn was_adjusted(&self) -> bool {
        self.requested != self.difficulty
    }
}

/// All rolls and encounters of a session, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    /// Executed rolls of every kind, in one timeline.
    #[serde(default)]
    pub rolls: Vec<RollRecord>,
    /// Resolved encounters.
    #[serde(default)]
    pub encounters: Vec<EncounterOutcome>,
}

impl SessionHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing has happened yet.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty() && self.encounters.is_empty()
    }
}

/// The persisted form of a session: its log plus its luck samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Roll and encounter log.
    #[serde(default)]
    pub history: SessionHistory,
    /// Luck samples.
    #[serde(default)]
    pub luck: LuckHistory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_dice::{ScriptedDice, parse, roll};

    #[test]
    fn record_summarizes_result() {
        let req = parse("2d6+3 adv").unwrap();
        let result = roll(&req, &mut ScriptedDice::new(&[4, 5, 2, 1]));
        let record = RollRecord::new(&result, RollKind::Roll);
        assert_eq!(record.dice, "2d6");
        assert_eq!(record.modifier, 3);
        assert_eq!(record.advantage, AdvantageMode::Advantage);
        assert_eq!(record.rolls, vec![5, 2]);
        assert_eq!(record.result, 10);
    }

    #[test]
    fn adjusted_outcome() {
        let outcome = EncounterOutcome {
            location: "forest".to_string(),
            requested: Difficulty::Easy,
            difficulty: Difficulty::Normal,
            encounter: "Owlbear".to_string(),
            roll: Some(12),
            success: true,
            timestamp: Some(Utc::now()),
        };
        assert!(outcome.was_adjusted());
    }

    #[test]
    fn saved_session_tolerates_missing_sections() {
        let saved: SavedSession = serde_json::from_str("{}").unwrap();
        assert!(saved.history.is_empty());
        assert!(saved.luck.is_empty());

        let saved: SavedSession =
            serde_json::from_str(r#"{"history": {"rolls": []}, "luck": [55.0]}"#).unwrap();
        assert_eq!(saved.luck.samples(), [55.0]);
    }

    #[test]
    fn reads_older_log_shape() {
        let json = r#"{
            "history": {
                "rolls": [{"dice": "2d6", "mod": 3, "result": 10}],
                "encounters": [{
                    "location": "forest",
                    "difficulty": "normal",
                    "enemy": "Owlbear",
                    "result": "Success",
                    "time": "12:30:00"
                }]
            },
            "luck": [70.0]
        }"#;
        let saved: SavedSession = serde_json::from_str(json).unwrap();
        let roll = &saved.history.rolls[0];
        assert_eq!(roll.modifier, 3);
        assert_eq!(roll.result, 10);
        assert_eq!(roll.kind, RollKind::Roll);
        assert_eq!(roll.timestamp, None);

        let outcome = &saved.history.encounters[0];
        assert_eq!(outcome.encounter, "Owlbear");
        assert_eq!(outcome.requested, Difficulty::Normal);
        assert!(outcome.success);
        assert_eq!(outcome.roll, None);
        assert!(!outcome.was_adjusted());
    }

    #[test]
    fn outcome_without_result_is_rejected() {
        let json = r#"{"location": "forest", "difficulty": "easy", "enemy": "Boar"}"#;
        assert!(serde_json::from_str::<EncounterOutcome>(json).is_err());
    }

    #[test]
    fn outcome_round_trips() {
        let outcome = EncounterOutcome {
            location: "city".to_string(),
            requested: Difficulty::Hard,
            difficulty: Difficulty::Normal,
            encounter: "Cultist".to_string(),
            roll: Some(7),
            success: false,
            timestamp: Some(Utc::now()),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(serde_json::from_str::<EncounterOutcome>(&json).unwrap(), outcome);
    }
}
