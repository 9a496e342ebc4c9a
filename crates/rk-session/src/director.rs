//! The adaptive encounter director.
//!
//! Resolving an encounter picks a monster from the requested tier, shifted by
//! the player's recent luck, then rolls a d20 to see how it goes. The d20 is
//! both logged as a roll and fed back into the luck history.

use rk_dice::{DiceSource, RollRequest, roll};

use crate::data::{Difficulty, EncounterTable};
use crate::error::{SessionError, SessionResult};
use crate::history::{EncounterOutcome, RollKind, RollRecord, SessionHistory};
use crate::luck::{LuckHistory, adjust_difficulty};

/// A d20 at or above this succeeds.
pub const SUCCESS_THRESHOLD: i64 = 10;

/// Resolves encounters against a table, updating luck and history.
pub struct EncounterDirector<'a> {
    table: &'a EncounterTable,
}

impl<'a> EncounterDirector<'a> {
    /// Create a director over an encounter table.
    pub fn new(table: &'a EncounterTable) -> Self {
        Self { table }
    }

    /// Resolve one encounter.
    ///
    /// Fails with `UnknownLocation` or `UnknownDifficulty` before touching
    /// `luck` or `history`.
    pub fn resolve<D: DiceSource + ?Sized>(
        &self,
        location: &str,
        difficulty: &str,
        luck: &mut LuckHistory,
        history: &mut SessionHistory,
        source: &mut D,
    ) -> SessionResult<EncounterOutcome> {
        let location = location.trim().to_lowercase();
        let tiers = self
            .table
            .tiers(&location)
            .ok_or_else(|| SessionError::UnknownLocation(location.clone()))?;
        let requested = Difficulty::parse(difficulty)
            .filter(|tier| tiers.contains_key(tier))
            .ok_or_else(|| SessionError::UnknownDifficulty {
                location: location.clone(),
                difficulty: difficulty.trim().to_string(),
            })?;

        let average = luck.window_average();
        let adjusted = adjust_difficulty(average, requested);
        // A location may lack the adjusted tier; stay on the requested one.
        let (chosen, pool) = match tiers.get(&adjusted) {
            Some(pool) => (adjusted, pool),
            None => (requested, &tiers[&requested]),
        };
        if chosen != requested {
            tracing::debug!(
                average,
                from = %requested,
                to = %chosen,
                "luck adjusted encounter difficulty"
            );
        }

        let encounter = pool[source.pick(pool.len())].clone();
        let result = roll(&RollRequest::d20(), source);
        history
            .rolls
            .push(RollRecord::new(&result, RollKind::Encounter));
        let sample = luck.record(result.total);

        let outcome = EncounterOutcome {
            location,
            requested,
            difficulty: chosen,
            encounter,
            roll: Some(result.total),
            success: result.total >= SUCCESS_THRESHOLD,
            timestamp: Some(chrono::Utc::now()),
        };
        tracing::info!(
            location = %outcome.location,
            difficulty = %outcome.difficulty,
            encounter = %outcome.encounter,
            roll = result.total,
            success = outcome.success,
            luck = sample,
            "resolved encounter"
        );
        history.encounters.push(outcome.clone());
        Ok(outcome)
    }
}
