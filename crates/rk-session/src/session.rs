//! Session state and command handling.
//!
//! A `Session` owns everything that changes while playing: the character,
//! the game data, the roll and encounter log, the luck samples, and the
//! random source every draw goes through.

use rand::SeedableRng;
use rand::rngs::StdRng;

use rk_dice::{Critical, DiceSource, InitiativeEntry, RollRequest, RollResult, roll, roll_initiative};

use crate::character::CharacterSheet;
use crate::config::SessionConfig;
use crate::data::GameData;
use crate::director::EncounterDirector;
use crate::error::{SessionError, SessionResult};
use crate::history::{EncounterOutcome, RollKind, RollRecord, SavedSession, SessionHistory};
use crate::luck::LuckHistory;
use crate::summary::SessionSummary;

/// A play session for one character.
pub struct Session<D: DiceSource = StdRng> {
    character: CharacterSheet,
    data: GameData,
    history: SessionHistory,
    luck: LuckHistory,
    source: D,
}

impl Session<StdRng> {
    /// Create a session, seeding the RNG from the config or the OS.
    pub fn new(character: CharacterSheet, data: GameData, config: &SessionConfig) -> Self {
        let source = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_source(character, data, source)
    }
}

impl<D: DiceSource> Session<D> {
    /// Create a session drawing from a specific source.
    pub fn with_source(character: CharacterSheet, data: GameData, source: D) -> Self {
        Self {
            character,
            data,
            history: SessionHistory::new(),
            luck: LuckHistory::new(),
            source,
        }
    }

    /// Get the character.
    pub fn character(&self) -> &CharacterSheet {
        &self.character
    }

    /// Get the game data.
    pub fn data(&self) -> &GameData {
        &self.data
    }

    /// Get the roll and encounter log.
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Get the luck samples.
    pub fn luck(&self) -> &LuckHistory {
        &self.luck
    }

    /// Replace the log and luck samples with a saved session.
    pub fn restore(&mut self, saved: SavedSession) {
        self.history = saved.history;
        self.luck = saved.luck;
    }

    /// The persisted form of the current state.
    pub fn snapshot(&self) -> SavedSession {
        SavedSession {
            history: self.history.clone(),
            luck: self.luck.clone(),
        }
    }

    /// Parse and execute dice notation such as `2d6+3 adv`.
    pub fn roll(&mut self, notation: &str) -> SessionResult<RollResult> {
        let request = rk_dice::parse(notation)?;
        Ok(self.execute(&request, RollKind::Roll))
    }

    /// Roll 1d20 plus the modifier of a stat such as `str`.
    pub fn check(&mut self, stat: &str) -> SessionResult<RollResult> {
        let modifier = self.character.modifier(stat)?;
        let request = RollRequest::d20().with_modifier(i32::from(modifier));
        Ok(self.execute(&request, RollKind::Check))
    }

    /// Resolve an encounter at a location and requested difficulty.
    pub fn encounter(&mut self, location: &str, difficulty: &str) -> SessionResult<EncounterOutcome> {
        EncounterDirector::new(&self.data.encounters).resolve(
            location,
            difficulty,
            &mut self.luck,
            &mut self.history,
            &mut self.source,
        )
    }

    /// Roll initiative. Names are trimmed and blank names dropped.
    pub fn initiative<S: AsRef<str>>(&mut self, names: &[S]) -> SessionResult<Vec<InitiativeEntry>> {
        let names: Vec<&str> = names
            .iter()
            .map(|n| n.as_ref().trim())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(SessionError::NoParticipants);
        }
        Ok(roll_initiative(&names, &mut self.source))
    }

    /// Summarize the session so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.character.name(), &self.history, &self.luck)
    }

    /// A quip for a critical result, if it has one.
    pub fn flavor(&mut self, result: &RollResult) -> Option<&str> {
        let critical = result.critical()?;
        self.data.flavor(critical, &mut self.source)
    }

    fn execute(&mut self, request: &RollRequest, kind: RollKind) -> RollResult {
        let result = roll(request, &mut self.source);
        self.history.rolls.push(RollRecord::new(&result, kind));
        result
    }

    /// Process a line of command-mode input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "roll" => self.do_roll(rest),
            "check" => self.do_check(rest),
            "enc" | "encounter" => self.do_encounter(rest),
            "init" | "initiative" => self.do_initiative(rest),
            "sum" | "summary" => Ok(self.summary().to_string()),
            "locations" => Ok(self.do_locations()),
            "help" => Ok(HELP.to_string()),
            _ => Err(SessionError::UnknownCommand(trimmed.to_string())),
        }
    }

    fn do_roll(&mut self, notation: &str) -> SessionResult<String> {
        let result = self.roll(notation)?;
        Ok(self.describe(&result))
    }

    fn do_check(&mut self, stat: &str) -> SessionResult<String> {
        if stat.is_empty() {
            return Err(SessionError::Usage("check <stat>"));
        }
        let result = self.check(stat)?;
        Ok(format!(
            "Rolling {} check ({:+})\n{}",
            stat.to_uppercase(),
            result.request.modifier(),
            self.describe(&result)
        ))
    }

    fn do_encounter(&mut self, rest: &str) -> SessionResult<String> {
        // The difficulty is the last word so location names may contain spaces.
        let (location, difficulty) = rest
            .rsplit_once(char::is_whitespace)
            .ok_or(SessionError::Usage("enc <location> <difficulty>"))?;
        let outcome = self.encounter(location, difficulty)?;

        let mut out = format!("Encounter! {} ({})", outcome.encounter, outcome.difficulty);
        if outcome.was_adjusted() {
            out.push_str(&format!("\n  Luck shifted the difficulty from {}", outcome.requested));
        }
        out.push('\n');
        if let Some(roll) = outcome.roll {
            out.push_str(&format!("Roll: {roll} | "));
        }
        out.push_str(if outcome.success {
            "Outcome: Success"
        } else {
            "Outcome: Fail"
        });
        Ok(out)
    }

    fn do_initiative(&mut self, rest: &str) -> SessionResult<String> {
        let names: Vec<&str> = rest.split(',').collect();
        let order = self.initiative(&names)?;
        let mut out = String::from("Initiative order:");
        for (i, entry) in order.iter().enumerate() {
            out.push_str(&format!("\n  {}. {}: {}", i + 1, entry.name, entry.roll));
        }
        Ok(out)
    }

    fn do_locations(&self) -> String {
        let locations: Vec<&str> = self.data.encounters.locations().collect();
        if locations.is_empty() {
            return "No locations.".to_string();
        }
        format!("Locations: {}", locations.join(", "))
    }

    fn describe(&mut self, result: &RollResult) -> String {
        let mut out = result.to_string();
        if let Some(critical) = result.critical() {
            out.push_str(match critical {
                Critical::Hit => "\nCritical hit!",
                Critical::Fail => "\nCritical fail!",
            });
            if let Some(quip) = self.flavor(result) {
                out.push(' ');
                out.push_str(quip);
            }
        }
        out
    }
}

const HELP: &str = "\
Commands:
  roll <notation>               Roll dice, e.g. roll 2d6+3 adv
  check <stat>                  Roll 1d20 + stat (STR DEX CON INT WIS CHA)
  enc <location> <difficulty>   Resolve an encounter (easy, normal, hard)
  init <a, b, c>                Roll initiative for a list of names
  sum                           Show the session summary
  locations                     List encounter locations
  help                          Show this help";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Stat;
    use crate::data::Difficulty;
    use crate::luck::Trend;
    use rk_dice::{AdvantageMode, ScriptedDice};

    fn character() -> CharacterSheet {
        CharacterSheet::new(
            "Brienne",
            [
                (Stat::Str, 4),
                (Stat::Dex, 2),
                (Stat::Con, 3),
                (Stat::Int, 1),
                (Stat::Wis, 0),
                (Stat::Cha, 5),
            ],
        )
        .unwrap()
    }

    fn scripted(draws: &[u32]) -> Session<ScriptedDice> {
        Session::with_source(character(), GameData::default(), ScriptedDice::new(draws))
    }

    #[test]
    fn create_session() {
        let s = Session::new(character(), GameData::default(), &SessionConfig::default());
        assert_eq!(s.character().name(), "Brienne");
        assert!(s.history().is_empty());
        assert!(s.luck().is_empty());
    }

    #[test]
    fn roll_with_advantage_is_logged() {
        let mut s = scripted(&[4, 5, 2, 1]);
        let result = s.roll("2d6+3 adv").unwrap();
        assert_eq!(result.rolls, vec![5, 2]);
        assert_eq!(result.total, 10);
        assert_eq!(s.history().rolls.len(), 1);
        let record = &s.history().rolls[0];
        assert_eq!(record.kind, RollKind::Roll);
        assert_eq!(record.advantage, AdvantageMode::Advantage);
        assert_eq!(record.result, 10);
    }

    #[test]
    fn bad_notation_logs_nothing() {
        let mut s = scripted(&[3]);
        assert!(matches!(s.roll("banana"), Err(SessionError::Parse(_))));
        assert!(matches!(s.roll("0d6"), Err(SessionError::Parse(_))));
        assert!(s.history().is_empty());
    }

    #[test]
    fn check_adds_stat_modifier() {
        let mut s = scripted(&[12]);
        let result = s.check("str").unwrap();
        assert_eq!(result.total, 16);
        assert_eq!(result.request.advantage(), AdvantageMode::Normal);
        assert_eq!(s.history().rolls[0].kind, RollKind::Check);
        assert_eq!(s.history().rolls[0].modifier, 4);
    }

    #[test]
    fn unknown_stat_logs_nothing() {
        let mut s = scripted(&[12]);
        assert!(matches!(s.check("luck"), Err(SessionError::UnknownStat(_))));
        assert!(s.history().is_empty());
    }

    #[test]
    fn encounter_updates_log_and_luck() {
        let mut s = scripted(&[16]);
        let outcome = s.encounter("forest", "normal").unwrap();
        assert_eq!(outcome.difficulty, Difficulty::Normal);
        assert!(outcome.success);
        assert_eq!(s.history().encounters.len(), 1);
        assert_eq!(s.history().rolls.len(), 1);
        assert_eq!(s.luck().samples(), [80.0]);
    }

    #[test]
    fn initiative_orders_by_roll_and_keeps_ties() {
        let mut s = scripted(&[12, 12, 7]);
        let order = s.initiative(&["Alice", "Bob", "Cara"]).unwrap();
        let names: Vec<&str> = order.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Cara"]);
        assert!(s.history().is_empty());
    }

    #[test]
    fn initiative_needs_participants() {
        let mut s = scripted(&[12]);
        assert!(matches!(
            s.initiative(&[" ", ""]),
            Err(SessionError::NoParticipants)
        ));
    }

    #[test]
    fn summary_counts_everything() {
        let mut s = scripted(&[4, 15]);
        s.encounter("city", "easy").unwrap();
        s.encounter("city", "easy").unwrap();
        s.roll("1d6").unwrap();
        let sum = s.summary();
        assert_eq!(sum.character, "Brienne");
        assert_eq!(sum.rolls, 3);
        assert_eq!(sum.encounters, 2);
        assert_eq!(sum.luck_mean, Some(47.5));
        assert_eq!(sum.trend, Some(Trend::Up));
    }

    #[test]
    fn snapshot_and_restore_replace_state() {
        let mut a = scripted(&[18]);
        a.encounter("dungeon", "hard").unwrap();
        let saved = a.snapshot();

        let mut b = scripted(&[2]);
        b.roll("1d4").unwrap();
        b.roll("1d4").unwrap();
        b.restore(saved.clone());
        assert_eq!(b.snapshot(), saved);
        assert_eq!(b.history().rolls.len(), 1);
        assert_eq!(b.luck().samples(), [90.0]);
    }

    #[test]
    fn seeded_sessions_repeat() {
        let config = SessionConfig::default().with_seed(7);
        let mut a = Session::new(character(), GameData::default(), &config);
        let mut b = Session::new(character(), GameData::default(), &config);
        for _ in 0..10 {
            assert_eq!(
                a.roll("3d8+1").unwrap().rolls,
                b.roll("3d8+1").unwrap().rolls
            );
        }
        assert_eq!(
            a.encounter("forest", "hard").unwrap().encounter,
            b.encounter("forest", "hard").unwrap().encounter
        );
    }

    #[test]
    fn flavor_only_for_criticals() {
        let mut s = scripted(&[20, 11]);
        let crit = s.roll("1d20").unwrap();
        assert!(s.flavor(&crit).is_some());
        let plain = s.roll("1d20").unwrap();
        assert!(s.flavor(&plain).is_none());
    }

    #[test]
    fn process_empty_input() {
        let mut s = scripted(&[10]);
        assert_eq!(s.process("   ").unwrap(), "");
    }

    #[test]
    fn process_roll() {
        let mut s = scripted(&[4, 5, 2, 1]);
        assert_eq!(
            s.process("roll 2d6+3 adv").unwrap(),
            "Rolls: [5, 2] | Mod: +3 | Total: 10"
        );
    }

    #[test]
    fn process_roll_critical_has_quip() {
        let mut s = scripted(&[20]);
        let out = s.process("ROLL 1d20").unwrap();
        assert!(out.starts_with("Rolls: [20] | Mod: +0 | Total: 20\nCritical hit! "));
        let quip = out.rsplit("Critical hit! ").next().unwrap();
        assert!(GameData::default().critical_hit.iter().any(|q| q == quip));
    }

    #[test]
    fn process_check() {
        let mut s = scripted(&[1]);
        let out = s.process("check dex").unwrap();
        assert!(out.starts_with("Rolling DEX check (+2)\nRolls: [1] | Mod: +2 | Total: 3"));
        assert!(out.contains("Critical fail!"));
        assert!(matches!(s.process("check"), Err(SessionError::Usage(_))));
    }

    #[test]
    fn process_encounter() {
        let mut s = scripted(&[9]);
        let out = s.process("enc Dungeon easy").unwrap();
        assert_eq!(out, "Encounter! Giant Rats (easy)\nRoll: 9 | Outcome: Fail");
        assert!(matches!(s.process("enc dungeon"), Err(SessionError::Usage(_))));
        assert!(matches!(
            s.process("encounter swamp easy"),
            Err(SessionError::UnknownLocation(_))
        ));
    }

    #[test]
    fn process_encounter_reports_adjustment() {
        let mut s = scripted(&[19]);
        for _ in 0..3 {
            s.encounter("forest", "normal").unwrap();
        }
        let out = s.process("enc forest easy").unwrap();
        assert!(out.contains("(normal)"));
        assert!(out.contains("Luck shifted the difficulty from easy"));
    }

    #[test]
    fn process_initiative() {
        let mut s = scripted(&[5, 17]);
        let out = s.process("init Goblin, Hero,").unwrap();
        assert_eq!(out, "Initiative order:\n  1. Hero: 17\n  2. Goblin: 5");
        assert!(matches!(s.process("init"), Err(SessionError::NoParticipants)));
    }

    #[test]
    fn process_summary_and_locations() {
        let mut s = scripted(&[10]);
        assert!(s.process("sum").unwrap().starts_with("Character: Brienne"));
        assert_eq!(
            s.process("locations").unwrap(),
            "Locations: city, dungeon, forest, mountain"
        );
        assert!(s.process("help").unwrap().contains("roll <notation>"));
    }

    #[test]
    fn process_unknown_command() {
        let mut s = scripted(&[10]);
        assert!(matches!(
            s.process("dance wildly"),
            Err(SessionError::UnknownCommand(c)) if c == "dance wildly"
        ));
    }
}
