//! Character sheets: a name and six ability modifiers in 0-5.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use rk_dice::DiceSource;

use crate::error::{SessionError, SessionResult};

/// Highest allowed ability modifier.
pub const MAX_MODIFIER: u8 = 5;

/// One of the six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stat {
    /// Strength.
    Str,
    /// Dexterity.
    Dex,
    /// Constitution.
    Con,
    /// Intelligence.
    Int,
    /// Wisdom.
    Wis,
    /// Charisma.
    Cha,
}

impl Stat {
    /// All stats in sheet order.
    pub const ALL: [Stat; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    /// Parse a stat key, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "STR" => Some(Self::Str),
            "DEX" => Some(Self::Dex),
            "CON" => Some(Self::Con),
            "INT" => Some(Self::Int),
            "WIS" => Some(Self::Wis),
            "CHA" => Some(Self::Cha),
            _ => None,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "STR"),
            Self::Dex => write!(f, "DEX"),
            Self::Con => write!(f, "CON"),
            Self::Int => write!(f, "INT"),
            Self::Wis => write!(f, "WIS"),
            Self::Cha => write!(f, "CHA"),
        }
    }
}

/// A player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SheetRecord")]
pub struct CharacterSheet {
    name: String,
    stats: BTreeMap<Stat, u8>,
}

/// Unvalidated on-disk form of a sheet.
#[derive(Deserialize)]
struct SheetRecord {
    name: String,
    #[serde(default)]
    stats: BTreeMap<String, i64>,
}

impl TryFrom<SheetRecord> for CharacterSheet {
    type Error = SessionError;

    fn try_from(record: SheetRecord) -> SessionResult<Self> {
        let mut stats = BTreeMap::new();
        for (key, value) in record.stats {
            let stat = Stat::parse(&key).ok_or(SessionError::UnknownStat(key))?;
            stats.insert(stat, check_range(stat, value)?);
        }
        Self::new(&record.name, stats)
    }
}

impl CharacterSheet {
    /// Create a sheet, validating the name and every modifier.
    ///
    /// Every stat in [`Stat::ALL`] must be present.
    pub fn new(name: &str, stats: impl IntoIterator<Item = (Stat, u8)>) -> SessionResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let stats: BTreeMap<Stat, u8> = stats
            .into_iter()
            .map(|(stat, value)| Ok((stat, check_range(stat, i64::from(value))?)))
            .collect::<SessionResult<_>>()?;
        if let Some(missing) = Stat::ALL.iter().find(|s| !stats.contains_key(*s)) {
            return Err(SessionError::MissingStat(missing.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            stats,
        })
    }

    /// Character name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All assigned modifiers in sheet order.
    pub fn stats(&self) -> &BTreeMap<Stat, u8> {
        &self.stats
    }

    /// Look up the modifier for a stat key such as `"str"` or `"DEX"`.
    pub fn modifier(&self, key: &str) -> SessionResult<u8> {
        Stat::parse(key)
            .and_then(|stat| self.stats.get(&stat).copied())
            .ok_or_else(|| SessionError::UnknownStat(key.trim().to_uppercase()))
    }
}

fn check_range(stat: Stat, value: i64) -> SessionResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_MODIFIER)
        .ok_or(SessionError::InvalidStatRange {
            stat: stat.to_string(),
            value,
        })
}

/// Step-by-step character creation.
///
/// A rejected name or stat leaves the builder unchanged so the caller can ask
/// for the same field again.
#[derive(Debug, Clone, Default)]
pub struct CharacterBuilder {
    name: Option<String>,
    stats: BTreeMap<Stat, u8>,
}

impl CharacterBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character name.
    pub fn name(&mut self, name: &str) -> SessionResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Assign one stat by hand.
    pub fn assign(&mut self, stat: Stat, value: i64) -> SessionResult<()> {
        let value = check_range(stat, value)?;
        self.stats.insert(stat, value);
        Ok(())
    }

    /// Roll every stat uniformly in 0-5, returning the rolled values.
    pub fn roll_stats<D: DiceSource + ?Sized>(&mut self, source: &mut D) -> Vec<(Stat, u8)> {
        Stat::ALL
            .iter()
            .map(|&stat| {
                let value = source.pick(usize::from(MAX_MODIFIER) + 1) as u8;
                self.stats.insert(stat, value);
                (stat, value)
            })
            .collect()
    }

    /// Finish creation.
    pub fn build(self) -> SessionResult<CharacterSheet> {
        let name = self.name.ok_or(SessionError::EmptyName)?;
        CharacterSheet::new(&name, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_dice::ScriptedDice;

    fn sheet() -> CharacterSheet {
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

    #[test]
    fn stat_parse_is_case_insensitive() {
        assert_eq!(Stat::parse("str"), Some(Stat::Str));
        assert_eq!(Stat::parse(" Wis "), Some(Stat::Wis));
        assert_eq!(Stat::parse("luck"), None);
    }

    #[test]
    fn modifier_lookup() {
        let s = sheet();
        assert_eq!(s.modifier("str").unwrap(), 4);
        assert_eq!(s.modifier("CHA").unwrap(), 5);
        assert!(matches!(
            s.modifier("luck"),
            Err(SessionError::UnknownStat(k)) if k == "LUCK"
        ));
    }

    #[test]
    fn new_rejects_blank_name() {
        assert!(matches!(
            CharacterSheet::new("  ", []),
            Err(SessionError::EmptyName)
        ));
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(matches!(
            CharacterSheet::new("X", [(Stat::Str, 6)]),
            Err(SessionError::InvalidStatRange { value: 6, .. })
        ));
    }

    #[test]
    fn new_requires_every_stat() {
        assert!(matches!(
            CharacterSheet::new("X", [(Stat::Str, 1), (Stat::Dex, 2)]),
            Err(SessionError::MissingStat(s)) if s == "CON"
        ));
        assert!(matches!(
            CharacterSheet::new("X", []),
            Err(SessionError::MissingStat(s)) if s == "STR"
        ));
    }

    #[test]
    fn builder_rejects_bad_value_and_keeps_state() {
        let mut b = CharacterBuilder::new();
        b.name("Arya").unwrap();
        b.assign(Stat::Str, 3).unwrap();
        assert!(b.assign(Stat::Dex, 9).is_err());
        assert!(b.assign(Stat::Dex, -1).is_err());
        b.assign(Stat::Dex, 5).unwrap();
        for stat in [Stat::Con, Stat::Int, Stat::Wis, Stat::Cha] {
            b.assign(stat, 0).unwrap();
        }
        let s = b.build().unwrap();
        assert_eq!(s.name(), "Arya");
        assert_eq!(s.modifier("str").unwrap(), 3);
        assert_eq!(s.modifier("dex").unwrap(), 5);
    }

    #[test]
    fn builder_requires_every_stat() {
        let mut b = CharacterBuilder::new();
        b.name("Arya").unwrap();
        b.assign(Stat::Str, 3).unwrap();
        assert!(matches!(b.build(), Err(SessionError::MissingStat(s)) if s == "DEX"));
    }

    #[test]
    fn builder_rejects_blank_name() {
        let mut b = CharacterBuilder::new();
        assert!(matches!(b.name(""), Err(SessionError::EmptyName)));
        assert!(matches!(b.build(), Err(SessionError::EmptyName)));
    }

    #[test]
    fn rolled_stats_stay_in_range() {
        let mut dice = ScriptedDice::new(&[1]).with_picks(&[0, 5, 2, 4, 1, 3]);
        let mut b = CharacterBuilder::new();
        b.name("Sansa").unwrap();
        let rolled = b.roll_stats(&mut dice);
        assert_eq!(rolled.len(), 6);
        assert_eq!(rolled[1], (Stat::Dex, 5));
        let s = b.build().unwrap();
        assert!(s.stats().values().all(|v| *v <= MAX_MODIFIER));
    }

    #[test]
    fn serde_uses_uppercase_keys() {
        let json = serde_json::to_string(&sheet()).unwrap();
        assert!(json.contains("\"STR\":4"));
        let back: CharacterSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet());
    }

    #[test]
    fn deserialize_validates() {
        let bad = r#"{"name": "Jon", "stats": {"STR": 7}}"#;
        assert!(serde_json::from_str::<CharacterSheet>(bad).is_err());
        let bad = r#"{"name": "", "stats": {}}"#;
        assert!(serde_json::from_str::<CharacterSheet>(bad).is_err());
        let bad = r#"{"name": "Jon", "stats": {"LUK": 1}}"#;
        assert!(serde_json::from_str::<CharacterSheet>(bad).is_err());
    }

    #[test]
    fn deserialize_requires_every_stat() {
        let err = serde_json::from_str::<CharacterSheet>(r#"{"name": "Jon"}"#).unwrap_err();
        assert!(err.to_string().contains("no value assigned for STR"));

        let partial = r#"{"name": "Jon", "stats": {"STR": 1, "DEX": 2, "CON": 3, "INT": 4, "WIS": 5}}"#;
        let err = serde_json::from_str::<CharacterSheet>(partial).unwrap_err();
        assert!(err.to_string().contains("no value assigned for CHA"));
    }
}
