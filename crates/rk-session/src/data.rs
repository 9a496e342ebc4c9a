//! Game data: the encounter table and critical flavor text.
//!
//! Loaded once from `data.json` in the shape
//! `{"encounters": {location: {tier: [names]}}, "critical_hit": [...],
//! "critical_fail": [...]}`. A built-in set is used when no file exists.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use rk_dice::{Critical, DiceSource};

use crate::error::{SessionError, SessionResult};

/// Encounter difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy encounters.
    Easy,
    /// Normal encounters.
    Normal,
    /// Hard encounters.
    Hard,
}

impl Difficulty {
    /// All tiers from easiest to hardest.
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Parse a tier name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Normal => write!(f, "normal"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Raw location map: location name to tier to encounter names.
pub type LocationMap = BTreeMap<String, BTreeMap<Difficulty, Vec<String>>>;

/// Encounter names per location and tier. Location keys are lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocationMap", into = "LocationMap")]
pub struct EncounterTable {
    locations: LocationMap,
}

impl TryFrom<LocationMap> for EncounterTable {
    type Error = SessionError;

    fn try_from(locations: LocationMap) -> SessionResult<Self> {
        Self::new(locations)
    }
}

impl From<EncounterTable> for LocationMap {
    fn from(table: EncounterTable) -> Self {
        table.locations
    }
}

impl EncounterTable {
    /// Build a table, lowercasing location keys and rejecting empty tiers
    /// and keys that collide once lowercased.
    pub fn new(locations: LocationMap) -> SessionResult<Self> {
        let mut normalized = LocationMap::new();
        for (location, tiers) in locations {
            let key = location.trim().to_lowercase();
            if key.is_empty() {
                return Err(SessionError::InvalidData("empty location name".to_string()));
            }
            if tiers.is_empty() {
                return Err(SessionError::InvalidData(format!(
                    "location '{key}' has no difficulty tiers"
                )));
            }
            if let Some((tier, _)) = tiers.iter().find(|(_, names)| names.is_empty()) {
                return Err(SessionError::InvalidData(format!(
                    "location '{key}' has no {tier} encounters"
                )));
            }
            if normalized.contains_key(&key) {
                return Err(SessionError::InvalidData(format!(
                    "duplicate location '{key}'"
                )));
            }
            normalized.insert(key, tiers);
        }
        Ok(Self {
            locations: normalized,
        })
    }

    /// Location names in sorted order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Tiers for a location, if the location exists. Lookup ignores case.
    pub fn tiers(&self, location: &str) -> Option<&BTreeMap<Difficulty, Vec<String>>> {
        self.locations.get(&location.trim().to_lowercase())
    }

    /// Encounter names for a location and tier.
    pub fn encounters(&self, location: &str, difficulty: Difficulty) -> Option<&[String]> {
        self.tiers(location)?
            .get(&difficulty)
            .map(Vec::as_slice)
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the table has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Everything the session reads from the game data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    /// Encounter table.
    pub encounters: EncounterTable,
    /// Quips shown on a natural 20.
    #[serde(default)]
    pub critical_hit: Vec<String>,
    /// Quips shown on a natural 1.
    #[serde(default)]
    pub critical_fail: Vec<String>,
}

impl GameData {
    /// Parse game data from JSON text.
    pub fn from_json_str(json: &str, path: &Path) -> SessionResult<Self> {
        serde_json::from_str(json).map_err(|source| SessionError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load game data from `path`, or the built-in data if it does not exist.
    pub fn load_or_default(path: &Path) -> SessionResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no game data file, using built-in tables");
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json_str(&json, path)?;
        tracing::info!(
            path = %path.display(),
            locations = data.encounters.len(),
            "loaded game data"
        );
        Ok(data)
    }

    /// Pick a quip for a critical result. `None` when the pool is empty.
    pub fn flavor<D: DiceSource + ?Sized>(&self, critical: Critical, source: &mut D) -> Option<&str> {
        let pool = match critical {
            Critical::Hit => &self.critical_hit,
            Critical::Fail => &self.critical_fail,
        };
        if pool.is_empty() {
            return None;
        }
        Some(pool[source.pick(pool.len())].as_str())
    }
}

impl Default for GameData {
    fn default() -> Self {
        let table = [
            (
                "forest",
                ["Lost Fawn", "Pack of Wolves", "Dire Bear"],
                ["Hungry Boar", "Goblin Scouts", "Owlbear"],
                ["Bandit Ambush", "Dryad's Curse", "Young Green Dragon"],
            ),
            (
                "dungeon",
                ["Giant Rats", "Skeleton Guard", "Slime Puddle"],
                ["Zombie Horde", "Mimic Chest", "Goblin Shaman"],
                ["Beholder", "Lich's Apprentice", "Minotaur"],
            ),
            (
                "mountain",
                ["Mountain Goat", "Rockslide", "Lost Dwarf"],
                ["Harpies", "Ogre", "Griffon"],
                ["Stone Giant", "Wyvern", "Frost Troll"],
            ),
            (
                "city",
                ["Pickpocket", "Drunk Brawler", "Stray Dog"],
                ["Thieves' Guild Thug", "Corrupt Guard", "Cultist"],
                ["Assassin", "Doppelganger", "Vampire Noble"],
            ),
        ];

        let locations: LocationMap = table
            .into_iter()
            .map(|(location, easy, normal, hard)| {
                let tiers: BTreeMap<Difficulty, Vec<String>> = [
                    (Difficulty::Easy, easy),
                    (Difficulty::Normal, normal),
                    (Difficulty::Hard, hard),
                ]
                .into_iter()
                .map(|(tier, names)| (tier, names.iter().map(|n| n.to_string()).collect()))
                .collect();
                (location.to_string(), tiers)
            })
            .collect();

        Self {
            encounters: EncounterTable { locations },
            critical_hit: [
                "The gods smile upon you!",
                "A legendary strike!",
                "Bards will sing of this one.",
            ]
            .map(String::from)
            .to_vec(),
            critical_fail: [
                "You trip over your own feet.",
                "Your weapon slips from your grasp.",
                "Somewhere, a goblin laughs.",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}
