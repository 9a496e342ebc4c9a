//! End-of-session summary.

use std::fmt;

use crate::history::SessionHistory;
use crate::luck::{LuckHistory, Trend};

/// Counts and luck statistics for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    /// Character name.
    pub character: String,
    /// Executed rolls of every kind.
    pub rolls: usize,
    /// Resolved encounters.
    pub encounters: usize,
    /// Mean of every luck sample, `None` before the first encounter.
    pub luck_mean: Option<f64>,
    /// Direction of the latest luck change, `None` with fewer than two samples.
    pub trend: Option<Trend>,
}

impl SessionSummary {
    /// Summarize a session.
    pub fn new(character: &str, history: &SessionHistory, luck: &LuckHistory) -> Self {
        Self {
            character: character.to_string(),
            rolls: history.rolls.len(),
            encounters: history.encounters.len(),
            luck_mean: luck.mean(),
            trend: luck.trend(),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Character: {}", self.character)?;
        write!(f, "Rolls: {} | Encounters: {}", self.rolls, self.encounters)?;
        if let Some(mean) = self.luck_mean {
            write!(f, "\nAverage Luck: {mean:.1}%")?;
            if let Some(trend) = self.trend {
                write!(f, " ({trend})")?;
            }
        }
        Ok(())
    }
}
