//! Luck tracking and difficulty adaptation.
//!
//! Each resolved encounter records a luck sample from its d20. The mean of
//! the trailing window nudges the next encounter's difficulty: a lucky
//! streak turns an easy pick into a normal one, an unlucky streak turns a
//! hard pick into a normal one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Difficulty;
use crate::error::{SessionError, SessionResult};

/// Samples averaged for difficulty adaptation.
pub const LUCK_WINDOW: usize = 5;
/// Window average used when no samples exist.
pub const NEUTRAL_LUCK: f64 = 50.0;
/// Above this average, easy encounters become normal.
pub const LUCKY_THRESHOLD: f64 = 70.0;
/// Below this average, hard encounters become normal.
pub const UNLUCKY_THRESHOLD: f64 = 30.0;

/// Direction of the most recent luck change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// The latest sample beat the one before it.
    Up,
    /// The latest sample did not beat the one before it.
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "improving"),
            Self::Down => write!(f, "declining"),
        }
    }
}

/// All luck samples of a session, oldest first, each in 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct LuckHistory {
    samples: Vec<f64>,
}

impl TryFrom<Vec<f64>> for LuckHistory {
    type Error = SessionError;

    fn try_from(samples: Vec<f64>) -> SessionResult<Self> {
        if let Some(bad) = samples.iter().find(|s| !(0.0..=100.0).contains(*s)) {
            return Err(SessionError::InvalidData(format!(
                "luck sample {bad} is outside 0-100"
            )));
        }
        Ok(Self { samples })
    }
}

impl From<LuckHistory> for Vec<f64> {
    fn from(history: LuckHistory) -> Self {
        history.samples
    }
}

impl LuckHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the d20 total that resolved an encounter.
    pub fn record(&mut self, d20_total: i64) -> f64 {
        let sample = d20_total.clamp(0, 20) as f64 / 20.0 * 100.0;
        self.samples.push(sample);
        sample
    }

    /// All samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no encounter has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The trailing window, at most [`LUCK_WINDOW`] samples.
    pub fn window(&self) -> &[f64] {
        let start = self.samples.len().saturating_sub(LUCK_WINDOW);
        &self.samples[start..]
    }

    /// Mean of the trailing window, [`NEUTRAL_LUCK`] when empty.
    pub fn window_average(&self) -> f64 {
        mean(self.window()).unwrap_or(NEUTRAL_LUCK)
    }

    /// Mean of every sample.
    pub fn mean(&self) -> Option<f64> {
        mean(&self.samples)
    }

    /// Whether the latest sample beat the previous one.
    pub fn trend(&self) -> Option<Trend> {
        match self.samples.as_slice() {
            [.., previous, latest] if latest > previous => Some(Trend::Up),
            [.., _, _] => Some(Trend::Down),
            _ => None,
        }
    }
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        None
    } else {
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// Apply the luck streak rule to a requested difficulty.
pub fn adjust_difficulty(average: f64, requested: Difficulty) -> Difficulty {
    match requested {
        Difficulty::Easy if average > LUCKY_THRESHOLD => Difficulty::Normal,
        Difficulty::Hard if average < UNLUCKY_THRESHOLD => Difficulty::Normal,
        other => other,
    }
}
