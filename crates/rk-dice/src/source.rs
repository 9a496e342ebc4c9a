//! Random sources for dice draws.
//!
//! Every draw in a session goes through one [`DiceSource`], so a seeded
//! `StdRng` reproduces a whole session and [`ScriptedDice`] can force exact
//! values in tests and replays.

use rand::Rng;
use rand::rngs::StdRng;

/// A source of uniformly distributed dice draws.
pub trait DiceSource {
    /// Draw one value in `1..=sides`.
    fn draw(&mut self, sides: u32) -> u32;

    /// Pick an index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl DiceSource for StdRng {
    fn draw(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// A source that replays a fixed list of draws, cycling when exhausted.
///
/// Draws are clamped into `1..=sides`. Picks always select the first entry
/// unless picks were scripted with [`ScriptedDice::with_picks`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    draws: Vec<u32>,
    next_draw: usize,
    picks: Vec<usize>,
    next_pick: usize,
}

impl ScriptedDice {
    /// Create a source that yields `draws` in order.
    pub fn new(draws: &[u32]) -> Self {
        Self {
            draws: draws.to_vec(),
            ..Self::default()
        }
    }

    /// Script the indices returned by [`DiceSource::pick`].
    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks = picks.to_vec();
        self
    }
}

impl DiceSource for ScriptedDice {
    fn draw(&mut self, sides: u32) -> u32 {
        if self.draws.is_empty() {
            return 1;
        }
        let value = self.draws[self.next_draw % self.draws.len()];
        self.next_draw += 1;
        value.clamp(1, sides.max(1))
    }

    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() || len == 0 {
            return 0;
        }
        let index = self.picks[self.next_pick % self.picks.len()];
        self.next_pick += 1;
        index.min(len - 1)
    }
}
