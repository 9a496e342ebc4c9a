//! Roll execution and result classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::notation::{AdvantageMode, RollRequest};
use crate::source::DiceSource;

/// The natural-roll classification of a d20 result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Critical {
    /// At least one die showed 20.
    Hit,
    /// At least one die showed 1 and none showed 20.
    Fail,
}

impl fmt::Display for Critical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "Critical Hit"),
            Self::Fail => write!(f, "Critical Fail"),
        }
    }
}

/// The outcome of executing a [`RollRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// What was rolled.
    pub request: RollRequest,
    /// Kept value per die, in roll order.
    pub rolls: Vec<u32>,
    /// The losing draw per die under advantage or disadvantage.
    pub discarded: Vec<u32>,
    /// Sum of `rolls` plus the modifier.
    pub total: i64,
    /// A d20 in the roll showed 20.
    pub critical_hit: bool,
    /// A d20 in the roll showed 1.
    pub critical_fail: bool,
}

impl RollResult {
    /// The single critical classification, preferring a hit over a fail.
    pub fn critical(&self) -> Option<Critical> {
        if self.critical_hit {
            Some(Critical::Hit)
        } else if self.critical_fail {
            Some(Critical::Fail)
        } else {
            None
        }
    }

    /// Sum of the kept dice without the modifier.
    pub fn natural(&self) -> i64 {
        self.rolls.iter().map(|&r| i64::from(r)).sum()
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.rolls.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "Rolls: [{}] | Mod: {:+} | Total: {}",
            values.join(", "),
            self.request.modifier(),
            self.total
        )
    }
}

/// Flag natural 20s and 1s. Only d20 rolls can be critical.
pub fn classify(sides: u32, rolls: &[u32]) -> (bool, bool) {
    if sides != 20 {
        return (false, false);
    }
    (rolls.contains(&20), rolls.contains(&1))
}

/// Roll every die in `request`, honoring advantage and disadvantage.
pub fn roll<D: DiceSource + ?Sized>(request: &RollRequest, source: &mut D) -> RollResult {
    let sides = request.sides();
    let mut rolls = Vec::with_capacity(request.count() as usize);
    let mut discarded = Vec::new();

    for _ in 0..request.count() {
        let first = source.draw(sides);
        let kept = match request.advantage() {
            AdvantageMode::Normal => first,
            AdvantageMode::Advantage => {
                let second = source.draw(sides);
                discarded.push(first.min(second));
                first.max(second)
            }
            AdvantageMode::Disadvantage => {
                let second = source.draw(sides);
                discarded.push(first.max(second));
                first.min(second)
            }
        };
        rolls.push(kept);
    }

    // At most MAX_DICE dice of u32::MAX sides, so the sum always fits in i64.
    let natural: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
    let total = natural + i64::from(request.modifier());
    let (critical_hit, critical_fail) = classify(sides, &rolls);

    tracing::debug!(%request, ?rolls, total, "rolled dice");

    RollResult {
        request: *request,
        rolls,
        discarded,
        total,
        critical_hit,
        critical_fail,
    }
}
