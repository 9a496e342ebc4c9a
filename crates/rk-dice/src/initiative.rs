//! Initiative order for a list of participants.
//!
//! Each participant rolls one d20. Order is by descending roll; the sort is
//! stable so tied participants keep their input order.

use serde::{Deserialize, Serialize};

use crate::source::DiceSource;

/// One participant's place in the initiative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    /// Participant name.
    pub name: String,
    /// The d20 initiative roll.
    pub roll: u32,
}

/// Roll a d20 per participant, in input order, and sort the result.
pub fn roll_initiative<D, S>(participants: &[S], source: &mut D) -> Vec<InitiativeEntry>
where
    D: DiceSource + ?Sized,
    S: AsRef<str>,
{
    let entries = participants
        .iter()
        .map(|name| InitiativeEntry {
            name: name.as_ref().to_string(),
            roll: source.draw(20),
        })
        .collect();
    order(entries)
}

/// Sort entries by descending roll, preserving input order among ties.
pub fn order(mut entries: Vec<InitiativeEntry>) -> Vec<InitiativeEntry> {
    entries.sort_by(|a, b| b.roll.cmp(&a.roll));
    entries
}
