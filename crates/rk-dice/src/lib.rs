//! Dice engine for Rollkeeper.
//!
//! Parses dice notation (`2d6+3 adv`), rolls it against a [`DiceSource`]
//! with advantage and disadvantage, flags natural 20s and 1s on d20 rolls,
//! and orders initiative.

pub mod error;
pub mod initiative;
pub mod notation;
pub mod roll;
pub mod source;

pub use error::{ParseError, ParseResult};
pub use initiative::{InitiativeEntry, roll_initiative};
pub use notation::{AdvantageMode, MAX_DICE, RollRequest, parse};
pub use roll::{Critical, RollResult, classify, roll};
pub use source::{DiceSource, ScriptedDice};
