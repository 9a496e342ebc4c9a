//! Dice notation: `<count>d<sides>[(+|-)<modifier>] [adv|dis]`.
//!
//! The first whitespace-separated token is the dice term. An `adv` or `dis`
//! token anywhere in the input selects advantage or disadvantage, and `adv`
//! wins when both are present. Other tokens are ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ParseResult};

/// Most dice a single request may roll.
pub const MAX_DICE: u32 = 1000;

/// How each die in a roll is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvantageMode {
    /// One draw per die.
    #[default]
    Normal,
    /// Two draws per die, keep the higher.
    Advantage,
    /// Two draws per die, keep the lower.
    Disadvantage,
}

impl fmt::Display for AdvantageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Advantage => write!(f, "advantage"),
            Self::Disadvantage => write!(f, "disadvantage"),
        }
    }
}

/// A validated request to roll `count` dice of `sides` sides.
///
/// Serializes as its notation string, e.g. `"2d6+3 adv"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RollRequest {
    count: u32,
    sides: u32,
    modifier: i32,
    advantage: AdvantageMode,
}

impl RollRequest {
    /// Create a request with no modifier and normal draws.
    pub fn new(count: u32, sides: u32) -> ParseResult<Self> {
        if count == 0 {
            return Err(ParseError::ZeroCount);
        }
        if count > MAX_DICE {
            return Err(ParseError::TooManyDice {
                count,
                max: MAX_DICE,
            });
        }
        if sides < 2 {
            return Err(ParseError::TooFewSides(sides));
        }
        Ok(Self {
            count,
            sides,
            modifier: 0,
            advantage: AdvantageMode::Normal,
        })
    }

    /// A single plain d20.
    pub fn d20() -> Self {
        Self {
            count: 1,
            sides: 20,
            modifier: 0,
            advantage: AdvantageMode::Normal,
        }
    }

    /// Set the flat modifier added to the total.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Set the advantage mode.
    pub fn with_advantage(mut self, advantage: AdvantageMode) -> Self {
        self.advantage = advantage;
        self
    }

    /// Number of dice.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides per die.
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Advantage mode.
    pub fn advantage(&self) -> AdvantageMode {
        self.advantage
    }

    /// The bare dice term without modifier, e.g. `2d6`.
    pub fn dice(&self) -> String {
        format!("{}d{}", self.count, self.sides)
    }
}

impl fmt::Display for RollRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        match self.advantage {
            AdvantageMode::Normal => Ok(()),
            AdvantageMode::Advantage => write!(f, " adv"),
            AdvantageMode::Disadvantage => write!(f, " dis"),
        }
    }
}

impl FromStr for RollRequest {
    type Err = ParseError;

    fn from_str(s: &str) -> ParseResult<Self> {
        parse(s)
    }
}

impl TryFrom<String> for RollRequest {
    type Error = ParseError;

    fn try_from(value: String) -> ParseResult<Self> {
        parse(&value)
    }
}

impl From<RollRequest> for String {
    fn from(request: RollRequest) -> Self {
        request.to_string()
    }
}

/// Parse dice notation such as `2d6+3 adv` or `1d20-1`.
pub fn parse(input: &str) -> ParseResult<RollRequest> {
    let lower = input.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();
    let Some(term) = tokens.first() else {
        return Err(ParseError::Empty);
    };

    let advantage = if tokens.contains(&"adv") {
        AdvantageMode::Advantage
    } else if tokens.contains(&"dis") {
        AdvantageMode::Disadvantage
    } else {
        AdvantageMode::Normal
    };

    let (count, rest) = term
        .split_once('d')
        .ok_or_else(|| ParseError::MissingSeparator(term.to_string()))?;

    let (sides, modifier) = if let Some((sides, m)) = rest.split_once('+') {
        (sides, i64::from(parse_number("modifier", m)?))
    } else if let Some((sides, m)) = rest.split_once('-') {
        (sides, -i64::from(parse_number("modifier", m)?))
    } else {
        (rest, 0)
    };

    let modifier = i32::try_from(modifier).map_err(|_| ParseError::InvalidNumber {
        field: "modifier",
        value: modifier.to_string(),
    })?;

    let count = parse_number("count", count)?;
    let sides = parse_number("sides", sides)?;

    Ok(RollRequest::new(count, sides)?
        .with_modifier(modifier)
        .with_advantage(advantage))
}

/// Read an unsigned decimal made of ASCII digits only.
fn parse_number(field: &'static str, text: &str) -> ParseResult<u32> {
    let invalid = || ParseError::InvalidNumber {
        field,
        value: text.to_string(),
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse::<u32>().map_err(|_| invalid())
}
