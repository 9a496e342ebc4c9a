//! Error types for the dice engine.

/// Errors produced while parsing dice notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The notation was empty or whitespace only.
    #[error("empty dice notation")]
    Empty,

    /// The dice term has no `d` between count and sides.
    #[error("missing 'd' separator in '{0}'")]
    MissingSeparator(String),

    /// A numeric part of the dice term could not be read.
    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        /// Which part failed: count, sides, or modifier.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// Zero dice were requested.
    #[error("dice count must be at least 1")]
    ZeroCount,

    /// The die has fewer than two sides.
    #[error("a die needs at least 2 sides, got {0}")]
    TooFewSides(u32),

    /// More dice than a single roll allows.
    #[error("cannot roll more than {max} dice at once, got {count}")]
    TooManyDice {
        /// The requested count.
        count: u32,
        /// The per-roll limit.
        max: u32,
    },
}

/// Convenience result type for dice parsing.
pub type ParseResult<T> = Result<T, ParseError>;
