use crate::common::{Num, ParseSidesError, Sides};
use std::fmt;

/// A group of identically sided dice, as written in notation (`2d20`,
/// `d6`, `4dF`). Rolling one produces a [`crate::roll::tree::Dice`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Dice {
    pub rolls: Num,
    pub sides: Sides,
}

impl Dice {
    pub const fn new(rolls: Num, sides: Sides) -> Self {
        Self { rolls, sides }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.rolls, self.sides)
    }
}

impl std::str::FromStr for Dice {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rolls, sides) = s
            .split_once(|c| c == 'd' || c == 'D')
            .ok_or(ParseDiceError::NoDelimiter)?;
        let rolls = if rolls.is_empty() {
            Num::MIN
        } else {
            let n = rolls.parse().map_err(ParseDiceError::InvalidRolls)?;
            Num::new(n).ok_or(ParseDiceError::ZeroRolls)?
        };
        let sides = sides.parse().map_err(ParseDiceError::InvalidSides)?;
        Ok(Self::new(rolls, sides))
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without 'd' delimiter")]
    NoDelimiter,
    #[error("{0}")]
    InvalidRolls(std::num::ParseIntError),
    #[error("dice must be rolled at least once")]
    ZeroRolls,
    #[error("{0}")]
    InvalidSides(ParseSidesError),
}
