use std::fmt::Display;

use rand::{Rng, random_range};
use serde::{Deserialize, Serialize};

use crate::ludo::{board::ENTRY_ROLL, error::DiceError};

/// A single six-sided die value, always within 1-6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Dice {
    value: u8,
}

impl Dice {
    pub const ALL: [Self; 6] = [
        Dice { value: 1 }, Dice { value: 2 }, Dice { value: 3 },
        Dice { value: 4 }, Dice { value: 5 }, Dice { value: 6 },
    ];

    pub const fn new(value: u8) -> Result<Self, DiceError> {
        match value {
            1..=6 => Ok(Dice { value }),
            _ => Err(DiceError::OutOfRange(value)),
        }
    }

    pub fn roll() -> Self {
        Dice { value: random_range(1..=6) }
    }

    pub fn roll_with<R: Rng>(rng: &mut R) -> Self {
        Dice { value: rng.random_range(1..=6) }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    /// A six lets a waiting token enter and grants another roll.
    pub const fn is_six(&self) -> bool {
        self.value == ENTRY_ROLL
    }
}

impl From<Dice> for u8 {
    fn from(dice: Dice) -> Self {
        dice.value
    }
}

impl TryFrom<u8> for Dice {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Dice::new(value)
    }
}

impl Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
