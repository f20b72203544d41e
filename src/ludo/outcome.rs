use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::ludo::Dice;

/// Result of a single roll applied to the game.
///
/// Rejections are ordinary outcomes rather than errors: a rejected roll never
/// changes a token. The [`Display`] form is the message shown to every player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Unknown player, or a player whose token already finished.
    Invalid,
    Entered { player: String },
    EntryFailed { player: String, dice: Dice },
    NeedExact { player: String, dice: Dice },
    Finished { player: String },
    Moved {
        player: String,
        dice: Dice,
        captured: Option<String>,
        bonus: bool,
    },
}

impl MoveOutcome {
    /// Rolls that did not move the mover's token.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Invalid | MoveOutcome::EntryFailed { .. } | MoveOutcome::NeedExact { .. }
        )
    }

    /// Whether the same player rolls again.
    pub fn grants_bonus(&self) -> bool {
        match self {
            MoveOutcome::Entered { .. } => true,
            MoveOutcome::Moved { bonus, .. } => *bonus,
            _ => false,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        match self {
            MoveOutcome::Finished { player } => Some(player),
            _ => None,
        }
    }

    pub fn captured(&self) -> Option<&str> {
        match self {
            MoveOutcome::Moved { captured, .. } => captured.as_deref(),
            _ => None,
        }
    }
}

impl Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::Invalid => write!(f, "Invalid move"),
            MoveOutcome::Entered { player } => {
                write!(f, "{player} rolled 6! Token enters the board. Roll again!")
            }
            MoveOutcome::EntryFailed { player, dice } => {
                write!(f, "{player} rolled {dice}. Need 6 to start!")
            }
            MoveOutcome::NeedExact { player, dice } => {
                write!(f, "{player} rolled {dice}. Need exact number to finish!")
            }
            MoveOutcome::Finished { player } => write!(f, "{player} reached the finish!"),
            MoveOutcome::Moved { player, dice, captured, bonus } => {
                write!(f, "{player} moved {dice} steps")?;
                if let Some(captured) = captured {
                    write!(f, " and captured {captured}!")?;
                }
                if *bonus {
                    write!(f, " Roll again!")?;
                }
                Ok(())
            }
        }
    }
}
