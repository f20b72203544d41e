use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ludo::{Color, DiceError, Dice, Game, JoinError, MoveOutcome, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error(transparent)]
    Join(#[from] JoinError),
    #[error("{player} cannot roll, it is {current}'s turn")]
    NotYourTurn { player: String, current: String },
    #[error("no player named {0:?} at this table")]
    UnknownPlayer(String),
    #[error("the match is over, {winner} won")]
    MatchOver { winner: String },
}

/// What to broadcast after a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    pub snapshot: Snapshot,
}

#[derive(Debug, Default)]
struct Seat {
    game: Game,
    winner: Option<String>,
}

/// A match shared between player connections.
///
/// Every roll runs under one lock, so commands arriving together from
/// different connections are applied one after another.
#[derive(Debug, Default)]
pub struct Table {
    seat: Mutex<Seat>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    // A panic mid-roll cannot leave half a move behind, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Seat> {
        self.seat.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn join(&self, name: &str) -> Result<Color, TableError> {
        let mut seat = self.lock();
        if let Some(winner) = &seat.winner {
            return Err(TableError::MatchOver { winner: winner.clone() });
        }
        Ok(seat.game.join(name)?)
    }

    /// Applies a roll reported by `name` without checking turn order.
    pub fn submit(&self, name: &str, dice: u8) -> Result<MoveReport, TableError> {
        let dice = Dice::new(dice)?;
        let mut seat = self.lock();
        Self::play(&mut seat, name, dice)
    }

    /// Rolls for `name`, who must hold the turn.
    pub fn roll(&self, name: &str) -> Result<MoveReport, TableError> {
        self.roll_with(name, &mut rand::rng())
    }

    pub fn roll_with<R: Rng>(&self, name: &str, rng: &mut R) -> Result<MoveReport, TableError> {
        let mut seat = self.lock();
        if seat.game.token(name).is_none() {
            return Err(TableError::UnknownPlayer(name.to_string()));
        }
        match seat.game.current_turn() {
            Some(current) if current != name => {
                return Err(TableError::NotYourTurn {
                    player: name.to_string(),
                    current: current.to_string(),
                });
            }
            _ => {}
        }
        let dice = Dice::roll_with(rng);
        debug!("{name} rolls {dice}");
        Self::play(&mut seat, name, dice)
    }

    fn play(seat: &mut Seat, name: &str, dice: Dice) -> Result<MoveReport, TableError> {
        if let Some(winner) = &seat.winner {
            return Err(TableError::MatchOver { winner: winner.clone() });
        }
        let outcome = seat.game.apply_move(name, dice);
        if let Some(winner) = outcome.winner() {
            info!("match over, {winner} wins");
            seat.winner = Some(winner.to_string());
        }
        Ok(MoveReport { outcome, snapshot: seat.game.snapshot() })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().game.snapshot()
    }

    pub fn current_turn(&self) -> Option<String> {
        self.lock().game.current_turn().map(str::to_string)
    }

    pub fn winner(&self) -> Option<String> {
        self.lock().winner.clone()
    }

    pub fn is_over(&self) -> bool {
        self.lock().winner.is_some()
    }
}
