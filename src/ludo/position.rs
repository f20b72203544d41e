use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::ludo::board::{FINISH, LANE_LENGTH, TRACK_LENGTH, WAITING};

/// Where a token currently is.
///
/// On the wire and in snapshots a position is a single integer:
///
/// | raw      | position                      |
/// |----------|-------------------------------|
/// | `-1`     | [`Position::Waiting`]         |
/// | `0..=51` | [`Position::OnTrack`] (cell)  |
/// | `52..=55`| [`Position::InLane`] (step)   |
/// | `56`     | [`Position::Finished`]        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    Waiting,
    OnTrack(u8),
    InLane(u8),
    Finished,
}

impl Position {
    /// Position for a token that has moved `step` cells into its lane.
    /// Step `LANE_LENGTH - 1` is the finish, anything further does not exist.
    pub fn lane(step: u8) -> Option<Self> {
        match step {
            s if s < LANE_LENGTH - 1 => Some(Position::InLane(s)),
            s if s == LANE_LENGTH - 1 => Some(Position::Finished),
            _ => None,
        }
    }

    pub fn to_raw(&self) -> i8 {
        match self {
            Position::Waiting => WAITING,
            Position::OnTrack(cell) => *cell as i8,
            Position::InLane(step) => (TRACK_LENGTH + step) as i8,
            Position::Finished => FINISH,
        }
    }

    pub fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            WAITING => Some(Position::Waiting),
            r if r >= 0 && r < TRACK_LENGTH as i8 => Some(Position::OnTrack(r as u8)),
            r if r >= TRACK_LENGTH as i8 && r <= FINISH => Position::lane(r as u8 - TRACK_LENGTH),
            _ => None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self, Position::Waiting)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Position::Finished)
    }

    /// The shared cell this position occupies, if any.
    pub fn track_cell(&self) -> Option<u8> {
        match self {
            Position::OnTrack(cell) => Some(*cell),
            _ => None,
        }
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.to_raw()
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(raw: i8) -> Result<Self, Self::Error> {
        Position::from_raw(raw).ok_or_else(|| format!("position {raw} is off the board"))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Waiting => write!(f, "Base"),
            Position::OnTrack(cell) => write!(f, "Track({cell})"),
            Position::InLane(step) => write!(f, "Lane({step})"),
            Position::Finished => write!(f, "Finished"),
        }
    }
}
