pub mod board;

mod color;
pub use color::Color;

mod position;
pub use position::Position;

mod dice;
pub use dice::Dice;

mod token;
pub use token::Token;

mod outcome;
pub use outcome::MoveOutcome;

mod game;
pub use game::Game;

mod snapshot;
pub use snapshot::{Snapshot, SnapshotEntry, WireState};

pub mod error;
pub use error::{DiceError, JoinError, WireError};
