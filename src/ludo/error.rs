use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("die value {0} is outside 1-6")]
    OutOfRange(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("the table already seats four players")]
    TableFull,
    #[error("a player named {0:?} already joined")]
    DuplicateName(String),
    #[error("invalid player name {0:?}")]
    InvalidName(String),
}

/// Failure to read a `name=position` state line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("entry {entry:?} has no player name")]
    MissingName { entry: String },
    #[error("entry {entry:?} does not hold a board position")]
    InvalidPosition { entry: String },
}
