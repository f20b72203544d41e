use crate::ludo::{Color, Position, board::entry_cell};

/// A player's single token and the seat it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    name: String,
    color: Color,
    position: Position,
}

impl Token {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Token {
            name: name.into(),
            color,
            position: Position::Waiting,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_waiting(&self) -> bool {
        self.position.is_waiting()
    }

    pub fn is_finished(&self) -> bool {
        self.position.is_finished()
    }

    /// Puts a waiting token on its color's start cell. Does nothing otherwise.
    pub fn enter_track(&mut self) {
        if self.is_waiting() {
            self.position = Position::OnTrack(entry_cell(self.color));
        }
    }

    /// Sends a captured token back to base. Only a token on the shared
    /// track can be captured, so anything else is left alone.
    pub fn send_to_base(&mut self) -> bool {
        match self.position {
            Position::OnTrack(_) => {
                self.position = Position::Waiting;
                true
            }
            _ => false,
        }
    }

    /// Raw placement, no rule checks. The game validates before calling this.
    pub(crate) fn set_position(&mut self, position: Position) {
        if !self.is_finished() {
            self.position = position;
        }
    }

    pub(crate) fn mark_finished(&mut self) {
        self.position = Position::Finished;
    }
}
