use hashbrown::HashMap;
use log::{debug, info, trace};

use crate::ludo::{
    Color, Dice, MoveOutcome, Position, Snapshot, SnapshotEntry, Token,
    board::{TRACK_LENGTH, is_safe_cell, lane_threshold},
    error::JoinError,
};

/// One match: the seated tokens in join order and whose roll is accepted next.
///
/// Join order decides both the seat color and the turn rotation. The turn
/// pointer is only ever moved by [`Game::apply_move`].
#[derive(Debug, Clone, Default)]
pub struct Game {
    tokens: Vec<Token>,
    index: HashMap<String, usize>,
    current_turn: Option<usize>,
}

impl Game {
    pub fn new() -> Self {
        Game::default()
    }

    /// Seats a new player and returns the color it was given.
    pub fn join(&mut self, name: impl Into<String>) -> Result<Color, JoinError> {
        let name = name.into();
        // ',' and '=' delimit the state line
        if name.is_empty() || name.trim() != name || name.contains([',', '=']) {
            return Err(JoinError::InvalidName(name));
        }
        if self.index.contains_key(&name) {
            return Err(JoinError::DuplicateName(name));
        }
        let color = Color::from_index(self.tokens.len()).ok_or(JoinError::TableFull)?;

        info!("{name} joined as {color}");
        self.index.insert(name.clone(), self.tokens.len());
        self.tokens.push(Token::new(name, color));
        if self.current_turn.is_none() {
            self.current_turn = Some(0);
        }
        Ok(color)
    }

    /// Applies one die roll for `name`.
    ///
    /// The roll is resolved in this order: base exit, lane entry (exact count
    /// required), lane movement (exact count required), wrap around the shared
    /// track, finish, capture. A rejected roll leaves every token untouched.
    /// A six grants another roll unless it finishes the token.
    ///
    /// This does not check that `name` holds the turn; callers that care about
    /// turn order check [`Game::current_turn`] first.
    pub fn apply_move(&mut self, name: &str, dice: Dice) -> MoveOutcome {
        let Some(&mover) = self.index.get(name) else {
            return MoveOutcome::Invalid;
        };
        let token = &self.tokens[mover];
        let (player, color, from) = (token.name().to_string(), token.color(), token.position());

        let target = match from {
            Position::Finished => return MoveOutcome::Invalid,
            Position::Waiting => return self.try_enter(mover, player, dice),
            Position::OnTrack(cell) => Self::track_target(color, cell, dice),
            Position::InLane(step) => Position::lane(step + dice.value()),
        };

        let Some(target) = target else {
            debug!("{player} rolled {dice}, overshoots the finish");
            self.advance_turn();
            return MoveOutcome::NeedExact { player, dice };
        };

        if target.is_finished() {
            info!("{player} reached the finish");
            self.tokens[mover].mark_finished();
            self.advance_turn();
            return MoveOutcome::Finished { player };
        }

        let captured = target.track_cell().and_then(|cell| self.capture_at(mover, cell));
        debug!("{player} rolled {dice}: {from} -> {target}");
        self.tokens[mover].set_position(target);

        let bonus = dice.is_six();
        if !bonus {
            self.advance_turn();
        }
        MoveOutcome::Moved { player, dice, captured, bonus }
    }

    fn try_enter(&mut self, mover: usize, player: String, dice: Dice) -> MoveOutcome {
        if dice.is_six() {
            self.tokens[mover].enter_track();
            debug!("{player} entered at {}", self.tokens[mover].position());
            MoveOutcome::Entered { player }
        } else {
            self.advance_turn();
            MoveOutcome::EntryFailed { player, dice }
        }
    }

    /// Destination of a token on the shared track, or `None` when the roll
    /// would carry it past the end of its lane.
    fn track_target(color: Color, cell: u8, dice: Dice) -> Option<Position> {
        let threshold = lane_threshold(color);
        let target = cell + dice.value();
        if cell < threshold && target >= threshold {
            return Position::lane(target - threshold);
        }
        Some(Position::OnTrack(target % TRACK_LENGTH))
    }

    /// Sends home whichever other token sits on `cell`, unless the cell is safe.
    fn capture_at(&mut self, mover: usize, cell: u8) -> Option<String> {
        if is_safe_cell(cell) {
            return None;
        }
        let victim = (0..self.tokens.len())
            .find(|&i| i != mover && self.tokens[i].position() == Position::OnTrack(cell))?;

        let token = &mut self.tokens[victim];
        token.send_to_base();
        trace!("{} captured on cell {cell}", token.name());
        Some(token.name().to_string())
    }

    /// Hands the turn to the next unfinished token in join order. If every
    /// token has finished the pointer stays where it is.
    fn advance_turn(&mut self) {
        let Some(current) = self.current_turn else {
            return;
        };
        let len = self.tokens.len();
        let next = (1..=len)
            .map(|offset| (current + offset) % len)
            .find(|&i| !self.tokens[i].is_finished());
        if let Some(next) = next {
            if next != current {
                debug!("turn passes to {}", self.tokens[next].name());
            }
            self.current_turn = Some(next);
        }
    }

    pub fn current_turn(&self) -> Option<&str> {
        self.current_turn.map(|i| self.tokens[i].name())
    }

    pub fn token(&self, name: &str) -> Option<&Token> {
        self.index.get(name).map(|&i| &self.tokens[i])
    }

    /// Tokens in join order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn winners(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_finished())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .tokens
                .iter()
                .map(|t| SnapshotEntry {
                    name: t.name().to_string(),
                    color: t.color(),
                    position: t.position(),
                })
                .collect(),
            current_turn: self.current_turn().map(str::to_string),
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, name: &str, position: Position) {
        let i = self.index[name];
        match position {
            Position::Finished => self.tokens[i].mark_finished(),
            _ => self.tokens[i].set_position(position),
        }
    }
}
