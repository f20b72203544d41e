use std::str::FromStr;

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::ludo::{Color, Position, error::WireError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub name: String,
    pub color: Color,
    pub position: Position,
}

/// Read-only copy of a game for renderers and state broadcasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Join order.
    pub entries: Vec<SnapshotEntry>,
    pub current_turn: Option<String>,
}

impl Snapshot {
    /// Raw positions in join order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, i8)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.position.to_raw()))
    }

    pub fn colors(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries.iter().map(|e| (e.name.as_str(), e.color))
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.position)
    }

    /// The state line, e.g. `Alice=5,Bob=-1,Cara=54`.
    pub fn to_wire(&self) -> String {
        self.positions()
            .map(|(name, raw)| format!("{name}={raw}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A state line as read back by a consumer.
///
/// Pieces without a `=` are skipped. A piece that has one but does not hold
/// a name and an on-board position fails the whole line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireState {
    entries: Vec<(String, Position)>,
}

impl WireState {
    pub fn parse(line: &str) -> Result<Self, WireError> {
        let mut entries = Vec::new();
        for piece in line.split(',') {
            let Some((name, raw)) = piece.trim().split_once('=') else {
                trace!("skipping state piece {piece:?}");
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(WireError::MissingName { entry: piece.to_string() });
            }
            let position = raw
                .trim()
                .parse::<i8>()
                .ok()
                .and_then(Position::from_raw)
                .ok_or_else(|| WireError::InvalidPosition { entry: piece.to_string() })?;
            entries.push((name.to_string(), position));
        }
        Ok(WireState { entries })
    }

    /// Parses a broadcast line, logging and dropping it when it is malformed.
    pub fn parse_or_log(line: &str) -> Option<Self> {
        match Self::parse(line) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Error parsing state: {e}");
                None
            }
        }
    }

    pub fn entries(&self) -> &[(String, Position)] {
        &self.entries
    }

    /// Colors follow line order, the same way seats are handed out.
    pub fn colors(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, (name, _))| Color::from_index(i).map(|c| (name.as_str(), c)))
    }

    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for WireState {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WireState::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_state_line() {
        let state: WireState = "Alice=5, Bob=-1 ,Cara=54".parse().unwrap();
        assert_eq!(state.len(), 3);
        assert_eq!(state.position_of("Alice"), Some(Position::OnTrack(5)));
        assert_eq!(state.position_of("Bob"), Some(Position::Waiting));
        assert_eq!(state.position_of("Cara"), Some(Position::InLane(2)));
        let colors: Vec<_> = state.colors().collect();
        assert_eq!(colors, vec![("Alice", Color::Red), ("Bob", Color::Green), ("Cara", Color::Yellow)]);
    }

    #[test]
    fn test_pieces_without_separator_are_skipped() {
        let state = WireState::parse("Alice=5,,garbage,Bob=56").unwrap();
        assert_eq!(state.len(), 2);
        assert_eq!(state.position_of("Bob"), Some(Position::Finished));
        assert!(WireState::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_bad_position_fails_line() {
        assert_eq!(
            WireState::parse("Alice=5,Bob=x"),
            Err(WireError::InvalidPosition { entry: "Bob=x".into() })
        );
        assert!(matches!(WireState::parse("Alice=57"), Err(WireError::InvalidPosition { .. })));
        assert!(matches!(WireState::parse("=3"), Err(WireError::MissingName { .. })));
        assert_eq!(WireState::parse_or_log("Alice=-9"), None);
    }

    #[test]
    fn test_snapshot_wire_and_json() {
        let snapshot = Snapshot {
            entries: vec![
                SnapshotEntry { name: "Alice".into(), color: Color::Red, position: Position::OnTrack(5) },
                SnapshotEntry { name: "Bob".into(), color: Color::Green, position: Position::Waiting },
            ],
            current_turn: Some("Bob".into()),
        };
        let line = snapshot.to_wire();
        assert_eq!(line, "Alice=5,Bob=-1");
        let state = WireState::parse(&line).unwrap();
        assert_eq!(state.position_of("Alice"), snapshot.position_of("Alice"));

        let json = snapshot.to_json().unwrap();
        assert!(json.contains(r#""position":-1"#));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
