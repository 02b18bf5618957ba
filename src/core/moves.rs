//! Move representation: endpoints, candidates, and the history record.
//!
//! A move is a pair of squares. `Square::Bar` is only ever an origin (bar
//! re-entry) and `Square::Off` only ever a destination (bear-off); the
//! engine rejects the other combinations at validation time.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// An endpoint of a move: a board point, the bar, or off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// A board point, index 0-23.
    Point(u8),
    /// The bar (origin of a re-entry).
    Bar,
    /// Off the board (destination of a bear-off).
    Off,
}

impl Square {
    /// The point index, if this is a point.
    #[must_use]
    pub const fn point(self) -> Option<u8> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }
}

impl From<u8> for Square {
    fn from(point: u8) -> Self {
        Self::Point(point)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point(p) => write!(f, "point {p}"),
            Self::Bar => f.write_str("bar"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A candidate move for a specific die value, as enumerated by the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// The die value this move consumes.
    pub die: u8,
}

impl Move {
    /// Create a move.
    #[must_use]
    pub const fn new(from: Square, to: Square, die: u8) -> Self {
        Self { from, to, die }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.die)
    }
}

/// An executed move with metadata, as appended to the game history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number the move was played on.
    pub turn: u32,
    /// The player who moved.
    pub player: PlayerId,
    pub from: Square,
    pub to: Square,
    /// The die value consumed.
    pub die: u8,
    /// Whether an opposing checker was sent to the bar.
    pub captured: bool,
}

impl MoveRecord {
    /// Create a history record.
    #[must_use]
    pub fn new(turn: u32, player: PlayerId, from: Square, to: Square, die: u8, captured: bool) -> Self {
        Self {
            turn,
            player,
            from,
            to,
            die,
            captured,
        }
    }
}

/// What happened when a move executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// An opposing checker was sent to the bar.
    pub captured: bool,
    /// The turn ended with this move (budget exhausted, remaining values
    /// unusable, or the game finished).
    pub turn_ended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_display() {
        assert_eq!(format!("{}", Square::Point(17)), "point 17");
        assert_eq!(format!("{}", Square::Bar), "bar");
        assert_eq!(format!("{}", Square::Off), "off");
    }

    #[test]
    fn test_square_point() {
        assert_eq!(Square::Point(3).point(), Some(3));
        assert_eq!(Square::Bar.point(), None);
        assert_eq!(Square::Off.point(), None);
        assert_eq!(Square::from(9), Square::Point(9));
    }

    #[test]
    fn test_move_equality() {
        let a = Move::new(Square::Point(23), Square::Point(20), 3);
        let b = Move::new(Square::Point(23), Square::Point(20), 3);
        let c = Move::new(Square::Point(23), Square::Point(18), 5);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_serialization() {
        let record = MoveRecord::new(4, PlayerId::Two, Square::Bar, Square::Point(3), 4, true);
        let json = serde_json::to_string(&record).unwrap();
        let back: MoveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
