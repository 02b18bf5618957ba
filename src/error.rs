//! Error taxonomy for rule violations and state-machine misuse.
//!
//! Every fallible operation in the engine surfaces one of the variants
//! below, carrying the offending parameters. Nothing is silently corrected
//! and nothing is retried: a failed call leaves the game state untouched.
//!
//! Front-ends match on `GameError` for targeted messaging, or rely on its
//! `Display`/`Error` impls for generic handling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::moves::Square;
use crate::core::player::PlayerId;

/// Why a requested move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination holds two or more opposing checkers.
    Blocked,
    /// The move runs against the player's direction of travel.
    WrongDirection,
    /// Checkers on the bar must re-enter before any other move.
    MustEnterFromBar,
    /// The dice have not been rolled this turn.
    DiceNotRolled,
    /// The checker is not on the bar.
    NotOnBar,
    /// The checker is not on a board point.
    NotOnBoard,
    /// The checker was already borne off and cannot re-enter play.
    AlreadyBorneOff,
    /// A checker can never be moved onto the bar directly.
    IntoBar,
    /// The move leaves the board without being a bear-off.
    OffBoard,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Blocked => "destination point is blocked",
            Self::WrongDirection => "move runs against the direction of travel",
            Self::MustEnterFromBar => "checkers on the bar must enter first",
            Self::DiceNotRolled => "dice have not been rolled",
            Self::NotOnBar => "no checker is on the bar",
            Self::NotOnBoard => "checker is not on a board point",
            Self::AlreadyBorneOff => "checker was already borne off",
            Self::IntoBar => "checkers cannot be moved onto the bar",
            Self::OffBoard => "move leaves the board without bearing off",
        };
        f.write_str(text)
    }
}

/// Why a bear-off was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BearOffRejection {
    /// The player still has checkers on the bar.
    BarOccupied,
    /// Not every checker has reached the home quadrant.
    CheckersOutsideHome,
    /// The point lies outside the player's home quadrant.
    OutsideHome,
    /// The die value falls short of the board edge.
    DieTooSmall,
    /// A checker remains farther from the edge than the die allows.
    HigherCheckerRemains,
}

impl std::fmt::Display for BearOffRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::BarOccupied => "checkers remain on the bar",
            Self::CheckersOutsideHome => "not all checkers are in the home quadrant",
            Self::OutsideHome => "the point is outside the home quadrant",
            Self::DieTooSmall => "the die value falls short of the edge",
            Self::HigherCheckerRemains => {
                "a checker remains farther from the edge than the die allows"
            }
        };
        f.write_str(text)
    }
}

/// Base error kind for every failure the engine can report.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// An illegal move: blocked destination, wrong direction, bad endpoints,
    /// or an attempt to bypass mandatory bar entry.
    #[error("invalid move from {from} to {to}: {reason}")]
    InvalidMove {
        from: Square,
        to: Square,
        reason: MoveRejection,
    },

    /// A turn action was attempted before `start()`.
    #[error("the game has not been started")]
    GameNotStarted,

    /// A mutating action was attempted after the game finished.
    #[error("the game is already finished")]
    GameAlreadyFinished,

    /// A player id outside {1, 2}.
    #[error("invalid player id: {id}")]
    InvalidPlayer { id: u8 },

    /// A die value outside [1, 6], or one not currently available.
    #[error("invalid dice value: {value}")]
    InvalidDiceValue { value: u8 },

    /// The dice were rolled but no legal move exists for any available value.
    /// Informational: the caller is expected to end the turn.
    #[error("no moves available for {player}")]
    NoMovesAvailable { player: PlayerId },

    /// A point index outside 0-23 where a concrete point is required.
    #[error("invalid board point: {index}")]
    InvalidPoint { index: i32 },

    /// The origin point holds no checker of the acting player.
    #[error("{player} has no checker available on point {point}")]
    CheckerNotAvailable { point: u8, player: PlayerId },

    /// A bear-off was attempted while its preconditions do not hold.
    #[error("{player} cannot bear off: {reason}")]
    CannotBearOff {
        player: PlayerId,
        reason: BearOffRejection,
    },

    /// `roll()` was called while unconsumed moves remain from a prior roll.
    #[error("dice were already rolled and moves remain unconsumed")]
    DiceAlreadyRolled,

    /// A player rename to an empty or whitespace-only name.
    #[error("player name must not be empty")]
    InvalidPlayerName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_move_display() {
        let err = GameError::InvalidMove {
            from: Square::Point(23),
            to: Square::Point(18),
            reason: MoveRejection::Blocked,
        };
        assert_eq!(
            err.to_string(),
            "invalid move from point 23 to point 18: destination point is blocked"
        );
    }

    #[test]
    fn test_bar_entry_display() {
        let err = GameError::InvalidMove {
            from: Square::Point(12),
            to: Square::Point(9),
            reason: MoveRejection::MustEnterFromBar,
        };
        assert!(err.to_string().contains("must enter first"));
    }

    #[test]
    fn test_cannot_bear_off_display() {
        let err = GameError::CannotBearOff {
            player: PlayerId::One,
            reason: BearOffRejection::BarOccupied,
        };
        assert_eq!(
            err.to_string(),
            "Player 1 cannot bear off: checkers remain on the bar"
        );
    }

    #[test]
    fn test_checker_not_available_display() {
        let err = GameError::CheckerNotAvailable {
            point: 4,
            player: PlayerId::Two,
        };
        assert_eq!(
            err.to_string(),
            "Player 2 has no checker available on point 4"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&GameError::GameNotStarted);
    }
}
