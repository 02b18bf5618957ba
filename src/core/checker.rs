//! A single game piece: owner plus a closed location state.
//!
//! A checker is created once at setup and never destroyed; bearing off is a
//! terminal state, not a deletion. Transitions only accept the permitted
//! source variants, so invalid combinations (a borne-off checker re-entering
//! play, a bar checker sliding along points) are unrepresentable at runtime.

use serde::{Deserialize, Serialize};

use crate::core::moves::Square;
use crate::core::player::PlayerId;
use crate::error::{BearOffRejection, GameError, MoveRejection};

/// Dense index of a checker in the board's checker store.
///
/// Ids 0-14 belong to player 1, 15-29 to player 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckerId(pub u8);

impl CheckerId {
    /// Create a checker id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw index into the checker store.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CheckerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Checker({})", self.0)
    }
}

/// Where a checker currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckerLocation {
    /// On a board point, index 0-23.
    OnPoint(u8),
    /// Captured, waiting to re-enter.
    OnBar,
    /// Removed from play. Terminal.
    BorneOff,
}

/// A single checker: immutable owner, validated location transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checker {
    owner: PlayerId,
    location: CheckerLocation,
}

impl Checker {
    /// Create a checker sitting on a board point.
    #[must_use]
    pub const fn on_point(owner: PlayerId, point: u8) -> Self {
        Self {
            owner,
            location: CheckerLocation::OnPoint(point),
        }
    }

    /// Owning player. Never changes.
    #[must_use]
    pub const fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Current location.
    #[must_use]
    pub const fn location(&self) -> CheckerLocation {
        self.location
    }

    /// The point this checker sits on, if it is on one.
    #[must_use]
    pub const fn point(&self) -> Option<u8> {
        match self.location {
            CheckerLocation::OnPoint(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the checker is on the bar.
    #[must_use]
    pub const fn is_on_bar(&self) -> bool {
        matches!(self.location, CheckerLocation::OnBar)
    }

    /// Whether the checker has been borne off.
    #[must_use]
    pub const fn is_borne_off(&self) -> bool {
        matches!(self.location, CheckerLocation::BorneOff)
    }

    /// Whether the checker can still take part in play.
    #[must_use]
    pub const fn is_movable(&self) -> bool {
        !self.is_borne_off()
    }

    /// Whether the checker sits inside its owner's home quadrant.
    #[must_use]
    pub fn is_in_home_board(&self) -> bool {
        match self.point() {
            Some(p) => self.owner.home_range().contains(&p),
            None => false,
        }
    }

    /// The square this checker occupies, for error reporting.
    #[must_use]
    pub const fn square(&self) -> Square {
        match self.location {
            CheckerLocation::OnPoint(p) => Square::Point(p),
            CheckerLocation::OnBar => Square::Bar,
            CheckerLocation::BorneOff => Square::Off,
        }
    }

    /// Slide to another point. Requires the checker to be on a point.
    pub fn move_to(&mut self, point: u8) -> Result<(), GameError> {
        validate_point(point)?;
        match self.location {
            CheckerLocation::OnPoint(_) => {
                self.location = CheckerLocation::OnPoint(point);
                Ok(())
            }
            CheckerLocation::OnBar => Err(GameError::InvalidMove {
                from: Square::Bar,
                to: Square::Point(point),
                reason: MoveRejection::NotOnBoard,
            }),
            CheckerLocation::BorneOff => Err(GameError::InvalidMove {
                from: Square::Off,
                to: Square::Point(point),
                reason: MoveRejection::AlreadyBorneOff,
            }),
        }
    }

    /// Capture: send the checker to the bar. Requires it to be on a point.
    pub fn send_to_bar(&mut self) -> Result<(), GameError> {
        match self.location {
            CheckerLocation::OnPoint(_) => {
                self.location = CheckerLocation::OnBar;
                Ok(())
            }
            _ => Err(GameError::InvalidMove {
                from: self.square(),
                to: Square::Bar,
                reason: MoveRejection::NotOnBoard,
            }),
        }
    }

    /// Re-enter from the bar onto `point`.
    pub fn enter_board(&mut self, point: u8) -> Result<(), GameError> {
        validate_point(point)?;
        match self.location {
            CheckerLocation::OnBar => {
                self.location = CheckerLocation::OnPoint(point);
                Ok(())
            }
            _ => Err(GameError::InvalidMove {
                from: self.square(),
                to: Square::Point(point),
                reason: MoveRejection::NotOnBar,
            }),
        }
    }

    /// Bear the checker off. Requires it to sit on a point inside its
    /// owner's home quadrant.
    pub fn bear_off(&mut self) -> Result<(), GameError> {
        if self.is_borne_off() {
            return Err(GameError::InvalidMove {
                from: Square::Off,
                to: Square::Off,
                reason: MoveRejection::AlreadyBorneOff,
            });
        }
        if !self.is_in_home_board() {
            let reason = if self.is_on_bar() {
                BearOffRejection::BarOccupied
            } else {
                BearOffRejection::OutsideHome
            };
            return Err(GameError::CannotBearOff {
                player: self.owner,
                reason,
            });
        }
        self.location = CheckerLocation::BorneOff;
        Ok(())
    }
}

fn validate_point(point: u8) -> Result<(), GameError> {
    if point > 23 {
        return Err(GameError::InvalidPoint {
            index: i32::from(point),
        });
    }
    Ok(())
}
