//! Player identity, per-player data storage, and aggregate checker queries.
//!
//! ## PlayerId
//!
//! Closed two-variant identifier. The movement conventions of standard
//! Backgammon hang off it: direction of travel, home and entry quadrants,
//! bar-entry targets, and bear-off distances. Player 1 travels toward
//! decreasing point indices, player 2 toward increasing ones.
//!
//! ## PerPlayer
//!
//! Two-slot per-player storage indexable by `PlayerId`.
//!
//! ## Player
//!
//! Owns a fixed set of 15 checkers (by id) and exposes aggregate queries.
//! Checker state itself lives in the [`Board`](crate::board::Board); every
//! mutation flows through it, so the queries here borrow the board.

use std::ops::{Index, IndexMut, RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::checker::CheckerId;
use crate::error::GameError;

/// Number of checkers each player owns for the whole match.
pub const CHECKERS_PER_PLAYER: usize = 15;

/// Player identifier for a two-player match.
///
/// Numbered 1 and 2 at the external surface; see [`PlayerId::number`] and
/// [`PlayerId::from_number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Both players, in turn order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// External numeric id: 1 or 2.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Parse an external numeric id.
    pub const fn from_number(id: u8) -> Result<Self, GameError> {
        match id {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(GameError::InvalidPlayer { id }),
        }
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Home quadrant: the six points nearest this player's bear-off edge.
    #[must_use]
    pub const fn home_range(self) -> RangeInclusive<u8> {
        match self {
            Self::One => 0..=5,
            Self::Two => 18..=23,
        }
    }

    /// Entry quadrant for re-entering from the bar (the opponent's home).
    #[must_use]
    pub const fn entry_range(self) -> RangeInclusive<u8> {
        match self {
            Self::One => 18..=23,
            Self::Two => 0..=5,
        }
    }

    /// Entry point from the bar for a die value in [1, 6].
    #[must_use]
    pub const fn entry_point(self, die: u8) -> u8 {
        match self {
            Self::One => 24 - die,
            Self::Two => die - 1,
        }
    }

    /// Exact die value needed to bear a checker off from `point`.
    #[must_use]
    pub const fn bear_off_distance(self, point: u8) -> u8 {
        match self {
            Self::One => point + 1,
            Self::Two => 24 - point,
        }
    }

    /// Destination point for moving `die` pips from `point`, or `None` when
    /// the move would leave the board.
    #[must_use]
    pub const fn destination_from(self, point: u8, die: u8) -> Option<u8> {
        match self {
            Self::One => {
                if point >= die {
                    Some(point - die)
                } else {
                    None
                }
            }
            Self::Two => {
                if point + die <= 23 {
                    Some(point + die)
                } else {
                    None
                }
            }
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-player data storage with O(1) access, indexable by `PlayerId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    one: T,
    two: T,
}

impl<T> PerPlayer<T> {
    /// Create with explicit values for both players.
    pub fn new(one: T, two: T) -> Self {
        Self { one, two }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            one: factory(PlayerId::One),
            two: factory(PlayerId::Two),
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        match player {
            PlayerId::One => &self.one,
            PlayerId::Two => &self.two,
        }
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        match player {
            PlayerId::One => &mut self.one,
            PlayerId::Two => &mut self.two,
        }
    }

    /// Iterate over (PlayerId, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::BOTH.into_iter().map(move |p| (p, self.get(p)))
    }
}

impl<T> Index<PlayerId> for PerPlayer<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PerPlayer<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player: immutable id, mutable display name, and the ids of the 15
/// checkers owned for the whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    checkers: Vec<CheckerId>,
}

impl Player {
    /// Create a player owning the given checkers.
    pub fn new(id: PlayerId, name: impl Into<String>, checkers: Vec<CheckerId>) -> Self {
        Self {
            id,
            name: name.into(),
            checkers,
        }
    }

    /// Player identity.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the player. The name must contain non-whitespace characters.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), GameError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(GameError::InvalidPlayerName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    /// Ids of the owned checkers.
    #[must_use]
    pub fn checkers(&self) -> &[CheckerId] {
        &self.checkers
    }

    /// Count of owned checkers currently on the bar.
    #[must_use]
    pub fn checkers_on_bar(&self, board: &Board) -> usize {
        self.checkers
            .iter()
            .filter(|&&id| board.checker(id).is_on_bar())
            .count()
    }

    /// Count of owned checkers borne off.
    #[must_use]
    pub fn checkers_borne_off(&self, board: &Board) -> usize {
        self.checkers
            .iter()
            .filter(|&&id| board.checker(id).is_borne_off())
            .count()
    }

    /// Count of owned checkers still on board points.
    #[must_use]
    pub fn checkers_on_board(&self, board: &Board) -> usize {
        self.checkers
            .iter()
            .filter(|&&id| board.checker(id).point().is_some())
            .count()
    }

    /// Whether any owned checker sits on the bar.
    #[must_use]
    pub fn has_checkers_on_bar(&self, board: &Board) -> bool {
        self.checkers_on_bar(board) > 0
    }

    /// Bear-off eligibility: every owned checker is borne off or on a point
    /// inside the home quadrant, and none is on the bar.
    #[must_use]
    pub fn can_bear_off(&self, board: &Board) -> bool {
        self.checkers.iter().all(|&id| {
            let checker = board.checker(id);
            checker.is_borne_off() || checker.is_in_home_board()
        })
    }

    /// Owned checkers currently on `point`.
    #[must_use]
    pub fn checkers_at(&self, board: &Board, point: u8) -> Vec<CheckerId> {
        self.checkers
            .iter()
            .copied()
            .filter(|&id| board.checker(id).point() == Some(point))
            .collect()
    }

    /// Whether all 15 checkers have been borne off.
    #[must_use]
    pub fn has_won(&self, board: &Board) -> bool {
        self.checkers_borne_off(board) == CHECKERS_PER_PLAYER
    }

    /// Aggregate summary for the status surface.
    #[must_use]
    pub fn summary(&self, board: &Board) -> PlayerSummary {
        PlayerSummary {
            id: self.id,
            name: self.name.clone(),
            on_board: self.checkers_on_board(board) as u8,
            on_bar: self.checkers_on_bar(board) as u8,
            borne_off: self.checkers_borne_off(board) as u8,
            can_bear_off: self.can_bear_off(board),
        }
    }
}

/// Snapshot of one player's aggregate state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub on_board: u8,
    pub on_bar: u8,
    pub borne_off: u8,
    pub can_bear_off: bool,
}
