//! The board: 24 point stacks, two bars, two bear-off trays.
//!
//! The board owns every checker (indexed by [`CheckerId`]) and is the only
//! place checker state changes. Each operation re-validates before it
//! mutates, so a candidate move computed earlier in the turn is never
//! trusted after the occupancy has changed.
//!
//! ## Occupancy rules
//!
//! A point is **open** for a player when it is empty, holds that player's
//! own checkers, or holds exactly one opposing checker (a blot). Moving
//! onto a blot captures it: the blot goes to its owner's bar before the
//! mover lands. A point holding two or more opposing checkers is
//! **blocked**. Mixed occupancy is therefore unreachable.
//!
//! ## Stacks
//!
//! Each point keeps its checkers in arrival order; the top of the stack is
//! what moves. Order carries no rule weight but keeps capture and bear-off
//! deterministic.

use serde::{Deserialize, Serialize};

use crate::core::checker::{Checker, CheckerId};
use crate::core::moves::{Move, Square};
use crate::core::player::{PerPlayer, PlayerId};
use crate::error::{BearOffRejection, GameError, MoveRejection};

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

fn opening_layout(player: PlayerId) -> [(u8, u8); 4] {
    match player {
        PlayerId::One => [(23, 2), (12, 5), (7, 3), (5, 5)],
        PlayerId::Two => [(0, 2), (11, 5), (16, 3), (18, 5)],
    }
}

/// The playing surface: point stacks, bars, and bear-off trays.
#[derive(Clone, Debug)]
pub struct Board {
    /// Every checker in the match, indexed by `CheckerId`.
    checkers: Vec<Checker>,
    /// Point stacks in arrival order.
    points: [Vec<CheckerId>; POINT_COUNT],
    /// Captured checkers waiting to re-enter, per player.
    bars: PerPlayer<Vec<CheckerId>>,
    /// Checkers removed from play, per player.
    borne_off: PerPlayer<Vec<CheckerId>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Build a board in the standard two-player opening position.
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for player in PlayerId::BOTH {
            for (point, count) in opening_layout(player) {
                for _ in 0..count {
                    board.place_new(player, point);
                }
            }
        }
        board
    }

    fn empty() -> Self {
        Self {
            checkers: Vec::new(),
            points: std::array::from_fn(|_| Vec::new()),
            bars: PerPlayer::default(),
            borne_off: PerPlayer::default(),
        }
    }

    fn place_new(&mut self, owner: PlayerId, point: u8) -> CheckerId {
        let id = CheckerId::new(self.checkers.len() as u8);
        self.checkers.push(Checker::on_point(owner, point));
        self.points[point as usize].push(id);
        id
    }

    // === Checker store ===

    /// Look up a checker. Ids are allocated by the board and stay valid for
    /// the whole match.
    #[must_use]
    pub fn checker(&self, id: CheckerId) -> &Checker {
        &self.checkers[id.index()]
    }

    /// Ids of all checkers owned by `player`, in allocation order.
    #[must_use]
    pub fn checker_ids(&self, player: PlayerId) -> Vec<CheckerId> {
        self.checkers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.owner() == player)
            .map(|(i, _)| CheckerId::new(i as u8))
            .collect()
    }

    // === Point queries ===

    /// The checkers stacked on a point, bottom to top.
    pub fn point_checkers(&self, point: u8) -> Result<&[CheckerId], GameError> {
        validate_point(point)?;
        Ok(&self.points[point as usize])
    }

    /// The owner of a point, or `None` when it is empty.
    pub fn owner_of(&self, point: u8) -> Result<Option<PlayerId>, GameError> {
        validate_point(point)?;
        Ok(self.top_owner(point as usize))
    }

    /// Whether `player` may land on `point`: empty, own, or a lone blot.
    pub fn is_open(&self, point: u8, player: PlayerId) -> Result<bool, GameError> {
        validate_point(point)?;
        Ok(self.is_open_unchecked(point as usize, player))
    }

    fn top_owner(&self, point: usize) -> Option<PlayerId> {
        self.points[point]
            .first()
            .map(|&id| self.checkers[id.index()].owner())
    }

    fn is_open_unchecked(&self, point: usize, player: PlayerId) -> bool {
        match self.top_owner(point) {
            None => true,
            Some(owner) if owner == player => true,
            Some(_) => self.points[point].len() == 1,
        }
    }

    // === Normal moves ===

    /// Validate a single-checker move without executing it.
    pub fn validate_move(&self, from: u8, to: u8, player: PlayerId) -> Result<(), GameError> {
        validate_point(from)?;
        validate_point(to)?;

        if self.top_owner(from as usize) != Some(player) {
            return Err(GameError::CheckerNotAvailable {
                point: from,
                player,
            });
        }

        let forward = match player {
            PlayerId::One => to < from,
            PlayerId::Two => to > from,
        };
        if !forward {
            return Err(GameError::InvalidMove {
                from: Square::Point(from),
                to: Square::Point(to),
                reason: MoveRejection::WrongDirection,
            });
        }

        if !self.is_open_unchecked(to as usize, player) {
            return Err(GameError::InvalidMove {
                from: Square::Point(from),
                to: Square::Point(to),
                reason: MoveRejection::Blocked,
            });
        }

        Ok(())
    }

    /// Execute a single-checker move, capturing a lone opposing blot on the
    /// destination. Returns whether a capture occurred.
    pub fn move_checker(&mut self, from: u8, to: u8, player: PlayerId) -> Result<bool, GameError> {
        self.validate_move(from, to, player)?;

        let Some(mover) = self.points[from as usize].pop() else {
            return Err(GameError::CheckerNotAvailable {
                point: from,
                player,
            });
        };
        let captured = self.capture_blot(to as usize, player)?;
        self.checkers[mover.index()].move_to(to)?;
        self.points[to as usize].push(mover);

        Ok(captured)
    }

    fn capture_blot(&mut self, point: usize, player: PlayerId) -> Result<bool, GameError> {
        if self.points[point].len() != 1 {
            return Ok(false);
        }
        let blot_owner = match self.top_owner(point) {
            Some(owner) if owner != player => owner,
            _ => return Ok(false),
        };
        if let Some(blot) = self.points[point].pop() {
            self.checkers[blot.index()].send_to_bar()?;
            self.bars[blot_owner].push(blot);
            return Ok(true);
        }
        Ok(false)
    }

    // === Bar ===

    /// Whether `player` has checkers waiting on the bar.
    #[must_use]
    pub fn has_checkers_on_bar(&self, player: PlayerId) -> bool {
        !self.bars[player].is_empty()
    }

    /// Count of `player` checkers on the bar.
    #[must_use]
    pub fn bar_count(&self, player: PlayerId) -> usize {
        self.bars[player].len()
    }

    /// Whether `player` could re-enter from the bar with `die`.
    #[must_use]
    pub fn can_enter_from_bar(&self, player: PlayerId, die: u8) -> bool {
        (1..=6).contains(&die)
            && self.has_checkers_on_bar(player)
            && self.is_open_unchecked(player.entry_point(die) as usize, player)
    }

    /// Re-enter a checker from the bar. The die value maps to one entry
    /// point in the player's entry quadrant; a lone opposing blot there is
    /// captured. Returns the entry point and whether a capture occurred.
    pub fn enter_from_bar(&mut self, player: PlayerId, die: u8) -> Result<(u8, bool), GameError> {
        if !(1..=6).contains(&die) {
            return Err(GameError::InvalidDiceValue { value: die });
        }
        let entry = player.entry_point(die);

        if !self.is_open_unchecked(entry as usize, player) {
            return Err(GameError::InvalidMove {
                from: Square::Bar,
                to: Square::Point(entry),
                reason: MoveRejection::Blocked,
            });
        }
        let Some(id) = self.bars[player].pop() else {
            return Err(GameError::InvalidMove {
                from: Square::Bar,
                to: Square::Point(entry),
                reason: MoveRejection::NotOnBar,
            });
        };

        let captured = self.capture_blot(entry as usize, player)?;
        self.checkers[id.index()].enter_board(entry)?;
        self.points[entry as usize].push(id);

        Ok((entry, captured))
    }

    // === Bear-off ===

    /// Count of `player` checkers borne off.
    #[must_use]
    pub fn borne_off_count(&self, player: PlayerId) -> usize {
        self.borne_off[player].len()
    }

    /// Bear-off eligibility: no checkers on the bar and every remaining
    /// checker inside the home quadrant.
    #[must_use]
    pub fn can_bear_off(&self, player: PlayerId) -> bool {
        if self.has_checkers_on_bar(player) {
            return false;
        }
        self.checkers
            .iter()
            .filter(|c| c.owner() == player)
            .all(|c| c.is_borne_off() || c.is_in_home_board())
    }

    /// Validate a bear-off from `point` using `die` without executing it.
    ///
    /// The exact distance always works. A larger die works only when no
    /// checker sits farther from the edge than `point`.
    pub fn validate_bear_off(&self, point: u8, player: PlayerId, die: u8) -> Result<(), GameError> {
        validate_point(point)?;
        if !(1..=6).contains(&die) {
            return Err(GameError::InvalidDiceValue { value: die });
        }
        if self.has_checkers_on_bar(player) {
            return Err(GameError::CannotBearOff {
                player,
                reason: BearOffRejection::BarOccupied,
            });
        }
        if !self.can_bear_off(player) {
            return Err(GameError::CannotBearOff {
                player,
                reason: BearOffRejection::CheckersOutsideHome,
            });
        }
        if !player.home_range().contains(&point) {
            return Err(GameError::CannotBearOff {
                player,
                reason: BearOffRejection::OutsideHome,
            });
        }
        if self.top_owner(point as usize) != Some(player) {
            return Err(GameError::CheckerNotAvailable { point, player });
        }

        let required = player.bear_off_distance(point);
        if die == required {
            Ok(())
        } else if die > required {
            if self.has_checker_farther(player, point) {
                Err(GameError::CannotBearOff {
                    player,
                    reason: BearOffRejection::HigherCheckerRemains,
                })
            } else {
                Ok(())
            }
        } else {
            Err(GameError::CannotBearOff {
                player,
                reason: BearOffRejection::DieTooSmall,
            })
        }
    }

    /// Whether a bear-off from `point` using `die` would be legal.
    #[must_use]
    pub fn can_bear_off_from(&self, point: u8, player: PlayerId, die: u8) -> bool {
        self.validate_bear_off(point, player, die).is_ok()
    }

    /// Bear the top checker off `point` into the player's tray.
    pub fn bear_off(&mut self, point: u8, player: PlayerId, die: u8) -> Result<(), GameError> {
        self.validate_bear_off(point, player, die)?;

        let Some(id) = self.points[point as usize].pop() else {
            return Err(GameError::CheckerNotAvailable { point, player });
        };
        self.checkers[id.index()].bear_off()?;
        self.borne_off[player].push(id);

        Ok(())
    }

    fn has_checker_farther(&self, player: PlayerId, from: u8) -> bool {
        let search: std::ops::Range<u8> = match player {
            PlayerId::One => from + 1..6,
            PlayerId::Two => 18..from,
        };
        search
            .into_iter()
            .any(|p| self.top_owner(p as usize) == Some(player))
    }

    /// Whether `player` has borne off all 15 checkers.
    #[must_use]
    pub fn has_won(&self, player: PlayerId) -> bool {
        self.borne_off[player].len() == crate::core::player::CHECKERS_PER_PLAYER
    }

    // === Enumeration ===

    /// The single candidate destination for `from` and `die`, applying the
    /// player's direction of travel: a target point for a normal move,
    /// `Off` for a legal bear-off. `None` when the origin holds no checker
    /// of `player`, the target is blocked, or the move would run off the
    /// board without bearing off.
    #[must_use]
    pub fn legal_destination(&self, from: u8, player: PlayerId, die: u8) -> Option<Square> {
        if from as usize >= POINT_COUNT || !(1..=6).contains(&die) {
            return None;
        }
        if self.top_owner(from as usize) != Some(player) {
            return None;
        }
        if let Some(target) = player.destination_from(from, die) {
            if self.is_open_unchecked(target as usize, player) {
                return Some(Square::Point(target));
            }
            return None;
        }
        if self.can_bear_off_from(from, player, die) {
            return Some(Square::Off);
        }
        None
    }

    /// Every legal move for `player` using a single `die` value.
    ///
    /// While the player has checkers on the bar only bar entry is offered;
    /// otherwise normal moves and bear-offs over all origin points.
    #[must_use]
    pub fn legal_moves_for_die(&self, player: PlayerId, die: u8) -> Vec<Move> {
        let mut moves = Vec::new();
        if !(1..=6).contains(&die) {
            return moves;
        }

        if self.has_checkers_on_bar(player) {
            let entry = player.entry_point(die);
            if self.is_open_unchecked(entry as usize, player) {
                moves.push(Move::new(Square::Bar, Square::Point(entry), die));
            }
            return moves;
        }

        for point in 0..POINT_COUNT as u8 {
            if let Some(to) = self.legal_destination(point, player, die) {
                moves.push(Move::new(Square::Point(point), to, die));
            }
        }

        moves
    }

    // === Snapshot ===

    /// Aggregate view of the board for status queries.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            points: std::array::from_fn(|i| PointSnapshot {
                owner: self.top_owner(i),
                count: self.points[i].len() as u8,
            }),
            bar: PerPlayer::from_fn(|p| self.bars[p].len() as u8),
            borne_off: PerPlayer::from_fn(|p| self.borne_off[p].len() as u8),
        }
    }

    // === Test support ===

    /// Build an arbitrary position. Counts per player must sum to 15.
    #[cfg(test)]
    pub(crate) fn from_layout(
        one: &[(u8, u8)],
        one_bar: usize,
        one_off: usize,
        two: &[(u8, u8)],
        two_bar: usize,
        two_off: usize,
    ) -> Self {
        let mut board = Self::empty();
        let specs = [
            (PlayerId::One, one, one_bar, one_off),
            (PlayerId::Two, two, two_bar, two_off),
        ];
        for (player, points, bar, off) in specs {
            let mut placed = 0usize;
            for &(point, count) in points {
                for _ in 0..count {
                    board.place_new(player, point);
                    placed += 1;
                }
            }
            let staging = *player.home_range().start();
            for _ in 0..bar {
                let id = board.place_new(player, staging);
                board.points[staging as usize].pop();
                board.checkers[id.index()].send_to_bar().unwrap();
                board.bars[player].push(id);
                placed += 1;
            }
            for _ in 0..off {
                let id = board.place_new(player, staging);
                board.points[staging as usize].pop();
                board.checkers[id.index()].bear_off().unwrap();
                board.borne_off[player].push(id);
                placed += 1;
            }
            assert_eq!(placed, 15, "{player} layout must total 15 checkers");
        }
        board
    }
}

fn validate_point(point: u8) -> Result<(), GameError> {
    if point as usize >= POINT_COUNT {
        return Err(GameError::InvalidPoint {
            index: i32::from(point),
        });
    }
    Ok(())
}

/// One point of a [`BoardSnapshot`]: owner and stack height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSnapshot {
    pub owner: Option<PlayerId>,
    pub count: u8,
}

/// Full board state for the external status surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub points: [PointSnapshot; POINT_COUNT],
    pub bar: PerPlayer<u8>,
    pub borne_off: PerPlayer<u8>,
}
