//! Game coordinator: the turn state machine and the only external API.
//!
//! ## Lifecycle
//!
//! `NOT_STARTED -> IN_PROGRESS -> FINISHED` (terminal). One `Game` instance
//! per match; a new match constructs a new game.
//!
//! ## Per-turn protocol
//!
//! 1. [`Game::roll_dice`] populates the move budget.
//! 2. [`Game::valid_moves`] enumerates every legal `(from, to)` pair for the
//!    available die values, bar entry first when it is mandatory.
//! 3. [`Game::make_move`] re-validates, executes through the board, consumes
//!    the die value, appends to the history, and checks for a win.
//! 4. The turn ends automatically once the budget is empty or none of the
//!    remaining values has a legal use; [`Game::end_turn`] ends it
//!    explicitly, forfeiting unused values.
//!
//! A roll that leaves no legal move at all is surfaced as
//! [`GameError::NoMovesAvailable`] when a move is attempted; the caller is
//! expected to end the turn.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardSnapshot};
use crate::core::dice::Dice;
use crate::core::moves::{Move, MoveOutcome, MoveRecord, Square};
use crate::core::player::{PerPlayer, Player, PlayerId, PlayerSummary};
use crate::core::rng::DiceRng;
use crate::error::{GameError, MoveRejection};

/// Lifecycle state of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Finished,
}

/// Builder for a [`Game`].
///
/// ```
/// use backgammon_engine::game::GameBuilder;
///
/// let game = GameBuilder::new()
///     .player_names("Ada", "Grace")
///     .build(42);
/// assert_eq!(game.player_by_number(1).unwrap().name(), "Ada");
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    player1_name: String,
    player2_name: String,
    rng: Option<DiceRng>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            rng: None,
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both display names.
    pub fn player_names(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.player1_name = one.into();
        self.player2_name = two.into();
        self
    }

    /// Inject a dice randomness source, overriding the build seed.
    pub fn rng(mut self, rng: DiceRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Build the game. `seed` feeds the default seeded source; an injected
    /// [`DiceRng`] takes precedence.
    #[must_use]
    pub fn build(self, seed: u64) -> Game {
        let board = Board::standard();
        let players = PerPlayer::new(
            Player::new(PlayerId::One, self.player1_name, board.checker_ids(PlayerId::One)),
            Player::new(PlayerId::Two, self.player2_name, board.checker_ids(PlayerId::Two)),
        );
        let rng = self.rng.unwrap_or_else(|| DiceRng::seeded(seed));

        Game {
            board,
            players,
            dice: Dice::new(rng),
            state: GameState::NotStarted,
            current: PlayerId::One,
            winner: None,
            turn_count: 0,
            history: Vector::new(),
        }
    }
}

/// A match of standard two-player Backgammon.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    players: PerPlayer<Player>,
    dice: Dice,
    state: GameState,
    current: PlayerId,
    winner: Option<PlayerId>,
    turn_count: u32,
    history: Vector<MoveRecord>,
}

impl Game {
    /// New game with default names and a seeded dice source.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        GameBuilder::new().build(seed)
    }

    // === Lifecycle ===

    /// Start the match: player 1 opens turn 1.
    ///
    /// Fails unless the game has never been started.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::GameAlreadyFinished);
        }
        self.state = GameState::InProgress;
        self.turn_count = 1;
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.state {
            GameState::NotStarted => Err(GameError::GameNotStarted),
            GameState::Finished => Err(GameError::GameAlreadyFinished),
            GameState::InProgress => Ok(()),
        }
    }

    // === Turn actions ===

    /// Roll the dice for the current player.
    ///
    /// Fails before `start()`, after the match finished, or while unused
    /// moves remain from this turn's roll.
    pub fn roll_dice(&mut self) -> Result<(u8, u8), GameError> {
        self.ensure_in_progress()?;
        self.dice.roll()
    }

    /// Lazily enumerate every legal move for the current player and the
    /// currently available die values. Restartable: each call walks the
    /// live position afresh.
    pub fn valid_moves(&self) -> impl Iterator<Item = Move> + '_ {
        let player = self.current;
        self.dice
            .distinct_available()
            .into_iter()
            .flat_map(move |die| self.board.legal_moves_for_die(player, die))
    }

    /// Whether the current player has any legal move for the remaining
    /// budget.
    #[must_use]
    pub fn has_legal_moves(&self) -> bool {
        self.valid_moves().next().is_some()
    }

    /// Execute one move for the current player.
    ///
    /// The die value is derived from the endpoints; bear-offs prefer the
    /// exact distance and fall back to the smallest larger available value.
    /// On success the value is consumed, the move is appended to the
    /// history, and the turn ends automatically when nothing remains to
    /// play. Bearing off the 15th checker finishes the match irrevocably.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, GameError> {
        self.ensure_in_progress()?;

        if !self.dice.is_rolled() {
            return Err(GameError::InvalidMove {
                from,
                to,
                reason: MoveRejection::DiceNotRolled,
            });
        }
        if !self.has_legal_moves() {
            return Err(GameError::NoMovesAvailable {
                player: self.current,
            });
        }
        if self.board.has_checkers_on_bar(self.current) && from != Square::Bar {
            return Err(GameError::InvalidMove {
                from,
                to,
                reason: MoveRejection::MustEnterFromBar,
            });
        }

        let player = self.current;
        let die = self.die_for(from, to)?;

        let captured = match (from, to) {
            (Square::Bar, Square::Point(_)) => {
                let (_, captured) = self.board.enter_from_bar(player, die)?;
                captured
            }
            (Square::Point(f), Square::Point(t)) => self.board.move_checker(f, t, player)?,
            (Square::Point(f), Square::Off) => {
                self.board.bear_off(f, player, die)?;
                false
            }
            // die_for already rejected every other combination
            _ => {
                return Err(GameError::InvalidMove {
                    from,
                    to,
                    reason: MoveRejection::OffBoard,
                })
            }
        };

        self.dice.consume(die)?;
        self.history
            .push_back(MoveRecord::new(self.turn_count, player, from, to, die, captured));

        if self.board.has_won(player) {
            self.state = GameState::Finished;
            self.winner = Some(player);
            self.dice.reset();
            return Ok(MoveOutcome {
                captured,
                turn_ended: true,
            });
        }

        let turn_ended = !self.dice.has_moves_left() || !self.has_legal_moves();
        if turn_ended {
            self.advance_turn();
        }

        Ok(MoveOutcome {
            captured,
            turn_ended,
        })
    }

    /// End the current turn explicitly, forfeiting any unused die values.
    pub fn end_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        self.advance_turn();
        Ok(())
    }

    fn advance_turn(&mut self) {
        self.dice.reset();
        self.current = self.current.opponent();
        self.turn_count += 1;
    }

    /// Derive the die value a `(from, to)` pair consumes for the current
    /// player, checking availability.
    fn die_for(&self, from: Square, to: Square) -> Result<u8, GameError> {
        let player = self.current;
        match (from, to) {
            (Square::Point(f), Square::Point(t)) => {
                validate_endpoint(f)?;
                validate_endpoint(t)?;
                let distance = match player {
                    PlayerId::One => i16::from(f) - i16::from(t),
                    PlayerId::Two => i16::from(t) - i16::from(f),
                };
                if distance <= 0 {
                    return Err(GameError::InvalidMove {
                        from,
                        to,
                        reason: MoveRejection::WrongDirection,
                    });
                }
                let value = distance as u8;
                if value > 6 || !self.dice.can_use(value) {
                    return Err(GameError::InvalidDiceValue { value });
                }
                Ok(value)
            }
            (Square::Bar, Square::Point(t)) => {
                validate_endpoint(t)?;
                let value = match player {
                    PlayerId::One => 24 - t,
                    PlayerId::Two => t + 1,
                };
                if !(1..=6).contains(&value) || !self.dice.can_use(value) {
                    return Err(GameError::InvalidDiceValue { value });
                }
                Ok(value)
            }
            (Square::Point(f), Square::Off) => {
                validate_endpoint(f)?;
                let required = player.bear_off_distance(f);
                if self.dice.can_use(required) {
                    return Ok(required);
                }
                // Overage: the smallest available value past the edge.
                self.dice
                    .available_moves()
                    .iter()
                    .copied()
                    .filter(|&v| v > required)
                    .min()
                    .ok_or(GameError::InvalidDiceValue { value: required })
            }
            (Square::Off, _) => Err(GameError::InvalidMove {
                from,
                to,
                reason: MoveRejection::AlreadyBorneOff,
            }),
            (_, Square::Bar) => Err(GameError::InvalidMove {
                from,
                to,
                reason: MoveRejection::IntoBar,
            }),
            (Square::Bar, Square::Off) => Err(GameError::InvalidMove {
                from,
                to,
                reason: MoveRejection::OffBoard,
            }),
        }
    }

    // === Status queries ===

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    /// The player whose turn it is. Meaningful only while IN_PROGRESS.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Turn number, starting at 1 when the match starts.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// The winner, once the match has finished.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// A player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Mutable access to a player (renaming).
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// A player by external numeric id (1 or 2).
    pub fn player_by_number(&self, id: u8) -> Result<&Player, GameError> {
        Ok(self.player(PlayerId::from_number(id)?))
    }

    /// The dice and the remaining move budget.
    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The executed moves, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &MoveRecord> {
        self.history.iter()
    }

    /// The most recently executed move.
    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Aggregate snapshot of the whole match for front-ends.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        GameStatus {
            state: self.state,
            current_player: self.current,
            turn_count: self.turn_count,
            dice: self.dice.is_rolled().then(|| self.dice.values()),
            available_moves: self.dice.available_moves().to_vec(),
            board: self.board.snapshot(),
            players: PerPlayer::from_fn(|p| self.players[p].summary(&self.board)),
            winner: self.winner,
        }
    }
}

fn validate_endpoint(point: u8) -> Result<(), GameError> {
    if point > 23 {
        return Err(GameError::InvalidPoint {
            index: i32::from(point),
        });
    }
    Ok(())
}

/// Serializable snapshot of the match for the external status surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub state: GameState,
    pub current_player: PlayerId,
    pub turn_count: u32,
    /// Face values of this turn's roll, if rolled.
    pub dice: Option<(u8, u8)>,
    /// Die values still usable this turn.
    pub available_moves: Vec<u8>,
    pub board: BoardSnapshot,
    pub players: PerPlayer<PlayerSummary>,
    pub winner: Option<PlayerId>,
}
