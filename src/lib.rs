//! # backgammon-engine
//!
//! A rules engine for standard two-player Backgammon. The engine owns the
//! authoritative game state and enforces every legal-move, capture,
//! bar-re-entry, bear-off, and turn-transition rule; front-ends interact
//! with it only through move enumeration, move execution, and status
//! queries.
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: all checker state lives in the
//!    [`Board`](board::Board); every mutation flows through its validated
//!    operations and is re-checked at execution time.
//!
//! 2. **Closed state spaces**: checker locations, players, and the match
//!    lifecycle are tagged variants with transition functions that only
//!    accept the permitted sources, so invalid combinations are
//!    unreachable by construction.
//!
//! 3. **Injected randomness**: the dice draw from a
//!    [`DiceRng`](core::DiceRng) passed in at construction - seeded for
//!    replayable matches, scripted for tests. Nothing reads a global
//!    generator.
//!
//! 4. **Synchronous and single-threaded**: every call is a pure in-memory
//!    state transition that completes or fails with a typed
//!    [`GameError`](error::GameError) before returning.
//!
//! ## Modules
//!
//! - `core`: checkers, dice, players, moves, dice RNG
//! - `board`: the 24 points, bars, bear-off trays, and move validation
//! - `game`: the turn state machine and the external API
//! - `error`: the error taxonomy
//!
//! ## Example
//!
//! ```
//! use backgammon_engine::{Game, Square};
//!
//! let mut game = Game::new(42);
//! game.start().unwrap();
//!
//! let (a, b) = game.roll_dice().unwrap();
//! assert!((1..=6).contains(&a) && (1..=6).contains(&b));
//!
//! let candidate = game.valid_moves().next();
//! if let Some(candidate) = candidate {
//!     let outcome = game.make_move(candidate.from, candidate.to).unwrap();
//!     assert_eq!(outcome.captured, game.last_move().unwrap().captured);
//! }
//! # let _ = Square::Bar;
//! ```

pub mod board;
pub mod core;
pub mod error;
pub mod game;

// Re-export the public surface
pub use crate::core::{
    Checker, CheckerId, CheckerLocation, Dice, DiceRng, Move, MoveOutcome, MoveRecord, PerPlayer,
    Player, PlayerId, PlayerSummary, Square, CHECKERS_PER_PLAYER,
};

pub use crate::board::{Board, BoardSnapshot, PointSnapshot, POINT_COUNT};

pub use crate::error::{BearOffRejection, GameError, MoveRejection};

pub use crate::game::{Game, GameBuilder, GameState, GameStatus};
