//! Core entities: checkers, dice, players, moves, and the dice RNG.
//!
//! These are the leaf building blocks. The [`Board`](crate::board::Board)
//! composes them into the validated playing surface and the
//! [`Game`](crate::game::Game) coordinator drives the turn state machine.

pub mod checker;
pub mod dice;
pub mod moves;
pub mod player;
pub mod rng;

pub use checker::{Checker, CheckerId, CheckerLocation};
pub use dice::Dice;
pub use moves::{Move, MoveOutcome, MoveRecord, Square};
pub use player::{PerPlayer, Player, PlayerId, PlayerSummary, CHECKERS_PER_PLAYER};
pub use rng::DiceRng;
