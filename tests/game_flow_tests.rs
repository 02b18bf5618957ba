//! End-to-end turn protocol tests over the public API.
//!
//! Dice are scripted with `DiceRng::fixed`, so every sequence here is a
//! deterministic replay from the standard opening position.

use backgammon_engine::{
    DiceRng, Game, GameBuilder, GameError, GameState, MoveRejection, PlayerId, Square,
};

fn scripted(faces: &[u8]) -> Game {
    let mut game = GameBuilder::new().rng(DiceRng::fixed(faces)).build(0);
    game.start().unwrap();
    game
}

/// Checker conservation over the public status surface.
fn assert_conservation(game: &Game) {
    let status = game.status();
    for player in PlayerId::BOTH {
        let on_points: u32 = status
            .board
            .points
            .iter()
            .filter(|p| p.owner == Some(player))
            .map(|p| u32::from(p.count))
            .sum();
        let total = on_points
            + u32::from(status.board.bar[player])
            + u32::from(status.board.borne_off[player]);
        assert_eq!(total, 15, "{player} lost or gained checkers");
    }
}

#[test]
fn test_full_first_turn_with_roll_3_5() {
    let mut game = scripted(&[3, 5]);

    assert_eq!(game.roll_dice().unwrap(), (3, 5));
    let moves: Vec<_> = game.valid_moves().collect();
    assert_eq!(moves.len(), 6);

    // Enumeration and execution agree: every candidate runs cleanly on a
    // clone of the game.
    for candidate in &moves {
        let mut probe = game.clone();
        probe
            .make_move(candidate.from, candidate.to)
            .unwrap_or_else(|e| panic!("enumerated move {candidate} rejected: {e}"));
    }

    game.make_move(Square::Point(23), Square::Point(20)).unwrap();
    assert_eq!(game.dice().available_moves(), &[5]);

    let outcome = game.make_move(Square::Point(12), Square::Point(7)).unwrap();
    assert!(outcome.turn_ended);
    assert_eq!(game.current_player(), PlayerId::Two);
    assert_conservation(&game);
}

#[test]
fn test_capture_and_mandatory_reentry() {
    // Rolls cycle (1,2), (4,6), (1,2), ...
    let mut game = scripted(&[1, 2, 4, 6]);

    // Turn 1: player 1 walks a back checker to point 20, leaving a blot.
    game.roll_dice().unwrap();
    game.make_move(Square::Point(23), Square::Point(22)).unwrap();
    let outcome = game.make_move(Square::Point(22), Square::Point(20)).unwrap();
    assert!(outcome.turn_ended);
    assert_eq!(game.current_player(), PlayerId::Two);

    // Turn 2: player 2 rolls (4,6) and hits the blot from 16.
    game.roll_dice().unwrap();
    let outcome = game.make_move(Square::Point(16), Square::Point(20)).unwrap();
    assert!(outcome.captured);
    assert!(game.last_move().unwrap().captured);
    assert_eq!(game.board().bar_count(PlayerId::One), 1);
    assert_conservation(&game);

    game.make_move(Square::Point(11), Square::Point(17)).unwrap();
    assert_eq!(game.current_player(), PlayerId::One);

    // Turn 3: player 1 must enter from the bar before anything else.
    game.roll_dice().unwrap();
    let err = game
        .make_move(Square::Point(12), Square::Point(11))
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::InvalidMove {
            reason: MoveRejection::MustEnterFromBar,
            ..
        }
    ));

    // Die 1 enters on point 23, already held by player 1's own checker.
    game.make_move(Square::Bar, Square::Point(23)).unwrap();
    assert_eq!(game.board().bar_count(PlayerId::One), 0);
    assert_conservation(&game);
}

#[test]
fn test_roll_guards() {
    let mut game = scripted(&[3, 5]);

    game.roll_dice().unwrap();
    assert_eq!(game.roll_dice(), Err(GameError::DiceAlreadyRolled));

    // After consuming the whole budget the next turn may roll again.
    game.make_move(Square::Point(23), Square::Point(20)).unwrap();
    game.make_move(Square::Point(12), Square::Point(7)).unwrap();
    assert!(game.roll_dice().is_ok());
}

#[test]
fn test_explicit_end_turn_forfeits_remaining_values() {
    let mut game = scripted(&[6, 2]);

    game.roll_dice().unwrap();
    game.make_move(Square::Point(12), Square::Point(6)).unwrap();

    // The 2 is still available but the player passes on it.
    assert_eq!(game.dice().available_moves(), &[2]);
    game.end_turn().unwrap();

    assert_eq!(game.current_player(), PlayerId::Two);
    assert!(game.dice().available_moves().is_empty());
    assert_eq!(game.turn_count(), 2);
}

#[test]
fn test_turn_alternation_and_counting() {
    let mut game = scripted(&[3, 5]);

    assert_eq!(game.turn_count(), 1);
    for expected_turn in 1..=6u32 {
        assert_eq!(game.turn_count(), expected_turn);
        let expected_player = if expected_turn % 2 == 1 {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        assert_eq!(game.current_player(), expected_player);

        game.roll_dice().unwrap();
        game.end_turn().unwrap();
    }
}

#[test]
fn test_state_machine_guards() {
    let mut game = GameBuilder::new().rng(DiceRng::fixed(&[3, 5][..])).build(0);

    assert_eq!(game.state(), GameState::NotStarted);
    assert_eq!(game.roll_dice(), Err(GameError::GameNotStarted));
    assert_eq!(
        game.make_move(Square::Point(23), Square::Point(20)),
        Err(GameError::GameNotStarted)
    );

    game.start().unwrap();
    assert_eq!(game.state(), GameState::InProgress);
    assert_eq!(game.start(), Err(GameError::GameAlreadyFinished));
}

#[test]
fn test_history_is_ordered_and_complete() {
    let mut game = scripted(&[3, 5, 6, 2]);

    game.roll_dice().unwrap();
    game.make_move(Square::Point(23), Square::Point(20)).unwrap();
    game.make_move(Square::Point(12), Square::Point(7)).unwrap();

    game.roll_dice().unwrap();
    game.make_move(Square::Point(0), Square::Point(6)).unwrap();

    let records: Vec<_> = game.history().collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].turn, 1);
    assert_eq!(records[0].player, PlayerId::One);
    assert_eq!(records[0].die, 3);
    assert_eq!(records[1].die, 5);
    assert_eq!(records[2].turn, 2);
    assert_eq!(records[2].player, PlayerId::Two);
    assert_eq!(records[2].from, Square::Point(0));
}

#[test]
fn test_same_seed_replays_identically() {
    let mut a = Game::new(99);
    let mut b = Game::new(99);
    a.start().unwrap();
    b.start().unwrap();

    for _ in 0..30 {
        if a.state() != GameState::InProgress {
            break;
        }
        let roll_a = a.roll_dice().unwrap();
        let roll_b = b.roll_dice().unwrap();
        assert_eq!(roll_a, roll_b);

        loop {
            let mv = a.valid_moves().next();
            match mv {
                Some(mv) => {
                    let oa = a.make_move(mv.from, mv.to).unwrap();
                    let ob = b.make_move(mv.from, mv.to).unwrap();
                    assert_eq!(oa, ob);
                    if oa.turn_ended {
                        break;
                    }
                }
                None => {
                    a.end_turn().unwrap();
                    b.end_turn().unwrap();
                    break;
                }
            }
        }
    }

    assert_eq!(a.history().count(), b.history().count());
    assert_eq!(a.status(), b.status());
}
