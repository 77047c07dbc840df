//! End-to-end gameplay tests driving the engine the way a frontend does:
//! cell-activation events in, snapshots out.

use chase_core::{
    Game, MoveError, Phase, Piece, PieceKind, Player, Pos, TapOutcome, CELLS,
};
use serde_json::json;

fn pos(row: u8, col: u8) -> Pos {
    Pos::from_row_col(row, col)
}

fn tap_move(game: &mut Game, from: Pos, to: Pos) -> TapOutcome {
    assert!(
        matches!(game.tap(from), TapOutcome::Selected(_)),
        "failed to select {from:?}"
    );
    game.tap(to)
}

#[test]
fn full_game_to_royal_capture() {
    let mut game = Game::new();

    // Upper's Advancer takes Lower's Advancer on the center file.
    match tap_move(&mut game, pos(1, 1), pos(2, 1)) {
        TapOutcome::Moved(m) => {
            assert_eq!(m.captured, Some(Piece::new(Player::Lower, PieceKind::Advancer)));
            assert_eq!(m.winner, None);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(game.turn(), 1);
    assert_eq!(game.current_player(), Player::Lower);

    // Lower's Royal recaptures.
    match tap_move(&mut game, pos(3, 1), pos(2, 1)) {
        TapOutcome::Moved(m) => {
            assert_eq!(m.captured, Some(Piece::new(Player::Upper, PieceKind::Advancer)));
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    // Upper's Royal steps into the vacated center...
    match tap_move(&mut game, pos(0, 1), pos(1, 1)) {
        TapOutcome::Moved(m) => assert_eq!(m.captured, None),
        other => panic!("unexpected outcome {other:?}"),
    }

    // ...and Lower's Royal takes it. Game over.
    match tap_move(&mut game, pos(2, 1), pos(1, 1)) {
        TapOutcome::Moved(m) => {
            assert_eq!(m.captured, Some(Piece::new(Player::Upper, PieceKind::Royal)));
            assert_eq!(m.winner, Some(Player::Lower));
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    assert_eq!(game.phase(), Phase::Ended { winner: Player::Lower });
    assert_eq!(game.winner(), Some(Player::Lower));
    assert_eq!(
        game.holding(Player::Lower).pieces(),
        &[
            Piece::new(Player::Upper, PieceKind::Advancer),
            Piece::new(Player::Upper, PieceKind::Royal),
        ]
    );
    assert_eq!(
        game.holding(Player::Upper).pieces(),
        &[Piece::new(Player::Lower, PieceKind::Advancer)]
    );

    // Frozen: the ending move never advanced the turn.
    assert_eq!(game.turn(), 3);
    assert_eq!(game.current_player(), Player::Lower);
    assert_eq!(game.tap(pos(1, 1)), TapOutcome::Ignored);
    assert_eq!(game.tap(pos(3, 0)), TapOutcome::Ignored);
    assert_eq!(game.turn(), 3);
}

#[test]
fn rejected_move_keeps_turn_with_mover() {
    let mut game = Game::new();

    // Upper's Runner cannot jump two rows.
    assert_eq!(
        tap_move(&mut game, pos(0, 0), pos(2, 0)),
        TapOutcome::Rejected(MoveError::IllegalStep)
    );
    assert_eq!(game.turn(), 0);
    assert_eq!(game.current_player(), Player::Upper);
    assert_eq!(game.selected(), Some(pos(0, 0)));

    // The same selection can immediately retry a legal target.
    match game.tap(pos(1, 0)) {
        TapOutcome::Moved(m) => assert_eq!(m.captured, None),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(game.turn(), 1);
}

#[test]
fn snapshot_serializes_for_the_frontend() {
    let mut game = Game::new();
    game.select(pos(0, 1));

    let value = serde_json::to_value(game.snapshot()).expect("snapshot must serialize");

    let cells = value["cells"].as_array().expect("cells array");
    assert_eq!(cells.len(), CELLS);

    // Upper's Royal on its back rank, currently highlighted.
    assert_eq!(
        cells[1],
        json!({
            "row": 0,
            "col": 1,
            "piece": { "owner": "upper", "kind": "royal" },
            "active": true,
        })
    );
    // An empty, inactive cell.
    assert_eq!(
        cells[6],
        json!({ "row": 2, "col": 0, "piece": null, "active": false })
    );

    assert_eq!(value["turn"], json!(0));
    assert_eq!(value["current_player"], json!("upper"));
    assert_eq!(value["phase"], json!({ "state": "started" }));
    assert_eq!(value["upper_captured"], json!([]));
    assert_eq!(value["lower_captured"], json!([]));
}

#[test]
fn ended_phase_serializes_with_winner() {
    let mut game = Game::new();

    // Quickest royal hunt: trade advancers, then walk the Lower Royal in.
    for (from, to) in [
        (pos(1, 1), pos(2, 1)),
        (pos(3, 1), pos(2, 1)),
        (pos(0, 1), pos(1, 1)),
        (pos(2, 1), pos(1, 1)),
    ] {
        assert!(matches!(tap_move(&mut game, from, to), TapOutcome::Moved(_)));
    }

    let value = serde_json::to_value(game.snapshot()).expect("snapshot must serialize");
    assert_eq!(value["phase"], json!({ "state": "ended", "winner": "lower" }));
    assert_eq!(
        value["lower_captured"],
        json!([
            { "owner": "upper", "kind": "advancer" },
            { "owner": "upper", "kind": "royal" },
        ])
    );
}

#[test]
fn move_errors_display_for_status_lines() {
    assert_eq!(MoveError::IllegalStep.to_string(), "piece cannot reach the target");
    assert_eq!(MoveError::GameOver.to_string(), "the game has ended");

    // MoveError is a std error, so it can ride in Box<dyn Error> callers.
    let err: Box<dyn std::error::Error> = Box::new(MoveError::OwnPieceAtTarget);
    assert_eq!(err.to_string(), "target holds the player's own piece");
}

#[test]
fn random_games_terminate_or_stay_consistent() {
    use rand::prelude::*;

    let mut rng = rand::rng();

    for _ in 0..50 {
        let mut game = Game::new();

        for _ in 0..200 {
            if game.winner().is_some() {
                break;
            }
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }
            let (from, to) = moves[rng.random_range(0..moves.len())];

            // Drive through the tap surface, like a real frontend.
            match tap_move(&mut game, from, to) {
                TapOutcome::Moved(_) => {}
                other => panic!("legal move {from:?}->{to:?} rejected: {other:?}"),
            }
        }

        // Whatever happened, the snapshot must still serialize cleanly.
        let value = serde_json::to_value(game.snapshot()).expect("snapshot must serialize");
        assert_eq!(value["cells"].as_array().map(Vec::len), Some(CELLS));
    }
}
