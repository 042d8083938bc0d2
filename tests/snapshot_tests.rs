//! Snapshot tests - shape of the read-only view and isolation from the engine

use blockfall::core::{Game, GameSnapshot};
use blockfall::types::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

#[test]
fn snapshot_json_has_exact_field_names() {
    let game = Game::new(1);
    let v = serde_json::to_value(game.snapshot()).unwrap();
    let obj = v.as_object().unwrap();

    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["isGameOver", "level", "lines", "nextPiece", "playfield", "score"]
    );

    let next = v["nextPiece"].as_object().unwrap();
    let mut next_keys: Vec<_> = next.keys().map(String::as_str).collect();
    next_keys.sort_unstable();
    assert_eq!(next_keys, vec!["blocks", "x", "y"]);
}

#[test]
fn snapshot_json_playfield_is_20_by_10_ints() {
    let game = Game::new(1);
    let v = serde_json::to_value(game.snapshot()).unwrap();

    let rows = v["playfield"].as_array().unwrap();
    assert_eq!(rows.len(), PLAYFIELD_HEIGHT as usize);
    for row in rows {
        let row = row.as_array().unwrap();
        assert_eq!(row.len(), PLAYFIELD_WIDTH as usize);
        for cell in row {
            let n = cell.as_u64().unwrap();
            assert!(n <= 7);
        }
    }
}

#[test]
fn snapshot_json_next_piece_blocks_are_square() {
    let game = Game::new(1);
    let v = serde_json::to_value(game.snapshot()).unwrap();

    let blocks = v["nextPiece"]["blocks"].as_array().unwrap();
    let n = blocks.len();
    assert!(n == 3 || n == 4);
    for row in blocks {
        assert_eq!(row.as_array().unwrap().len(), n);
    }
    assert_eq!(v["nextPiece"]["x"], 3);
    assert_eq!(v["nextPiece"]["y"], -1);
    assert_eq!(v["isGameOver"], false);
}

#[test]
fn snapshot_contains_active_piece() {
    let mut game = Game::new(1);
    game.move_piece_down();
    game.move_piece_down();

    let snap = game.snapshot();
    let painted = snap.playfield.iter().flatten().filter(|&&v| v != 0).count();
    assert_eq!(painted, 4);

    // The engine's own grid stays empty until the piece locks
    assert!(game.playfield().cells().iter().all(|c| c.is_none()));
}

#[test]
fn mutating_snapshot_does_not_affect_engine() {
    let game = Game::new(1);
    let mut snap = game.snapshot();
    snap.playfield[19][0] = 7;
    snap.score = 999;
    snap.next_piece.x = 0;

    let fresh = game.snapshot();
    assert_eq!(fresh.playfield[19][0], 0);
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.next_piece.x, 3);
}

#[test]
fn snapshot_into_overwrites_previous_contents() {
    let game = Game::new(1);
    let mut snap = GameSnapshot::default();
    snap.playfield = [[7; PLAYFIELD_WIDTH as usize]; PLAYFIELD_HEIGHT as usize];
    snap.score = 5;

    game.snapshot_into(&mut snap);
    assert_eq!(snap, game.snapshot());
}
