//! Loading Tiled JSON maps from disk.

use std::fs;
use std::path::Path;

use roborally::{Board, GameBuilder, GameConfig, Location, RallyError, Tile};

/// Build a Tiled map document from row-major layer data (top row first).
fn tiled_json(width: i32, height: i32, holes: &[u32], flags: &[u32]) -> String {
    serde_json::json!({
        "width": width,
        "height": height,
        "layers": [
            { "name": "board", "data": vec![1; (width * height) as usize] },
            { "name": "hole", "data": holes },
            { "name": "flag", "data": flags },
        ],
    })
    .to_string()
}

#[test]
fn test_bundled_map_matches_standard_board() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/gameboard.json");

    let board = Board::load(&path).unwrap();

    assert_eq!(board, Board::standard(12, 12));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.json");
    #[rustfmt::skip]
    let holes = [
        0, 0, 6,
        0, 0, 0,
    ];
    #[rustfmt::skip]
    let flags = [
        0, 0, 0,
        0, 63, 0,
    ];
    fs::write(&path, tiled_json(3, 2, &holes, &flags)).unwrap();

    let board = Board::load(&path).unwrap();

    assert_eq!(board.width(), 3);
    assert_eq!(board.height(), 2);
    assert_eq!(board.tile_at(Location::new(2, 1)), Tile::Hole);
    assert_eq!(board.tile_at(Location::new(1, 0)), Tile::Flag(2));
    assert_eq!(board.tile_at(Location::new(0, 0)), Tile::Floor);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = Board::load(&dir.path().join("nope.json")).unwrap_err();

    assert!(matches!(err, RallyError::Io { .. }));
}

#[test]
fn test_missing_layer() {
    let json = serde_json::json!({
        "width": 2,
        "height": 2,
        "layers": [{ "name": "hole", "data": [0, 0, 0, 0] }],
    })
    .to_string();

    let err = Board::from_tiled_json(&json).unwrap_err();

    assert!(matches!(err, RallyError::MissingLayer(layer) if layer == "flag"));
}

#[test]
fn test_wrong_layer_size() {
    let json = tiled_json(2, 2, &[0, 0, 0], &[0, 0, 0, 0]);

    let err = Board::from_tiled_json(&json).unwrap_err();

    assert!(matches!(err, RallyError::LayerSize { expected: 4, actual: 3, .. }));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(Board::from_tiled_json("{ not json"), Err(RallyError::MapFormat(_))));
}

/// A game plays on a loaded map and a config file from disk.
#[test]
fn test_game_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let map_path = dir.path().join("map.json");
    let config_path = dir.path().join("game.toml");
    fs::write(&map_path, tiled_json(1, 3, &[0, 0, 0], &[55, 0, 0])).unwrap();
    fs::write(
        &config_path,
        "ticks_per_step = 1\n[[deck]]\nvalue = \"F1\"\ncount = 10\n",
    )
    .unwrap();

    let config = GameConfig::load(&config_path).unwrap();
    let board = Board::load(&map_path).unwrap();
    let mut game = GameBuilder::new(config).board(board).build().unwrap();

    assert_eq!(game.flags()[0].location, Location::new(0, 2));
    assert_eq!(game.run(10).unwrap(), Some(roborally::PlayerId::new(0)));
}

#[test]
fn test_bad_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    fs::write(&path, "player_count = \"two\"").unwrap();

    assert!(matches!(GameConfig::load(&path), Err(RallyError::ConfigFormat(_))));

    fs::write(&path, "player_count = 12").unwrap();
    assert!(matches!(GameConfig::load(&path), Err(RallyError::InvalidConfig(_))));
}

/// A flag painted over a hole is reachable and wins.
#[test]
fn test_flag_over_hole_is_winnable() {
    let config = GameConfig {
        deck: vec![roborally::DeckEntry::new(roborally::CardValue::F1, 10)],
        ..GameConfig::default().with_ticks_per_step(1)
    };
    let board = Board::from_tiled_json(&tiled_json(1, 3, &[6, 0, 0], &[55, 0, 0])).unwrap();
    let mut game = GameBuilder::new(config).board(board).build().unwrap();

    assert_eq!(game.run(500).unwrap(), Some(roborally::PlayerId::new(0)));
}

/// Map headers far larger than their layers are rejected without panicking.
#[test]
fn test_oversized_header() {
    let json = serde_json::json!({
        "width": 65536,
        "height": 65536,
        "layers": [
            { "name": "hole", "data": [] },
            { "name": "flag", "data": [] },
        ],
    })
    .to_string();

    assert!(Board::from_tiled_json(&json).is_err());
}
