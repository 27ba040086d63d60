//! Tests for the game registry and the JSON action protocol.

use cubic_arcade::{AnyAction, AnyGame, AnyState, ArcadeConfig, GameKind, GameRegistry, SessionError};
use cubic_game::Game;
use cubic_nonogram::NonogramAction;
use cubic_snake::SnakeAction;
use cubic_tetris::{Shift, TetrisAction};
use cubic_topology::{CubeFace, CubePosition, Direction};
use serde_json::json;
use std::str::FromStr;

#[test]
fn test_registry_holds_every_game() {
    let registry = GameRegistry::from_config(&ArcadeConfig::default());
    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(ids, ["minesweeper", "nonogram", "snake", "tetris"]);
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_lookup_by_id() {
    let registry = GameRegistry::from_config(&ArcadeConfig::default());
    let snake = registry.get("snake").expect("snake registered");
    assert_eq!(snake.kind(), GameKind::Snake);
    assert_eq!(snake.metadata().name(), "Snake");
    assert_eq!(
        registry.get("chess").err(),
        Some(SessionError::UnknownGame("chess".to_string()))
    );
}

#[test]
fn test_game_kind_parses_case_insensitively() {
    assert_eq!(GameKind::from_str("Tetris"), Ok(GameKind::Tetris));
    assert_eq!(GameKind::Nonogram.to_string(), "nonogram");
}

#[test]
fn test_actions_parse_per_game() {
    let turn = AnyAction::parse(
        GameKind::Snake,
        json!({"type": "changeDirection", "payload": "left"}),
    )
    .expect("snake action");
    assert_eq!(turn, AnyAction::Snake(SnakeAction::ChangeDirection(Direction::Left)));

    // "move" means different things to different games.
    let shift = AnyAction::parse(GameKind::Tetris, json!({"type": "move", "payload": "left"}))
        .expect("tetris action");
    assert_eq!(shift, AnyAction::Tetris(TetrisAction::Move(Shift::Left)));

    let fill = AnyAction::parse(
        GameKind::Nonogram,
        json!({"type": "fill", "payload": {"face": "BACK", "x": 1, "y": 1}}),
    )
    .expect("nonogram action");
    assert_eq!(
        fill,
        AnyAction::Nonogram(NonogramAction::Fill(CubePosition::new(CubeFace::Back, 1, 1)))
    );

    assert!(AnyAction::parse(GameKind::Minesweeper, json!({"type": "move"})).is_err());
}

#[test]
fn test_actions_serialize_to_game_wire_shape() {
    let action = AnyAction::from(SnakeAction::ChangeDirection(Direction::Up));
    assert_eq!(
        serde_json::to_value(&action).expect("serialize"),
        json!({"type": "changeDirection", "payload": "up"})
    );
}

#[test]
fn test_state_serialization_is_tagged_by_game() {
    let config = ArcadeConfig::default().with_seed(3);
    let game = AnyGame::from_config(GameKind::Minesweeper, &config);
    let state = game.init();
    let value = serde_json::to_value(&state).expect("serialize");
    assert_eq!(value["game"], "minesweeper");
    let back: AnyState = serde_json::from_value(value).expect("deserialize");
    assert_eq!(back, state);
}

#[test]
fn test_mismatched_state_is_rejected() {
    let config = ArcadeConfig::default().with_seed(3);
    let snake = AnyGame::from_config(GameKind::Snake, &config);
    let tetris_state = AnyGame::from_config(GameKind::Tetris, &config).init();
    let action = AnyAction::from(SnakeAction::Move);
    assert!(!snake.is_valid_action(&tetris_state, &action));
    assert_eq!(snake.apply_action(&tetris_state, &action), tetris_state);
    assert!(snake.valid_actions(&tetris_state).is_empty());
}
