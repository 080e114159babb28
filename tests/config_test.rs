//! Tests for PlayConfig loading and overrides.

use perfect_play::{ENV_FIRST, ENV_HUMAN, ENV_PRUNING, PlayConfig};
use perfect_tictactoe::{Player, Pruning};
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("perfect_play.toml");
    fs::write(&path, content).expect("Failed to write TOML");
    path
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = PlayConfig::load_or_default(dir.path().join("absent.toml")).expect("Load failed");
    assert_eq!(config, PlayConfig::default());
    assert_eq!(*config.human(), Player::X);
    assert_eq!(*config.first(), Player::X);
    assert_eq!(*config.pruning(), Pruning::None);
    assert_eq!(config.engine().config().maximizer, Player::X);
    assert_eq!(config.engine_delay(), Duration::from_millis(300));
}

#[test]
fn test_file_values_loaded() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(
        &dir,
        r#"human = "o"
first = "O"
maximizer = "o"
pruning = "alpha-beta"
parallel = true
engine_delay_ms = 0
"#,
    );

    let config = PlayConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.human(), Player::O);
    assert_eq!(*config.first(), Player::O);
    assert_eq!(*config.pruning(), Pruning::AlphaBeta);
    assert!(*config.parallel());
    assert_eq!(*config.maximizer(), Player::O);
    assert_eq!(config.engine().config().maximizer, Player::O);
    assert_eq!(*config.engine_delay_ms(), 0);
    assert_eq!(config.log_file().to_str(), Some("perfect_play.log"));
}

#[test]
fn test_invalid_file_reports_location() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_config(&dir, "human = \"z\"\n");

    let err = PlayConfig::from_file(&path).expect_err("Invalid player accepted");
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_environment_overrides_file() {
    let vars: HashMap<&str, &str> = [
        (ENV_HUMAN, "o"),
        (ENV_FIRST, "x"),
        (ENV_PRUNING, "alpha-beta"),
    ]
    .into_iter()
    .collect();

    let config = PlayConfig::default()
        .with_overrides(|key| vars.get(key).map(|v| v.to_string()))
        .expect("Overrides apply");
    assert_eq!(*config.human(), Player::O);
    assert_eq!(*config.first(), Player::X);
    assert_eq!(*config.pruning(), Pruning::AlphaBeta);
}

#[test]
fn test_bad_environment_value_rejected() {
    let err = PlayConfig::default()
        .with_overrides(|key| (key == ENV_PRUNING).then(|| "sometimes".to_string()))
        .expect_err("Bad pruning accepted");
    assert!(err.message.contains(ENV_PRUNING));
}

#[test]
fn test_flags_build_seats() {
    let config = PlayConfig::default()
        .with_human(Player::O)
        .with_engine_first();
    let seats = config.seats();
    assert_eq!(seats.human, Player::O);
    assert_eq!(seats.first, Player::X);
    assert_eq!(seats.engine(), Player::X);
}
