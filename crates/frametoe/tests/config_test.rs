//! Tests for TOML configuration loading.

use frametoe::GameConfig;
use frametoe_engine::{Difficulty, Skin};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(*config.difficulty(), Difficulty::Medium);
    assert_eq!(*config.skin(), Skin::Chili);
    assert_eq!(config.reply_delay(), Duration::from_millis(500));
    assert_eq!(config.tick_period(), Duration::from_secs(1));
    assert_eq!(*config.notify_probability(), 0.25);
    assert_eq!(*config.seed(), None);
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
difficulty = "hard"
skin = "avocado"
reply_delay_ms = 250
player_id = "ana"
seed = 42
"#
    )
    .unwrap();

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.difficulty(), Difficulty::Hard);
    assert_eq!(*config.skin(), Skin::Avocado);
    assert_eq!(config.reply_delay(), Duration::from_millis(250));
    assert_eq!(config.tick_period(), Duration::from_secs(1));
    assert_eq!(config.player_id().as_deref(), Some("ana"));
    assert_eq!(config.resolved_player_id().as_deref(), Some("ana"));
    assert_eq!(*config.seed(), Some(42));
}

#[test]
fn test_empty_file_is_all_defaults() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert_eq!(
        GameConfig::from_file(file.path()).unwrap(),
        GameConfig::default()
    );
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frametoe.toml");

    assert!(GameConfig::from_file(&path).is_err());
    assert_eq!(
        GameConfig::load_or_default(&path).unwrap(),
        GameConfig::default()
    );
}

#[test]
fn test_rejects_bad_values() {
    let err = GameConfig::from_toml("difficulty = \"impossible\"").unwrap_err();
    assert!(err.message.contains("Failed to parse config"));

    let err = GameConfig::from_toml("notify_probability = 1.5").unwrap_err();
    assert!(err.message.contains("notify_probability"));

    assert!(GameConfig::from_toml("tick_period_ms = 0").is_err());
}

#[test]
fn test_overrides() {
    let config = GameConfig::default()
        .with_difficulty(Difficulty::Easy)
        .with_skin(Skin::Taco)
        .with_player_id("bo")
        .with_seed(3)
        .with_timing(10, 20)
        .unwrap();

    assert_eq!(*config.difficulty(), Difficulty::Easy);
    assert_eq!(*config.skin(), Skin::Taco);
    assert_eq!(config.resolved_player_id().as_deref(), Some("bo"));
    assert_eq!(*config.seed(), Some(3));
    assert_eq!(config.reply_delay(), Duration::from_millis(10));
    assert_eq!(config.tick_period(), Duration::from_millis(20));
}

#[test]
fn test_timing_override_rejects_zero_tick_period() {
    let err = GameConfig::default().with_timing(500, 0).unwrap_err();
    assert!(err.message.contains("tick_period_ms"));

    // A zero reply delay is fine.
    let config = GameConfig::default().with_timing(0, 1000).unwrap();
    assert_eq!(config.reply_delay(), Duration::ZERO);
}
