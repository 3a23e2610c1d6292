//! Integration tests for loading configuration from disk.

use std::time::{Duration, Instant};

use indoc::indoc;
use respite_core::testing::RecordingSink;
use respite_core::{Config, ConfigError, CoreError, CyclePhase};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(!dir.path().join("absent.toml").exists());
}

#[test]
fn test_file_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        indoc! {r#"
            default_preset = 5
            snooze_secs = 30

            [[presets]]
            id = 5
            name = "Tiny"
            work_secs = 10
            break_secs = 5
        "#},
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    let mut engine = cfg.build_engine(RecordingSink::new()).unwrap();
    let t0 = Instant::now();
    engine.start(t0);
    engine.on_tick(t0 + Duration::from_secs(10));
    assert_eq!(engine.phase(), CyclePhase::BreakActive);
    engine.on_snooze();
    assert_eq!(engine.remaining(), Some(Duration::from_secs(30)));
    assert_eq!(engine.sink().last_text(), Some("Snoozed 0:30"));
}

#[test]
fn test_invalid_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        indoc! {r#"
            [[presets]]
            id = 1
            work_secs = 60
            break_secs = 10

            [[presets]]
            id = 1
            work_secs = 90
            break_secs = 10
        "#},
    )
    .unwrap();

    match Config::load_from(&path) {
        Err(CoreError::Config(ConfigError::InvalidValue { key, .. })) => assert_eq!(key, "presets"),
        other => panic!("expected invalid presets, got {other:?}"),
    }
}

#[test]
fn test_directory_path_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
}
