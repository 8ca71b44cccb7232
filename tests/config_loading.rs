use std::io::Write;

use leda::config::{EngineConfig, CONFIG_ENV};
use leda::error::ConfigError;
use leda::SearchSession;

#[test]
fn load_reads_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"markers": {{"open": "[[", "close": "]]"}}, "viewport_width": 40}}"#
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.markers.open, "[[");
    assert_eq!(config.viewport_width, 40);

    let mut session = SearchSession::with_config(&config);
    session.load_document("one two");
    session.search("two");
    assert_eq!(session.current_highlighted_text(), "one [[two]]");
    assert_eq!(session.viewport().width(), 40);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn invalid_file_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"viewport_height": 0}}"#).unwrap();
    let err = EngineConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "viewport_height"));

    let mut broken = tempfile::NamedTempFile::new().unwrap();
    write!(broken, "not json").unwrap();
    let err = EngineConfig::load(broken.path()).unwrap_err();
    match err {
        ConfigError::InvalidFile { path, .. } => {
            assert_eq!(path, broken.path().display().to_string())
        }
        other => panic!("Expected InvalidFile, got {:?}", other),
    }
}

#[test]
fn environment_variable_overrides_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    std::fs::write(&path, r#"{"log_level": "debug"}"#).unwrap();

    std::env::set_var(CONFIG_ENV, &path);
    let resolved = EngineConfig::resolve_path().unwrap();
    let config = EngineConfig::load_default().unwrap();
    std::env::remove_var(CONFIG_ENV);

    assert_eq!(resolved, Some(path));
    assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Debug);
}
