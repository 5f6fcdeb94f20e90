use gallery::config::{self, Config};
use gallery::ConfigError;
use tempfile::tempdir;

#[test]
fn saved_settings_load_back() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("nested").join("settings.toml");

    let settings = Config {
        api_base: "http://localhost:8080".into(),
        page_size: 24,
        columns: 3,
        near_end_threshold: 1.0,
        log_filter: Some("gallery=debug".into()),
        ..Config::default()
    };
    config::save_to_path(&settings, &path).expect("Failed to save config");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded, settings);
}

#[test]
fn unparsable_file_is_reported() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "page_size = \"ten\"").unwrap();

    assert!(matches!(
        config::load_from_path(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "columns = 0\n").unwrap();

    assert!(matches!(
        config::load_from_path(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("Failed to create temporary directory");
    assert!(matches!(
        config::load_from_path(&dir.path().join("absent.toml")),
        Err(ConfigError::Io(_))
    ));
}
