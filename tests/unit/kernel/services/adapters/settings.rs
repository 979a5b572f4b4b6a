use super::*;
use tempfile::tempdir;

#[test]
fn ensure_settings_file_writes_defaults_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    ensure_settings_file_at(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap(), BehaviorSettings::default());

    std::fs::write(&path, r#"{ "debounceDelayMs": 50 }"#).unwrap();
    ensure_settings_file_at(&path).unwrap();
    assert_eq!(load_settings_from(&path).unwrap().debounce_delay_ms, 50);
}

#[test]
fn malformed_settings_report_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_settings_from(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
    assert!(err.to_string().starts_with("Settings parse failed"));
}

#[test]
fn missing_settings_report_io_error() {
    let dir = tempdir().unwrap();
    let err = load_settings_from(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn startup_creates_missing_settings_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".gesturegate").join("settings.json");

    assert_eq!(init_settings_at(&path), BehaviorSettings::default());
    assert!(path.exists());
    assert_eq!(load_settings_from(&path).unwrap(), BehaviorSettings::default());
}

#[test]
fn startup_keeps_existing_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "debounce_delay_ms": 75, "doubleClickMs": 300 }"#).unwrap();

    let settings = init_settings_at(&path);
    assert_eq!(settings.debounce_delay_ms, 75);
    assert_eq!(settings.double_click_ms, Some(300));
}

#[test]
fn startup_falls_back_to_defaults_on_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(init_settings_at(&path), BehaviorSettings::default());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}
