//! Integration tests for the configuration file

use tempfile::TempDir;

use framestep::config::migrate_config;
use framestep::{Config, SnapMode};

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_then_load_keeps_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.snap.mode = SnapMode::Directional;
    config.calibration.max_frames = 20;
    config.viewer.frame_rate = 60.0;
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[snap]\nmode = \"sideways\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn migrate_keeps_comments_and_values() {
    let content = "# my settings\n[snap]\nmode = \"directional\" # keep\n";
    let result = migrate_config(content).unwrap();

    assert!(result.has_changes());
    assert!(result.content.contains("# my settings"));
    assert!(result.content.contains("mode = \"directional\" # keep"));
    assert!(result.added_fields.contains(&"snap.enabled".to_string()));
    assert!(result.sections_added.contains(&"calibration".to_string()));
    assert!(result.sections_added.contains(&"viewer".to_string()));

    let migrated: Config = toml::from_str(&result.content).unwrap();
    assert_eq!(migrated.snap.mode, SnapMode::Directional);
}

#[test]
fn migrate_complete_file_is_a_no_op() {
    let content = toml::to_string_pretty(&Config::default()).unwrap();
    let result = migrate_config(&content).unwrap();

    assert!(!result.has_changes());
    assert!(result.sections_added.is_empty());
}
