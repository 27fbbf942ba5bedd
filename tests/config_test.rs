//! Tests for file-based settings loading

use std::fs;

use tempfile::TempDir;

use taxtree::application::ApplicationError;
use taxtree::config::Settings;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("taxtree.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_partial_file_when_loading_then_unspecified_fields_use_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "confirm_delete = false\n");

    let settings = Settings::load_layered(None, Some(&path)).unwrap();

    assert!(settings.seed_examples);
    assert!(!settings.confirm_delete);
    assert_eq!(settings.browser, None);
}

#[test]
fn given_browser_with_env_var_when_loading_then_expanded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "browser = \"$HOME/bin/browser --new-tab\"\n");

    let settings = Settings::load_layered(None, Some(&path)).unwrap();

    let home = std::env::var("HOME").unwrap();
    assert_eq!(
        settings.browser.as_deref(),
        Some(format!("{}/bin/browser --new-tab", home).as_str())
    );
}

#[test]
fn given_invalid_toml_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "seed_examples = maybe\n");

    let err = Settings::load_layered(None, Some(&path)).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_missing_file_when_loading_then_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load_layered(None, Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn given_loaded_settings_when_rendering_then_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "seed_examples = false\nbrowser = \"firefox\"\n");
    let settings = Settings::load_layered(None, Some(&path)).unwrap();

    let again = write_config(&dir, &settings.to_toml().unwrap());
    assert_eq!(Settings::load_layered(None, Some(&again)).unwrap(), settings);
}

#[test]
fn given_global_and_explicit_files_when_loading_then_explicit_wins_per_field() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    fs::write(&global, "seed_examples = false\nbrowser = \"firefox\"\n").unwrap();
    let explicit = write_config(&dir, "browser = \"lynx\"\n");

    let settings = Settings::load_layered(Some(&global), Some(&explicit)).unwrap();

    assert!(!settings.seed_examples);
    assert!(settings.confirm_delete);
    assert_eq!(settings.browser.as_deref(), Some("lynx"));
}

#[test]
fn given_no_files_when_loading_then_defaults() {
    assert_eq!(Settings::load_layered(None, None).unwrap(), Settings::default());
}
