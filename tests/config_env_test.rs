//! Environment overrides for settings
//!
//! Kept in its own test binary: it mutates process environment variables.

use std::fs;

use tempfile::TempDir;

use taxtree::config::Settings;

#[test]
fn given_taxtree_env_vars_when_loading_then_override_file_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("taxtree.toml");
    fs::write(&path, "seed_examples = true\nbrowser = \"firefox\"\n").unwrap();

    std::env::set_var("TAXTREE_SEED_EXAMPLES", "false");
    std::env::set_var("TAXTREE_BROWSER", "lynx");
    let settings = Settings::load_layered(None, Some(&path));
    std::env::remove_var("TAXTREE_SEED_EXAMPLES");
    std::env::remove_var("TAXTREE_BROWSER");

    let settings = settings.unwrap();
    assert!(!settings.seed_examples);
    assert!(settings.confirm_delete);
    assert_eq!(settings.browser.as_deref(), Some("lynx"));
}
