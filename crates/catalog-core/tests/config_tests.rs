use std::fs;
use tempfile::TempDir;

use catalog_core::config::{resolve_with_base, Config, DEFAULT_CATALOG_PATH};

#[test]
fn defaults_without_any_file() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_for_env(tmp.path(), "test").expect("load");
    let settings = config.search_settings().expect("settings");
    assert_eq!(settings.catalog_path, tmp.path().join(DEFAULT_CATALOG_PATH));
    assert_eq!(settings.max_results, 100);
}

#[test]
fn env_overlay_wins_over_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[catalog]\npath = \"catalog/base.csv\"\n[search]\nmax_results = 25\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[search]\nmax_results = 5\n").unwrap();

    let config = Config::load_for_env(tmp.path(), "test").expect("load");
    let settings = config.search_settings().expect("settings");
    assert_eq!(settings.catalog_path, tmp.path().join("catalog/base.csv"));
    assert_eq!(settings.max_results, 5);
}

#[test]
fn zero_max_results_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[search]\nmax_results = 0\n").unwrap();
    assert!(Config::load_for_env(tmp.path(), "dev").is_err());
}

#[test]
fn production_requires_catalog_path() {
    let tmp = TempDir::new().unwrap();
    assert!(Config::load_for_env(tmp.path(), "prod").is_err());

    fs::write(tmp.path().join("config.prod.toml"), "[catalog]\npath = \"/srv/catalog.csv\"\n").unwrap();
    let config = Config::load_for_env(tmp.path(), "prod").expect("load");
    assert_eq!(
        config.search_settings().expect("settings").catalog_path,
        std::path::PathBuf::from("/srv/catalog.csv")
    );
}

#[test]
fn absolute_paths_are_not_rebased() {
    let base = std::path::Path::new("/etc/catalog");
    assert_eq!(resolve_with_base(base, "/data/x.csv"), std::path::PathBuf::from("/data/x.csv"));
    assert_eq!(resolve_with_base(base, "x.csv"), base.join("x.csv"));
}
