//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`APP_CATALOG__PATH` maps to `catalog.path`). Provides helpers to expand `~`
//! and `${VAR}` and to resolve relative paths against the config directory.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::types::DEFAULT_MAX_RESULTS;

pub const DEFAULT_CATALOG_PATH: &str = "data.csv";

pub struct Config {
    figment: Figment,
    base: PathBuf,
}

/// Settings the search service needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub catalog_path: PathBuf,
    pub max_results: usize,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_in(Path::new("."))
    }

    /// Load `config*.toml` from `base`, choosing the overlay from `RUST_ENV` (default `dev`).
    pub fn load_in(base: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(base, &env_name)
    }

    pub fn load_for_env(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base: base.to_path_buf() };
        config.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Like [`Config::get`], but a missing key is `Ok(None)` rather than an error.
    pub fn get_opt<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.figment.contains(key) {
            return Ok(None);
        }
        self.get(key).map(Some)
    }

    pub fn search_settings(&self) -> anyhow::Result<SearchSettings> {
        let catalog: String = self
            .get_opt("catalog.path")?
            .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string());
        let max_results = self.get_opt("search.max_results")?.unwrap_or(DEFAULT_MAX_RESULTS);
        Ok(SearchSettings {
            catalog_path: resolve_with_base(&self.base, catalog),
            max_results,
        })
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        if let Some(0) = self.get_opt::<usize>("search.max_results")? {
            return Err(Error::InvalidConfig("search.max_results must be greater than 0".into()).into());
        }
        match env {
            "prod" | "production" => {
                if !self.figment.contains("catalog.path") {
                    return Err(Error::InvalidConfig("catalog.path must be set in production".into()).into());
                }
            }
            "dev" | "development" => {}
            "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
