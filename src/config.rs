//! Configuration loading.
//!
//! Everything lives in one optional `config.toml`; every field has a
//! default, so an empty or missing file gives a working setup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::apps::AppDirectory;
use crate::contacts::{ContactResolver, DEFAULT_FUZZY_MATCH_THRESHOLD, DEFAULT_MAX_QUERY_CHARS};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Contact name matching.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Where contacts are stored.
    #[serde(default)]
    pub contacts: ContactsConfig,

    /// Extra app name to URL entries, layered over the built-in table.
    #[serde(default)]
    pub apps: BTreeMap<String, String>,

    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Resolver built from the `[resolver]` section.
    pub fn contact_resolver(&self) -> ContactResolver {
        ContactResolver {
            fuzzy_match_threshold: self.resolver.fuzzy_match_threshold,
            max_query_chars: self.resolver.max_query_chars,
        }
    }

    /// App directory with the `[apps]` section applied.
    pub fn app_directory(&self) -> AppDirectory {
        AppDirectory::with_extra(&self.apps)
    }
}

/// Contact resolver tuning.
#[derive(Debug, Deserialize)]
pub struct ResolverConfig {
    /// Minimum similarity in `[0, 1]` for a fuzzy contact match.
    #[serde(default = "default_fuzzy_match_threshold")]
    pub fuzzy_match_threshold: f64,

    /// Characters of a name considered when scoring.
    #[serde(default = "default_max_query_chars")]
    pub max_query_chars: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: default_fuzzy_match_threshold(),
            max_query_chars: default_max_query_chars(),
        }
    }
}

/// Contact storage settings.
#[derive(Debug, Default, Deserialize)]
pub struct ContactsConfig {
    /// Contacts JSON file. Defaults to `contacts.json` in the config dir.
    pub path: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default value functions for serde

fn default_fuzzy_match_threshold() -> f64 {
    DEFAULT_FUZZY_MATCH_THRESHOLD
}
fn default_max_query_chars() -> usize {
    DEFAULT_MAX_QUERY_CHARS
}
fn default_log_level() -> String {
    "warn".to_owned()
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// fuzzy match threshold is outside `[0, 1]`.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    validate(&config)
        .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Load `config.toml` from [`config_dir`], or defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or an
/// existing file is invalid.
pub fn load_default_config() -> anyhow::Result<Config> {
    let path = config_dir()?.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config(&path)
}

fn validate(config: &Config) -> anyhow::Result<()> {
    let threshold = config.resolver.fuzzy_match_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("resolver.fuzzy_match_threshold must be within [0, 1], got {threshold}");
    }
    if config.resolver.max_query_chars == 0 {
        anyhow::bail!("resolver.max_query_chars must be positive");
    }
    Ok(())
}

/// Resolve the default config directory (`~/.parley/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".parley"))
}

/// Contacts file path: the configured one, else `contacts.json` in
/// [`config_dir`].
///
/// # Errors
///
/// Returns an error if no path is configured and the home directory cannot
/// be determined.
pub fn contacts_path(config: &Config) -> anyhow::Result<PathBuf> {
    match &config.contacts.path {
        Some(path) => Ok(path.clone()),
        None => Ok(config_dir()?.join("contacts.json")),
    }
}
