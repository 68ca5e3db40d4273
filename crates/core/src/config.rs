//! Application configuration layered from defaults, a JSON file and the
//! environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ::config::{Config, Environment, File, FileFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

const APP_DIR: &str = "tubeguessr";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "TUBEGUESSR";

/// Runtime settings for the engine and its frontends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the persisted keys.
    pub data_dir: PathBuf,
    /// Added to the day index when choosing the daily station.
    #[serde(default)]
    pub day_offset: u32,
    /// Grant unlimited rounds per day.
    #[serde(default)]
    pub unlimited_plays: bool,
    /// Write persisted keys from a background task.
    #[serde(default = "default_background_writes")]
    pub background_writes: bool,
    /// JSON catalog to use instead of the built-in London one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_background_writes() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            day_offset: 0,
            unlimited_plays: false,
            background_writes: default_background_writes(),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Load from the user's config file and `TUBEGUESSR_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load using `path` as the config file. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
            .set_default("day_offset", i64::from(defaults.day_offset))?
            .set_default("unlimited_plays", defaults.unlimited_plays)?
            .set_default("background_writes", defaults.background_writes)?
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("configuration has invalid values")
    }
}

/// Location of the user's config file.
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("no configuration directory on this platform")?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Write the default config file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path()?;
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path` unless something is already there.
pub fn ensure_default_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&AppConfig::default())?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
