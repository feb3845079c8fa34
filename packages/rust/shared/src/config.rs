//! Application configuration for wikidex.
//!
//! User config lives at `~/.wikidex/wikidex.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikidexError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "wikidex.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".wikidex";

// ---------------------------------------------------------------------------
// Config structs (matching wikidex.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wiki endpoint settings.
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[wiki]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Base URL for wiki page lookups (page title appended).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `Accept-Language` header sent with every page request.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accept_language: default_accept_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://wiki.52poke.com/wiki/".into()
}
fn default_accept_language() -> String {
    "zh-Hans".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for scraped JSON files and images.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Whether to download artwork alongside the JSON records.
    #[serde(default)]
    pub download_images: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            download_images: false,
        }
    }
}

fn default_data_dir() -> String {
    "./data".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.wikidex/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WikidexError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.wikidex/wikidex.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WikidexError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| WikidexError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WikidexError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| WikidexError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WikidexError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
