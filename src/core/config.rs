//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.umurage/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::content::ContentKind;
use crate::core::filter::Audience;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UmurageConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_kind: Option<ContentKind>,
    pub admin: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BrowseConfig {
    pub related_limit: Option<usize>,
    pub regions: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RELATED_LIMIT: usize = 3;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_REGIONS: [&str; 5] = ["Kigali", "Northern", "Southern", "Eastern", "Western"];

pub const API_URL_ENV: &str = "UMURAGE_API_URL";
pub const LOG_LEVEL_ENV: &str = "UMURAGE_LOG_LEVEL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub default_kind: ContentKind,
    pub audience: Audience,
    pub related_limit: usize,
    pub regions: Vec<String>,
    pub log_level: log::LevelFilter,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub kind: Option<ContentKind>,
    pub admin: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.umurage/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".umurage").join("config.toml"))
}

/// Load config from `~/.umurage/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `UmurageConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<UmurageConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(UmurageConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<UmurageConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(UmurageConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: UmurageConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Umurage Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_kind = "story"             # "story", "proverb", "music" or "art"
# admin = false                      # show every status and the submissions queue
# log_level = "info"                 # Or set UMURAGE_LOG_LEVEL env var

# [api]
# base_url = "http://localhost:5000/api"   # Or set UMURAGE_API_URL env var
# timeout_secs = 10

# [browse]
# related_limit = 3
# regions = ["Kigali", "Northern", "Southern", "Eastern", "Western"]
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &UmurageConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &UmurageConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // API base URL: CLI → env → config → default
    let api_base_url = cli
        .api_url
        .clone()
        .or_else(|| env(API_URL_ENV).filter(|s| !s.trim().is_empty()))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Kind: CLI → config → default
    let default_kind = cli
        .kind
        .or(config.general.default_kind)
        .unwrap_or_default();

    // Admin: CLI flag can only turn it on
    let audience = if cli.admin || config.general.admin.unwrap_or(false) {
        Audience::Admin
    } else {
        Audience::Public
    };

    // Log level: env → config → default
    let level_name = env(LOG_LEVEL_ENV)
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let log_level = level_name.parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using {}", level_name, DEFAULT_LOG_LEVEL);
        log::LevelFilter::Info
    });

    let regions = config
        .browse
        .regions
        .clone()
        .unwrap_or_else(|| DEFAULT_REGIONS.iter().map(|r| r.to_string()).collect());

    ResolvedConfig {
        api_base_url,
        timeout: Duration::from_secs(config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        default_kind,
        audience,
        related_limit: config.browse.related_limit.unwrap_or(DEFAULT_RELATED_LIMIT),
        regions,
        log_level,
    }
}
