//! Configuration for the sensorbox CLI.
//!
//! TOML profiles, API-key resolution (env + keyring + plaintext), and
//! translation to `sensorbox_core::RegistryConfig`. The CLI adds
//! `GlobalOpts`-aware overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use sensorbox_api::TlsMode;
use sensorbox_core::RegistryConfig;

/// Keyring service name for stored API keys.
pub const KEYRING_SERVICE: &str = "sensorbox";

/// Registry used when a profile names none.
pub const DEFAULT_REGISTRY: &str = "https://api.opensensors.io";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named registry profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "json-compact".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named registry account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Registry base URL.
    #[serde(default = "default_registry")]
    pub registry: String,

    /// Organisation the API key acts for.
    pub org_id: Option<String>,

    /// API key (plaintext; prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Directory holding the device's local documents.
    pub conf_dir: Option<PathBuf>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

fn default_registry() -> String {
    DEFAULT_REGISTRY.into()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            org_id: None,
            api_key: None,
            api_key_env: None,
            conf_dir: None,
            ca_cert: None,
            timeout: None,
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "sensorbox", "sensorbox")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sensorbox");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of the local document store.
pub fn default_conf_dir() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("conf"),
        |dirs| dirs.data_dir().join("conf"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. Nested keys in the environment use a
/// double underscore, e.g. `SENSORBOX_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SENSORBOX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/api-key"),
    )?)
}

/// Resolve an API key from the credential chain (no CLI flag step).
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store an API key in the system keyring for a profile.
pub fn store_api_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(key)?;
    Ok(())
}

/// Parse and validate a registry URL.
pub fn parse_registry_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "registry".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "registry".into(),
            reason: format!("expected http or https, got '{}'", url.scheme()),
        });
    }
    Ok(url)
}

// ── Registry config resolution ──────────────────────────────────────

/// Values from CLI flags or their env fallbacks. Each one, when set, wins
/// over the profile.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub registry: Option<String>,
    pub api_key: Option<String>,
    pub org_id: Option<String>,
    pub timeout: Option<u64>,
}

/// Build a `RegistryConfig` for `profile_name`, layering `overrides` on top.
///
/// Without a matching profile the overrides alone must supply an API key;
/// the registry falls back to `DEFAULT_REGISTRY`.
pub fn resolve_registry_config(
    cfg: &Config,
    profile_name: &str,
    overrides: &Overrides,
) -> Result<RegistryConfig, ConfigError> {
    let profile = cfg.profiles.get(profile_name);

    let raw_url = overrides
        .registry
        .as_deref()
        .or_else(|| profile.map(|p| p.registry.as_str()))
        .unwrap_or(DEFAULT_REGISTRY);
    let url = parse_registry_url(raw_url)?;

    let api_key = match (&overrides.api_key, profile) {
        (Some(key), _) => SecretString::from(key.clone()),
        (None, Some(profile)) => resolve_api_key(profile, profile_name)?,
        (None, None) => {
            return Err(ConfigError::NoCredentials {
                profile: profile_name.into(),
            });
        }
    };

    let tls = profile
        .and_then(|p| p.ca_cert.clone())
        .map_or(TlsMode::System, TlsMode::CustomCa);
    let timeout = overrides
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(cfg.defaults.timeout);

    Ok(RegistryConfig {
        url,
        api_key,
        org_id: overrides
            .org_id
            .clone()
            .or_else(|| profile.and_then(|p| p.org_id.clone())),
        tls,
        timeout: Duration::from_secs(timeout),
    })
}
