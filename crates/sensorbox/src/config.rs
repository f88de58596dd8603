//! Profile resolution with CLI flag overrides.
//!
//! `sensorbox-config` owns the TOML file and the credential chain; this
//! module layers `GlobalOpts` on top and produces the `RegistryConfig`
//! and `ConfStore` a command runs against.

use std::path::PathBuf;

use tracing::debug;

use sensorbox_config::{Config, Overrides};
use sensorbox_core::{ConfStore, RegistryConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use sensorbox_config::{config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `RegistryConfig` from the config file, profile, and CLI overrides.
pub fn resolve_registry_config(global: &GlobalOpts) -> Result<RegistryConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let overrides = Overrides {
        registry: global.registry.clone(),
        api_key: global.api_key.clone(),
        org_id: global.org_id.clone(),
        timeout: global.timeout,
    };

    let registry_config = sensorbox_config::resolve_registry_config(&cfg, &profile_name, &overrides)?;
    debug!(
        profile = %profile_name,
        registry = %registry_config.url,
        org_id = ?registry_config.org_id,
        timeout = ?registry_config.timeout,
        "resolved registry config"
    );
    Ok(registry_config)
}

/// Directory of the local document store: flag, then profile, then the
/// platform data directory.
pub fn resolve_conf_dir(global: &GlobalOpts) -> PathBuf {
    if let Some(dir) = &global.conf_dir {
        return dir.clone();
    }
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    cfg.profiles
        .get(&profile_name)
        .and_then(|p| p.conf_dir.clone())
        .unwrap_or_else(sensorbox_config::default_conf_dir)
}

/// Open the local document store for this invocation.
pub fn open_store(global: &GlobalOpts) -> ConfStore {
    let root = resolve_conf_dir(global);
    debug!(root = %root.display(), "opening conf store");
    ConfStore::open(root)
}
