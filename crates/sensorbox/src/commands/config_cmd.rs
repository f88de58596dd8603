//! Config subcommand handlers.

use dialoguer::{Input, Select};

use sensorbox_config::{Config, DEFAULT_REGISTRY, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
    available.sort();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

fn prompt_api_key() -> Result<String, CliError> {
    let key = rpassword::prompt_password("API key: ").map_err(prompt_err)?;
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "api_key".into(),
            reason: "API key cannot be empty".into(),
        });
    }
    Ok(key)
}

/// Apply `key = value` to a profile.
fn set_profile_field(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "registry" => {
            sensorbox_config::parse_registry_url(&value)?;
            profile.registry = value;
        }
        "org_id" | "org-id" => profile.org_id = Some(value),
        "api_key" | "api-key" => profile.api_key = Some(value),
        "api_key_env" | "api-key-env" => profile.api_key_env = Some(value),
        "conf_dir" | "conf-dir" => profile.conf_dir = Some(value.into()),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: registry, org_id, \
                     api_key, api_key_env, conf_dir, ca_cert, timeout"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("sensorbox configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let registry: String = Input::new()
                .with_prompt("Registry URL")
                .default(DEFAULT_REGISTRY.into())
                .interact_text()
                .map_err(prompt_err)?;
            sensorbox_config::parse_registry_url(&registry)?;

            let org_id: String = Input::new()
                .with_prompt("Organisation id")
                .interact_text()
                .map_err(prompt_err)?;

            let key = prompt_api_key()?;
            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the API key?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let api_key = if store_selection == 0 {
                sensorbox_config::store_api_key(&profile_name, &key)?;
                eprintln!("   ✓ API key stored in system keyring");
                None
            } else {
                Some(key)
            };

            let conf_dir: String = Input::new()
                .with_prompt("Document directory")
                .default(sensorbox_config::default_conf_dir().display().to_string())
                .interact_text()
                .map_err(prompt_err)?;

            let profile = Profile {
                registry,
                org_id: Some(org_id),
                api_key,
                conf_dir: Some(conf_dir.into()),
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: sensorbox organisation");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::emit(global.output, &cfg, global.quiet)
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_field(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: sensorbox config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(name, &cfg));
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetKey ──────────────────────────────────────────────────
        ConfigCommand::SetKey => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(profile_not_found(profile_name, &cfg));
            }

            let key = prompt_api_key()?;
            sensorbox_config::store_api_key(&profile_name, &key)?;
            eprintln!("✓ API key stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut profile = Profile::default();
        set_profile_field(&mut profile, "org-id", "acme".into()).unwrap();
        set_profile_field(&mut profile, "timeout", "45".into()).unwrap();
        set_profile_field(&mut profile, "registry", "http://localhost:8080".into()).unwrap();
        assert_eq!(profile.org_id.as_deref(), Some("acme"));
        assert_eq!(profile.timeout, Some(45));
        assert_eq!(profile.registry, "http://localhost:8080");
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut profile = Profile::default();
        assert!(matches!(
            set_profile_field(&mut profile, "site", "x".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(set_profile_field(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_field(&mut profile, "registry", "ftp://x".into()).is_err());
    }
}
