//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;

use sensorbox_api::RegistryClient;
use sensorbox_core::{Location, RegistryConfig};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Resolve the registry config and build an authenticated client.
pub fn connect(global: &GlobalOpts) -> Result<(RegistryConfig, RegistryClient), CliError> {
    let registry_config = config::resolve_registry_config(global)?;
    let client = registry_config.client()?;
    Ok((registry_config, client))
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Parse `-l LAT LNG POSTCODE`.
pub fn parse_location(values: Option<Vec<String>>) -> Result<Option<Location>, CliError> {
    let Some(values) = values else {
        return Ok(None);
    };
    let [lat, lng, postcode] = <[String; 3]>::try_from(values).map_err(|v| CliError::Validation {
        field: "location".into(),
        reason: format!("expected LAT LNG POSTCODE, got {} values", v.len()),
    })?;

    let lat = parse_coordinate("latitude", &lat, 90.0)?;
    let lng = parse_coordinate("longitude", &lng, 180.0)?;
    if postcode.trim().is_empty() {
        return Err(CliError::Validation {
            field: "postcode".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(Some(Location { lat, lng, postcode }))
}

fn parse_coordinate(field: &str, raw: &str, bound: f64) -> Result<f64, CliError> {
    let value: f64 = raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a number"),
    })?;
    if !value.is_finite() || value.abs() > bound {
        return Err(CliError::Validation {
            field: field.into(),
            reason: format!("{value} is outside -{bound}..{bound}"),
        });
    }
    Ok(value)
}

/// Stderr spinner, hidden when quiet or not attached to a terminal.
pub fn spinner(message: &'static str, quiet: bool) -> ProgressBar {
    if quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
