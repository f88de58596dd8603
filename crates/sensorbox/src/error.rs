//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sensorbox_config::ConfigError;
use sensorbox_core::{CoreError, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    /// Precondition failures and registry errors.
    pub const GENERAL: i32 = 1;
    /// Invalid arguments.
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to registry at {url}")]
    #[diagnostic(
        code(sensorbox::connection_failed),
        help(
            "Check network access to the registry.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Registry request timed out")]
    #[diagnostic(
        code(sensorbox::timeout),
        help("Increase the timeout with --timeout or check registry responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(sensorbox::auth_failed),
        help(
            "Verify the API key for the active profile.\n\
             Run: sensorbox config set-key"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(sensorbox::no_credentials),
        help(
            "Configure one with: sensorbox config init\n\
             Or set the SENSORBOX_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Preconditions ────────────────────────────────────────────────
    #[error("Incomplete configuration: {message}")]
    #[diagnostic(
        code(sensorbox::incomplete),
        help("Supply the missing fields, or create the missing local documents first.")
    )]
    Incomplete { message: String },

    #[error("The {entity} {field} cannot be changed once set")]
    #[diagnostic(
        code(sensorbox::immutable_field),
        help("Nothing was written. Omit the flag, or restate the current value.")
    )]
    ImmutableField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Local and remote state diverge: {message}")]
    #[diagnostic(
        code(sensorbox::state_divergence),
        help(
            "Compare the local ClientAuth (sensorbox client-auth -v) with the\n\
             registry record and resolve the difference by hand."
        )
    )]
    Divergence { message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(sensorbox::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("Device {client_id} was registered but its credentials could not be saved")]
    #[diagnostic(
        code(sensorbox::credentials_not_persisted),
        help(
            "The registry will not issue the password again. Record the client id\n\
             and re-register the device once the store is writable."
        )
    )]
    CredentialsNotPersisted {
        client_id: String,
        #[source]
        source: StoreError,
    },

    // ── Registry ─────────────────────────────────────────────────────
    #[error("Registry error{}: {message}", registry_detail(.status.as_ref().copied(), .code.as_deref()))]
    #[diagnostic(code(sensorbox::registry_error))]
    Registry {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sensorbox::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sensorbox::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: sensorbox config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(sensorbox::config))]
    Config(Box<ConfigError>),

    // ── Local store ──────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(sensorbox::store),
        help("Check the conf directory (--conf-dir) and the document it names.")
    )]
    Store(#[from] StoreError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(sensorbox::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(sensorbox::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(sensorbox::internal))]
    Internal(String),
}

fn registry_detail(status: Option<u16>, code: Option<&str>) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!(" ({status}, {code})"),
        (Some(status), None) => format!(" ({status})"),
        (None, Some(code)) => format!(" ({code})"),
        (None, None) => String::new(),
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::IncompleteConfiguration { message } => CliError::Incomplete { message },
            CoreError::ImmutableField { entity, field } => CliError::ImmutableField { entity, field },
            CoreError::StateDivergence { message } => CliError::Divergence { message },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },
            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "argument".into(),
                reason: message,
            },
            CoreError::Registry {
                message,
                code,
                status,
            } => CliError::Registry {
                message,
                code,
                status,
            },
            CoreError::CredentialsNotPersisted { client_id, source } => {
                CliError::CredentialsNotPersisted { client_id, source }
            }
            CoreError::Store(e) => CliError::Store(e),
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_usage_error() {
        let err = CliError::from(CoreError::ValidationFailed {
            message: "group must not contain '/'".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn preconditions_exit_with_one() {
        let immutable = CliError::from(CoreError::ImmutableField {
            entity: "device",
            field: "owner user id",
        });
        assert_eq!(immutable.exit_code(), exit_code::GENERAL);

        let incomplete = CliError::from(CoreError::IncompleteConfiguration {
            message: "SystemID not found".into(),
        });
        assert_eq!(incomplete.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn missing_key_keeps_profile_name() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "bench".into(),
        });
        assert!(matches!(err, CliError::NoCredentials { ref profile } if profile == "bench"));
        assert_eq!(err.to_string(), "No API key configured for profile 'bench'");
    }

    #[test]
    fn registry_errors_show_status_and_code() {
        let err = CliError::from(CoreError::Registry {
            message: "path already taken".into(),
            code: Some("conflict".into()),
            status: Some(409),
        });
        assert_eq!(err.to_string(), "Registry error (409, conflict): path already taken");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
