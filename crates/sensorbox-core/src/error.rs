// ── Core error types ──
//
// User-facing errors from sensorbox-core. Consumers never see raw HTTP
// status codes or JSON parse failures from the registry: the
// `From<sensorbox_api::Error>` impl translates them into domain variants.

use thiserror::Error;
use tracing::debug;

use crate::store::StoreError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to registry at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Registry request timed out")]
    Timeout,

    // ── Precondition errors ──────────────────────────────────────────
    /// A required local document is missing, or a first-time creation
    /// was requested without every mandatory field.
    #[error("Incomplete configuration: {message}")]
    IncompleteConfiguration { message: String },

    /// An attempt to change a field that is fixed once the entity exists.
    /// Raised before any remote write.
    #[error("{entity} {field} cannot be changed once set")]
    ImmutableField {
        entity: &'static str,
        field: &'static str,
    },

    /// Local documents and remote entities disagree in a way that cannot be
    /// resolved without a technician.
    #[error("Local and remote state diverge: {message}")]
    StateDivergence { message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Registry errors (wrapped, not exposed raw) ───────────────────
    #[error("Registry error: {message}")]
    Registry {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    /// The registry issued credentials but they could not be written
    /// locally. The device now exists remotely without a ClientAuth.
    #[error("Device {client_id} was registered but its credentials could not be saved: {source}")]
    CredentialsNotPersisted {
        client_id: String,
        #[source]
        source: StoreError,
    },

    // ── Local storage ────────────────────────────────────────────────
    #[error(transparent)]
    Store(#[from] StoreError),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn incomplete(message: impl Into<String>) -> Self {
        Self::IncompleteConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn divergence(message: impl Into<String>) -> Self {
        Self::StateDivergence {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sensorbox_api::Error> for CoreError {
    fn from(err: sensorbox_api::Error) -> Self {
        debug!(transient = err.is_transient(), error = %err, "registry call failed");
        match err {
            sensorbox_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            sensorbox_api::Error::Forbidden { message } => {
                CoreError::AuthenticationFailed { message }
            }
            sensorbox_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Registry {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            sensorbox_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            sensorbox_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sensorbox_api::Error::RateLimited { retry_after_secs } => CoreError::Registry {
                message: format!("Rate limited -- retry after {retry_after_secs}s"),
                code: Some("rate_limited".into()),
                status: Some(429),
            },
            sensorbox_api::Error::Registry {
                message,
                code,
                status,
            } => CoreError::Registry {
                message,
                code,
                status: Some(status),
            },
            sensorbox_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
