use thiserror::Error;

/// Top-level error type for the `sensorbox-api` crate.
///
/// Covers every failure mode of a registry call: authentication,
/// transport, structured API errors, and payload decoding.
/// `sensorbox-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Invalid API key (rejected by the registry).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The key is valid but lacks rights on the requested resource.
    #[error("Access denied: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by the registry. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Registry API ────────────────────────────────────────────────
    /// Structured error from the registry.
    #[error("Registry API error (HTTP {status}): {message}")]
    Registry {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Nothing in this crate retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }
}
