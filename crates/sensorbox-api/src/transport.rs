// Shared transport configuration for building reqwest::Client instances.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::error::Error;

const USER_AGENT: &str = concat!("sensorbox/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Add a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by the registry client to inject the `Authorization` header.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if let TlsMode::CustomCa(path) = &self.tls {
            let cert_pem = std::fs::read(path)
                .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&cert_pem)
                .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
