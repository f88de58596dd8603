// ── Runtime registry configuration ──
//
// Describes *how* to reach the registry. Carries credential data and
// transport tuning but never touches disk: the CLI resolves a profile into
// a `RegistryConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use sensorbox_api::{RegistryClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Connection settings for a single registry account.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL (e.g. `https://api.opensensors.io`).
    pub url: Url,
    /// API key sent with every request.
    pub api_key: SecretString,
    /// Organisation the key acts for, when the profile names one.
    pub org_id: Option<String>,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Request timeout.
    pub timeout: Duration,
}

impl RegistryConfig {
    /// The organisation id, or `IncompleteConfiguration` if unset.
    pub fn require_org_id(&self) -> Result<&str, CoreError> {
        self.org_id.as_deref().ok_or_else(|| {
            CoreError::incomplete("no organisation id configured (set --org-id or org_id in the profile)")
        })
    }

    /// Build an authenticated registry client.
    pub fn client(&self) -> Result<RegistryClient, CoreError> {
        let transport = TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        };
        Ok(RegistryClient::from_api_key(
            self.url.as_str(),
            &self.api_key,
            &transport,
        )?)
    }
}
