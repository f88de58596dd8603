// Hand-crafted async HTTP client for the telemetry registry REST API.
//
// Auth: `Authorization: api-key {key}` header on every request.
// Endpoint groups (organisations, devices, topics, users) are implemented
// as inherent methods in sibling modules; this one owns transport mechanics.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

// ── Error response shape from the registry ───────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the telemetry registry.
///
/// Every call is a single request/response exchange; nothing is cached
/// and nothing is retried. Callers decide what a failure means.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RegistryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization: api-key …` as a default header.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(&format!("api-key {}", api_key.expose_secret()))
            .map_err(|_| Error::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, key_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends in `/` so relative joins keep it.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The registry base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v1/orgs/acme"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    /// GET that maps a 404 to `None` rather than an error.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.handle_response(resp).await.map(Some)
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    /// PUT whose response body is ignored; callers re-read the entity.
    pub(crate) async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => return Error::InvalidApiKey,
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = resp
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);
                return Error::RateLimited { retry_after_secs };
            }
            _ => {}
        }

        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Error::Forbidden {
                message: parsed
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| status.to_string()),
            };
        }

        match parsed {
            Some(err) => Error::Registry {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            },
            None => Error::Registry {
                status: status.as_u16(),
                message: if raw.is_empty() { status.to_string() } else { raw },
                code: None,
            },
        }
    }
}

/// Percent-encode a value for use as a single path segment.
///
/// Topic paths contain `/`, which must not be read as separators. Spaces
/// become `%20`; a `+` in a path is a literal plus.
pub(crate) fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            RegistryClient::from_reqwest("https://registry.test/api", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://registry.test/api/");
        let joined = client.url("v1/orgs/acme").unwrap();
        assert_eq!(joined.as_str(), "https://registry.test/api/v1/orgs/acme");
    }

    #[test]
    fn topic_paths_are_encoded_as_one_segment() {
        assert_eq!(
            encode_segment("/orgs/acme/trial/loc/2/climate"),
            "%2Forgs%2Facme%2Ftrial%2Floc%2F2%2Fclimate"
        );
    }

    #[test]
    fn spaces_are_percent_encoded_not_plus() {
        let encoded = encode_segment("/orgs/acme/field trial/loc/2/gases");
        assert_eq!(encoded, "%2Forgs%2Facme%2Ffield%20trial%2Floc%2F2%2Fgases");
        assert_eq!(
            urlencoding::decode(&encoded).unwrap(),
            "/orgs/acme/field trial/loc/2/gases"
        );
    }
}
