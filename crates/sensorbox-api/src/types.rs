// Wire types for the registry REST API.
//
// Field names follow the registry's kebab-case JSON. Response types are
// lenient (`#[serde(default)]` on anything the registry may omit); request
// types skip `None` so partial bodies never clobber server-side values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Organisations ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrganisationResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OrganisationRequest {
    /// Only sent on creation; the id is immutable afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub url: String,
    pub description: String,
    pub email: String,
}

// ── Users ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Devices ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPayload {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub postcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceResponse {
    pub client_id: String,
    pub name: String,
    /// Only present in the response to a create call.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_is_locked: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<LocationPayload>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationPayload>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

// ── Topics ─────────────────────────────────────────────────────────

/// Topic info block. Keys other than `format` are kept verbatim so that
/// an update can send the block back exactly as the registry issued it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicInfoPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TopicResponse {
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub info: Option<TopicInfoPayload>,
    #[serde(default)]
    pub contributors_can_read: Option<bool>,
    #[serde(default)]
    pub schema_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TopicRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub name: String,
    pub description: String,
    pub public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<TopicInfoPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors_can_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_id: Option<String>,
}
