// ── API-to-domain type conversions ──
//
// Bridges `sensorbox_api::types` wire structs and the `model` types.
// Field renames (`url` ↔ `website`, `lon` ↔ `lng`, `public` ↔ `is_public`)
// happen here and nowhere else.

use sensorbox_api::types::{
    DeviceRequest, DeviceResponse, LocationPayload, OrganisationRequest, OrganisationResponse,
    TopicInfoPayload, TopicRequest, TopicResponse, UserResponse,
};

use crate::model::{
    Device, DeviceSpec, Location, NewTopic, Organisation, Topic, TopicInfo, TopicUpdate, User,
};

// ── Organisation ───────────────────────────────────────────────────

impl From<OrganisationResponse> for Organisation {
    fn from(r: OrganisationResponse) -> Self {
        Self {
            org_id: r.id,
            name: r.name,
            website: r.url,
            description: r.description,
            email: r.email,
        }
    }
}

/// Request body for creation; carries the id.
pub(crate) fn organisation_create_request(org: &Organisation) -> OrganisationRequest {
    OrganisationRequest {
        id: Some(org.org_id.clone()),
        ..organisation_update_request(org)
    }
}

/// Request body for update; the id travels in the URL only.
pub(crate) fn organisation_update_request(org: &Organisation) -> OrganisationRequest {
    OrganisationRequest {
        id: None,
        name: org.name.clone(),
        url: org.website.clone(),
        description: org.description.clone(),
        email: org.email.clone(),
    }
}

// ── User ───────────────────────────────────────────────────────────

impl From<UserResponse> for User {
    fn from(r: UserResponse) -> Self {
        Self {
            user_id: r.id,
            name: r.name,
        }
    }
}

// ── Device ─────────────────────────────────────────────────────────

impl From<LocationPayload> for Location {
    fn from(p: LocationPayload) -> Self {
        Self {
            lat: p.lat,
            lng: p.lon,
            postcode: p.postcode,
        }
    }
}

impl From<&Location> for LocationPayload {
    fn from(l: &Location) -> Self {
        Self {
            lat: l.lat,
            lon: l.lng,
            postcode: l.postcode.clone(),
        }
    }
}

/// Device reads do not always echo the org id; fall back to the org
/// the device was requested from.
pub(crate) fn device_from_response(r: DeviceResponse, org_id: &str) -> Device {
    Device {
        org_id: r.org_id.unwrap_or_else(|| org_id.to_owned()),
        client_id: r.client_id,
        name: r.name,
        description: r.description,
        location: r.location.map(Location::from),
        tags: r.tags.into_iter().collect(),
        owner_id: r.owner_id,
    }
}

pub(crate) fn device_create_request(spec: &DeviceSpec) -> DeviceRequest {
    DeviceRequest {
        name: spec.name.clone(),
        description: spec.description.clone(),
        location: Some(LocationPayload::from(&spec.location)),
        tags: spec.tags.iter().cloned().collect(),
        org_id: Some(spec.org_id.clone()),
    }
}

pub(crate) fn device_update_request(device: &Device) -> DeviceRequest {
    DeviceRequest {
        name: device.name.clone(),
        description: device.description.clone(),
        location: device.location.as_ref().map(LocationPayload::from),
        tags: device.tags.iter().cloned().collect(),
        org_id: None,
    }
}

// ── Topic ──────────────────────────────────────────────────────────

impl From<TopicInfoPayload> for TopicInfo {
    fn from(p: TopicInfoPayload) -> Self {
        Self {
            format: p.format,
            other: p.other,
        }
    }
}

impl From<TopicInfo> for TopicInfoPayload {
    fn from(i: TopicInfo) -> Self {
        Self {
            format: i.format,
            other: i.other,
        }
    }
}

impl From<TopicResponse> for Topic {
    fn from(r: TopicResponse) -> Self {
        Self {
            path: r.path,
            name: r.name,
            description: r.description,
            is_public: r.public,
            info: r.info.map(TopicInfo::from),
            contributors_can_read: r.contributors_can_read,
            schema_id: r.schema_id,
        }
    }
}

impl From<&NewTopic> for TopicRequest {
    fn from(t: &NewTopic) -> Self {
        Self {
            path: Some(t.path.clone()),
            name: t.name.clone(),
            description: t.description.clone(),
            public: t.is_public,
            info: Some(t.info.clone().into()),
            contributors_can_read: Some(t.contributors_can_read),
            schema_id: Some(t.schema_id.clone()),
        }
    }
}

impl From<&TopicUpdate> for TopicRequest {
    fn from(u: &TopicUpdate) -> Self {
        Self {
            path: None,
            name: u.name.clone(),
            description: u.description.clone(),
            public: u.is_public,
            info: u.info.clone().map(TopicInfoPayload::from),
            contributors_can_read: None,
            schema_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_response_falls_back_to_requested_org() {
        let resp = DeviceResponse {
            client_id: "5403".into(),
            name: "scs-bgx-401".into(),
            password: Some("secret".into()),
            password_is_locked: true,
            description: String::new(),
            location: Some(LocationPayload {
                lat: 50.8,
                lon: -0.1,
                postcode: "BN2".into(),
            }),
            tags: vec!["NO2".into(), "NO2".into()],
            org_id: None,
            owner_id: Some("tech-1".into()),
        };
        let device = device_from_response(resp, "acme");
        assert_eq!(device.org_id, "acme");
        assert_eq!(device.tags.len(), 1);
        assert!((device.location.unwrap().lng + 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn topic_update_never_carries_schema() {
        let update = TopicUpdate {
            name: "Gases".into(),
            description: "NO2".into(),
            is_public: false,
            info: Some(TopicInfo::json()),
        };
        let req = TopicRequest::from(&update);
        assert!(req.schema_id.is_none());
        assert!(!req.public);
    }
}
