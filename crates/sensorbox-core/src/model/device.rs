use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Geographic placement of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub postcode: String,
}

/// A device ("client") registered in the registry.
///
/// The password is only ever seen once, in `IssuedDevice`; it is never
/// part of a device read back from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Device {
    pub org_id: String,
    pub client_id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Everything needed to register a new device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSpec {
    pub org_id: String,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub tags: BTreeSet<String>,
}

/// A freshly created device together with its one-time password.
#[derive(Debug, Clone)]
pub struct IssuedDevice {
    pub device: Device,
    pub client_password: String,
}

/// Technician-supplied device fields. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceUpdate {
    pub user_id: Option<String>,
    pub location: Option<Location>,
    pub description: Option<String>,
}

impl DeviceUpdate {
    /// No fields supplied: a query.
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.location.is_none() && self.description.is_none()
    }

    /// Overlay the mutable fields and the derived tag set on a device.
    /// Identity fields are carried over untouched.
    pub fn apply(&self, current: &Device, tags: &BTreeSet<String>) -> Device {
        Device {
            location: self.location.clone().or_else(|| current.location.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            tags: tags.clone(),
            ..current.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_preserves_identity_and_replaces_tags() {
        let current = Device {
            org_id: "acme".into(),
            client_id: "5403".into(),
            name: "scs-bgx-401".into(),
            description: "Praxis BGX-INDOOR".into(),
            location: None,
            tags: BTreeSet::from(["NO2".to_owned()]),
            owner_id: Some("tech-1".into()),
        };
        let update = DeviceUpdate {
            description: Some("roof".into()),
            ..DeviceUpdate::default()
        };
        let tags = BTreeSet::from(["CO".to_owned(), "NO2".to_owned()]);
        let merged = update.apply(&current, &tags);

        assert_eq!(merged.client_id, "5403");
        assert_eq!(merged.owner_id.as_deref(), Some("tech-1"));
        assert_eq!(merged.description, "roof");
        assert_eq!(merged.tags, tags);
        assert!(merged.location.is_none());
    }
}
