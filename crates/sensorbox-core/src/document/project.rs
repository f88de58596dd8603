use serde::{Deserialize, Serialize};

use crate::derive::TopicRole;
use crate::error::CoreError;

/// Where a device publishes: an organisation, a group within it, and a
/// location id. Yields every topic path deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Project {
    pub org_id: String,
    pub group: String,
    pub location_id: String,
}

impl Project {
    /// Build a project, rejecting segments that would collapse or nest paths.
    pub fn construct(org_id: &str, group: &str, location_id: &str) -> Result<Self, CoreError> {
        for (field, value) in [("org id", org_id), ("group", group), ("location id", location_id)] {
            validate_segment(field, value)?;
        }
        Ok(Self {
            org_id: org_id.to_owned(),
            group: group.to_owned(),
            location_id: location_id.to_owned(),
        })
    }

    /// `/orgs/{org}/{group}/loc/{location_id}`
    pub fn location_path(&self) -> String {
        format!("/orgs/{}/{}/loc/{}", self.org_id, self.group, self.location_id)
    }

    /// `/orgs/{org}/{group}/device`
    pub fn device_path(&self) -> String {
        format!("/orgs/{}/{}/device", self.org_id, self.group)
    }

    /// Path of the topic for `role`. Location-scoped roles ignore `box_label`.
    pub fn topic_path(&self, role: TopicRole, box_label: &str) -> String {
        if role.is_device_scoped() {
            format!("{}/{box_label}/{role}", self.device_path())
        } else {
            format!("{}/{role}", self.location_path())
        }
    }
}

fn validate_segment(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            message: format!("{field} must not be empty"),
        });
    }
    if value.contains('/') {
        return Err(CoreError::ValidationFailed {
            message: format!("{field} must not contain '/': {value:?}"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_layout() {
        let project = Project::construct("acme", "field-trial", "2").unwrap();
        assert_eq!(
            project.topic_path(TopicRole::Climate, "scs-bgx-401"),
            "/orgs/acme/field-trial/loc/2/climate"
        );
        assert_eq!(
            project.topic_path(TopicRole::Control, "scs-bgx-401"),
            "/orgs/acme/field-trial/device/scs-bgx-401/control"
        );
    }

    #[test]
    fn construct_rejects_bad_segments() {
        assert!(matches!(
            Project::construct("acme", "", "2"),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            Project::construct("acme", "trial", "2/climate"),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn document_uses_kebab_case_keys() {
        let project = Project::construct("acme", "trial", "2").unwrap();
        let json = serde_json::to_string(&project).unwrap();
        assert_eq!(json, r#"{"org-id":"acme","group":"trial","location-id":"2"}"#);
    }
}
