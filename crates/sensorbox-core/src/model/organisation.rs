use serde::{Deserialize, Serialize};

/// An organisation in the registry. `org_id` is an immutable slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Organisation {
    pub org_id: String,
    pub name: String,
    pub website: String,
    pub description: String,
    pub email: String,
}

/// Explicitly supplied organisation fields. `None` means "keep the
/// registry's value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganisationUpdate {
    pub name: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
}

impl OrganisationUpdate {
    /// No fields supplied: a query.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.website.is_none()
            && self.description.is_none()
            && self.email.is_none()
    }

    /// Every field supplied: enough to create.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.website.is_some()
            && self.description.is_some()
            && self.email.is_some()
    }

    /// Overlay the supplied fields on an existing record.
    pub fn apply(&self, current: &Organisation) -> Organisation {
        Organisation {
            org_id: current.org_id.clone(),
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            website: self.website.clone().unwrap_or_else(|| current.website.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
        }
    }

    /// Build a new organisation, if every field was supplied.
    pub fn complete(&self, org_id: &str) -> Option<Organisation> {
        Some(Organisation {
            org_id: org_id.to_owned(),
            name: self.name.clone()?,
            website: self.website.clone()?,
            description: self.description.clone()?,
            email: self.email.clone()?,
        })
    }
}
