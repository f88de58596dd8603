// Organisation reconciliation: create once, then merge supplied fields.

use tracing::info;

use super::{Outcome, Reconcile, reconcile};
use crate::error::CoreError;
use crate::model::{Organisation, OrganisationUpdate};
use crate::registry::Registry;

/// Ensures the organisation exists and carries the supplied fields.
pub struct OrganisationReconciler<'a, R> {
    registry: &'a R,
    org_id: &'a str,
}

impl<'a, R: Registry> OrganisationReconciler<'a, R> {
    pub fn new(registry: &'a R, org_id: &'a str) -> Self {
        Self { registry, org_id }
    }

    /// Create or update the organisation.
    ///
    /// An empty `fields` is a query: it returns the organisation unchanged,
    /// or fails with `IncompleteConfiguration` if none is registered.
    pub async fn ensure(
        &self,
        fields: &OrganisationUpdate,
    ) -> Result<Outcome<Organisation>, CoreError> {
        reconcile(self, fields).await
    }
}

impl<R: Registry> Reconcile for OrganisationReconciler<'_, R> {
    type Entity = Organisation;
    type Desired = OrganisationUpdate;

    async fn find(&self) -> Result<Option<Organisation>, CoreError> {
        self.registry.find_organisation(self.org_id).await
    }

    async fn create(&self, desired: &OrganisationUpdate) -> Result<Organisation, CoreError> {
        let org = desired.complete(self.org_id).ok_or_else(|| {
            CoreError::incomplete(format!(
                "no organisation {} is registered; name, website, description and email must all be set",
                self.org_id
            ))
        })?;

        info!(org_id = self.org_id, "creating organisation");
        self.registry.create_organisation(&org).await
    }

    async fn update(
        &self,
        current: &Organisation,
        desired: &OrganisationUpdate,
    ) -> Result<Option<Organisation>, CoreError> {
        if desired.is_empty() {
            return Ok(None);
        }
        let merged = desired.apply(current);
        if merged == *current {
            return Ok(None);
        }

        info!(org_id = self.org_id, "updating organisation");
        self.registry.update_organisation(&merged).await?;

        let refreshed = self.registry.find_organisation(self.org_id).await?;
        refreshed.map(Some).ok_or_else(|| CoreError::NotFound {
            entity_type: "organisation".into(),
            identifier: self.org_id.to_owned(),
        })
    }
}
