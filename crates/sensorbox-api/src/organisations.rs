// Registry organisation endpoints

use tracing::debug;

use crate::client::{RegistryClient, encode_segment};
use crate::error::Error;
use crate::types::{OrganisationRequest, OrganisationResponse};

impl RegistryClient {
    /// Look up an organisation by id.
    ///
    /// `GET /v1/orgs/{org_id}` -- a 404 yields `None`.
    pub async fn find_organisation(
        &self,
        org_id: &str,
    ) -> Result<Option<OrganisationResponse>, Error> {
        debug!(org_id, "finding organisation");
        self.get_optional(&format!("v1/orgs/{}", encode_segment(org_id)))
            .await
    }

    /// Create an organisation.
    ///
    /// `POST /v1/orgs`
    pub async fn create_organisation(
        &self,
        org: &OrganisationRequest,
    ) -> Result<OrganisationResponse, Error> {
        debug!(org_id = ?org.id, "creating organisation");
        self.post("v1/orgs", org).await
    }

    /// Replace the mutable fields of an organisation.
    ///
    /// `PUT /v1/orgs/{org_id}`
    pub async fn update_organisation(
        &self,
        org_id: &str,
        org: &OrganisationRequest,
    ) -> Result<(), Error> {
        debug!(org_id, "updating organisation");
        self.put(&format!("v1/orgs/{}", encode_segment(org_id)), org)
            .await
    }
}
