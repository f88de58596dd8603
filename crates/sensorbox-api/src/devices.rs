// Registry device ("client") endpoints
//
// Devices are org-scoped for reads and updates, but created under the
// owning user: the registry issues `client-id` and `password` on create.

use tracing::debug;

use crate::client::{RegistryClient, encode_segment};
use crate::error::Error;
use crate::types::{DeviceRequest, DeviceResponse};

impl RegistryClient {
    /// List every device registered to an organisation.
    ///
    /// `GET /v1/orgs/{org_id}/devices`
    pub async fn list_devices(&self, org_id: &str) -> Result<Vec<DeviceResponse>, Error> {
        debug!(org_id, "listing devices");
        self.get(&format!("v1/orgs/{}/devices", encode_segment(org_id)))
            .await
    }

    /// Get a single device by its registry-assigned client id.
    ///
    /// `GET /v1/orgs/{org_id}/devices/{client_id}` -- a 404 yields `None`.
    pub async fn find_device(
        &self,
        org_id: &str,
        client_id: &str,
    ) -> Result<Option<DeviceResponse>, Error> {
        debug!(org_id, client_id, "finding device");
        self.get_optional(&format!(
            "v1/orgs/{}/devices/{}",
            encode_segment(org_id),
            encode_segment(client_id)
        ))
        .await
    }

    /// Register a new device owned by `user_id`.
    ///
    /// `POST /v1/users/{user_id}/devices`
    pub async fn create_device(
        &self,
        user_id: &str,
        device: &DeviceRequest,
    ) -> Result<DeviceResponse, Error> {
        debug!(user_id, name = %device.name, "creating device");
        self.post(&format!("v1/users/{}/devices", encode_segment(user_id)), device)
            .await
    }

    /// Update a device's mutable fields.
    ///
    /// `PUT /v1/orgs/{org_id}/devices/{client_id}`
    pub async fn update_device(
        &self,
        org_id: &str,
        client_id: &str,
        device: &DeviceRequest,
    ) -> Result<(), Error> {
        debug!(org_id, client_id, "updating device");
        self.put(
            &format!(
                "v1/orgs/{}/devices/{}",
                encode_segment(org_id),
                encode_segment(client_id)
            ),
            device,
        )
        .await
    }
}
