// ── Registry seam ──
//
// The operations the reconcilers need from the remote registry, expressed
// in domain types. `RegistryClient` is the production implementation;
// tests substitute an in-memory registry.

use sensorbox_api::RegistryClient;
use tracing::debug;

use crate::convert::{
    device_create_request, device_from_response, device_update_request,
    organisation_create_request, organisation_update_request,
};
use crate::error::CoreError;
use crate::model::{
    Device, DeviceSpec, IssuedDevice, NewTopic, Organisation, Topic, TopicUpdate, User,
};

/// Remote registry operations, one call per method. Implementations
/// surface transport and auth failures as errors and never retry.
#[allow(async_fn_in_trait)]
pub trait Registry {
    // ── Organisations ──
    async fn find_organisation(&self, org_id: &str) -> Result<Option<Organisation>, CoreError>;
    async fn create_organisation(&self, org: &Organisation) -> Result<Organisation, CoreError>;
    async fn update_organisation(&self, org: &Organisation) -> Result<(), CoreError>;

    // ── Users ──
    async fn find_public_user(&self, user_id: &str) -> Result<Option<User>, CoreError>;

    // ── Devices ──
    async fn find_device_by_name(
        &self,
        org_id: &str,
        name: &str,
    ) -> Result<Option<Device>, CoreError>;
    async fn find_device(&self, org_id: &str, client_id: &str)
    -> Result<Option<Device>, CoreError>;
    async fn create_device(
        &self,
        user_id: &str,
        spec: &DeviceSpec,
    ) -> Result<IssuedDevice, CoreError>;
    async fn update_device(&self, device: &Device) -> Result<(), CoreError>;

    // ── Topics ──
    async fn find_topic(&self, path: &str) -> Result<Option<Topic>, CoreError>;
    async fn find_topics_for_org(&self, org_id: &str, path: &str)
    -> Result<Vec<Topic>, CoreError>;
    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, CoreError>;
    async fn update_topic(&self, path: &str, update: &TopicUpdate) -> Result<(), CoreError>;
}

impl Registry for RegistryClient {
    async fn find_organisation(&self, org_id: &str) -> Result<Option<Organisation>, CoreError> {
        Ok(RegistryClient::find_organisation(self, org_id)
            .await?
            .map(Organisation::from))
    }

    async fn create_organisation(&self, org: &Organisation) -> Result<Organisation, CoreError> {
        let created =
            RegistryClient::create_organisation(self, &organisation_create_request(org)).await?;
        Ok(created.into())
    }

    async fn update_organisation(&self, org: &Organisation) -> Result<(), CoreError> {
        Ok(
            RegistryClient::update_organisation(self, &org.org_id, &organisation_update_request(org))
                .await?,
        )
    }

    async fn find_public_user(&self, user_id: &str) -> Result<Option<User>, CoreError> {
        Ok(RegistryClient::find_public_user(self, user_id)
            .await?
            .map(User::from))
    }

    async fn find_device_by_name(
        &self,
        org_id: &str,
        name: &str,
    ) -> Result<Option<Device>, CoreError> {
        let devices = self.list_devices(org_id).await?;
        debug!(org_id, name, count = devices.len(), "searching devices by name");
        Ok(devices
            .into_iter()
            .find(|d| d.name == name)
            .map(|d| device_from_response(d, org_id)))
    }

    async fn find_device(
        &self,
        org_id: &str,
        client_id: &str,
    ) -> Result<Option<Device>, CoreError> {
        Ok(RegistryClient::find_device(self, org_id, client_id)
            .await?
            .map(|d| device_from_response(d, org_id)))
    }

    async fn create_device(
        &self,
        user_id: &str,
        spec: &DeviceSpec,
    ) -> Result<IssuedDevice, CoreError> {
        let mut created =
            RegistryClient::create_device(self, user_id, &device_create_request(spec)).await?;
        let Some(client_password) = created.password.take() else {
            return Err(CoreError::Registry {
                message: format!(
                    "registry created device {} without issuing a password",
                    created.client_id
                ),
                code: None,
                status: None,
            });
        };
        Ok(IssuedDevice {
            device: device_from_response(created, &spec.org_id),
            client_password,
        })
    }

    async fn update_device(&self, device: &Device) -> Result<(), CoreError> {
        Ok(RegistryClient::update_device(
            self,
            &device.org_id,
            &device.client_id,
            &device_update_request(device),
        )
        .await?)
    }

    async fn find_topic(&self, path: &str) -> Result<Option<Topic>, CoreError> {
        Ok(RegistryClient::find_topic(self, path).await?.map(Topic::from))
    }

    async fn find_topics_for_org(
        &self,
        org_id: &str,
        path: &str,
    ) -> Result<Vec<Topic>, CoreError> {
        Ok(self
            .list_topics(org_id, path)
            .await?
            .into_iter()
            .map(Topic::from)
            .collect())
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, CoreError> {
        Ok(RegistryClient::create_topic(self, &topic.into()).await?.into())
    }

    async fn update_topic(&self, path: &str, update: &TopicUpdate) -> Result<(), CoreError> {
        Ok(RegistryClient::update_topic(self, path, &update.into()).await?)
    }
}
