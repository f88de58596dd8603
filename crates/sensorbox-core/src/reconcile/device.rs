// Device reconciliation.
//
// A device is UNREGISTERED until the registry creates it and issues its
// credentials, then REGISTERED for good. Credentials are written to the
// local store exactly once, at creation.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::{Outcome, Reconcile, converge};
use crate::derive::DesiredState;
use crate::document::ClientAuth;
use crate::error::CoreError;
use crate::model::{Device, DeviceSpec, DeviceUpdate};
use crate::registry::Registry;
use crate::store::ConfStore;

/// Target device state: technician-supplied fields plus derived tags.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredDevice {
    pub update: DeviceUpdate,
    pub tags: BTreeSet<String>,
    pub default_description: String,
}

impl DesiredDevice {
    pub fn new(state: &DesiredState, update: DeviceUpdate) -> Self {
        Self {
            update,
            tags: state.tags.clone(),
            default_description: state.device_description.clone(),
        }
    }
}

/// Registers this appliance with the registry, or updates its record.
pub struct DeviceReconciler<'a, R> {
    registry: &'a R,
    store: &'a ConfStore,
    org_id: &'a str,
    box_label: &'a str,
}

impl<'a, R: Registry> DeviceReconciler<'a, R> {
    pub fn new(registry: &'a R, store: &'a ConfStore, org_id: &'a str, box_label: &'a str) -> Self {
        Self {
            registry,
            store,
            org_id,
            box_label,
        }
    }

    /// The registered device with this appliance's box label, if any.
    pub async fn find_existing(&self) -> Result<Option<Device>, CoreError> {
        self.registry
            .find_device_by_name(self.org_id, self.box_label)
            .await
    }

    /// Create the device or update its mutable fields, and return it with
    /// the local credentials.
    ///
    /// Creating needs a known user id and a location. Updating never changes
    /// the owner and never touches the stored credentials; a different user
    /// id is rejected before the registry is asked about it.
    pub async fn register_or_update(
        &self,
        existing: Option<Device>,
        desired: &DesiredDevice,
    ) -> Result<(Outcome<Device>, ClientAuth), CoreError> {
        let outcome = converge(self, existing, desired).await?;
        let client_auth = self.store.load::<ClientAuth>()?.ok_or_else(|| {
            CoreError::divergence(format!(
                "device {} is registered but no ClientAuth is stored locally",
                outcome.entity().client_id
            ))
        })?;
        Ok((outcome, client_auth))
    }

    /// Query without mutation: the device and whatever credentials are
    /// stored locally, or `None` if nothing is registered.
    pub fn status(
        &self,
        existing: Option<Device>,
    ) -> Result<Option<(Device, Option<ClientAuth>)>, CoreError> {
        let Some(device) = existing else {
            debug!(box_label = self.box_label, "no device registered");
            return Ok(None);
        };
        let client_auth = self.store.load::<ClientAuth>()?;
        Ok(Some((device, client_auth)))
    }
}

impl<R: Registry> Reconcile for DeviceReconciler<'_, R> {
    type Entity = Device;
    type Desired = DesiredDevice;

    async fn find(&self) -> Result<Option<Device>, CoreError> {
        self.find_existing().await
    }

    async fn create(&self, desired: &DesiredDevice) -> Result<Device, CoreError> {
        let (Some(user_id), Some(location)) = (
            desired.update.user_id.as_deref(),
            desired.update.location.as_ref(),
        ) else {
            return Err(CoreError::incomplete(
                "no device is registered; a user id and location must be set",
            ));
        };

        if self.registry.find_public_user(user_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity_type: "user".into(),
                identifier: user_id.to_owned(),
            });
        }

        if let Some(stale) = self.store.load::<ClientAuth>()? {
            return Err(CoreError::divergence(format!(
                "ClientAuth for client {} is stored locally but no device named {} is registered",
                stale.client_id, self.box_label
            )));
        }

        let spec = DeviceSpec {
            org_id: self.org_id.to_owned(),
            name: self.box_label.to_owned(),
            description: desired
                .update
                .description
                .clone()
                .unwrap_or_else(|| desired.default_description.clone()),
            location: location.clone(),
            tags: desired.tags.clone(),
        };

        info!(box_label = self.box_label, user_id, "registering device");
        let issued = self.registry.create_device(user_id, &spec).await?;
        let mut device = issued.device;
        if device.owner_id.is_none() {
            device.owner_id = Some(user_id.to_owned());
        }

        let client_auth = ClientAuth {
            user_id: user_id.to_owned(),
            client_id: device.client_id.clone(),
            client_password: issued.client_password,
        };
        self.store
            .save(&client_auth)
            .map_err(|source| CoreError::CredentialsNotPersisted {
                client_id: device.client_id.clone(),
                source,
            })?;

        info!(client_id = %device.client_id, "device registered, credentials saved");
        Ok(device)
    }

    async fn update(
        &self,
        current: &Device,
        desired: &DesiredDevice,
    ) -> Result<Option<Device>, CoreError> {
        let client_auth = self.store.load::<ClientAuth>()?;

        if let Some(user_id) = desired.update.user_id.as_deref() {
            let owner = current
                .owner_id
                .as_deref()
                .or_else(|| client_auth.as_ref().map(|a| a.user_id.as_str()));
            if owner != Some(user_id) {
                return Err(CoreError::ImmutableField {
                    entity: "device",
                    field: "owner user id",
                });
            }
        }

        let Some(client_auth) = client_auth else {
            return Err(CoreError::divergence(format!(
                "device {} is registered but no ClientAuth is stored locally",
                current.client_id
            )));
        };
        if client_auth.client_id != current.client_id {
            return Err(CoreError::divergence(format!(
                "local ClientAuth is for client {} but the registered device is client {}",
                client_auth.client_id, current.client_id
            )));
        }

        let merged = desired.update.apply(current, &desired.tags);
        if merged == *current {
            debug!(client_id = %current.client_id, "device already up to date");
            return Ok(None);
        }

        info!(client_id = %current.client_id, "updating device");
        self.registry.update_device(&merged).await?;

        let refreshed = self
            .registry
            .find_device(self.org_id, &current.client_id)
            .await?;
        refreshed.map(Some).ok_or_else(|| CoreError::NotFound {
            entity_type: "device".into(),
            identifier: current.client_id.clone(),
        })
    }
}
