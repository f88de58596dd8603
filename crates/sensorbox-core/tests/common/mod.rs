// In-memory registry and document fixtures shared by the reconcile tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use sensorbox_core::document::SensorCalib;
use sensorbox_core::model::{DeviceSpec, IssuedDevice, NewTopic, TopicUpdate};
use sensorbox_core::{
    AfeCalib, ConfStore, CoreError, Device, OpcConf, Organisation, Registry, SystemId, Topic, User,
};

// ── Fake registry ───────────────────────────────────────────────────

#[derive(Default)]
struct State {
    orgs: BTreeMap<String, Organisation>,
    users: BTreeSet<String>,
    devices: Vec<Device>,
    topics: BTreeMap<String, Topic>,
    creates: usize,
    updates: usize,
    next_client_id: u32,
}

/// Registry held in memory. Counts every create and update call.
#[derive(Default)]
pub struct FakeRegistry {
    state: RefCell<State>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user_id: &str) -> Self {
        self.state.borrow_mut().users.insert(user_id.to_owned());
        self
    }

    pub fn with_org(self, org: Organisation) -> Self {
        self.state.borrow_mut().orgs.insert(org.org_id.clone(), org);
        self
    }

    pub fn with_device(self, device: Device) -> Self {
        self.state.borrow_mut().devices.push(device);
        self
    }

    pub fn with_topic(self, topic: Topic) -> Self {
        self.state.borrow_mut().topics.insert(topic.path.clone(), topic);
        self
    }

    pub fn creates(&self) -> usize {
        self.state.borrow().creates
    }

    pub fn updates(&self) -> usize {
        self.state.borrow().updates
    }

    pub fn writes(&self) -> usize {
        self.creates() + self.updates()
    }

    pub fn device_count(&self) -> usize {
        self.state.borrow().devices.len()
    }

    pub fn topic(&self, path: &str) -> Option<Topic> {
        self.state.borrow().topics.get(path).cloned()
    }

    pub fn topic_paths(&self) -> Vec<String> {
        self.state.borrow().topics.keys().cloned().collect()
    }
}

impl Registry for FakeRegistry {
    async fn find_organisation(&self, org_id: &str) -> Result<Option<Organisation>, CoreError> {
        Ok(self.state.borrow().orgs.get(org_id).cloned())
    }

    async fn create_organisation(&self, org: &Organisation) -> Result<Organisation, CoreError> {
        let mut state = self.state.borrow_mut();
        state.creates += 1;
        state.orgs.insert(org.org_id.clone(), org.clone());
        Ok(org.clone())
    }

    async fn update_organisation(&self, org: &Organisation) -> Result<(), CoreError> {
        let mut state = self.state.borrow_mut();
        state.updates += 1;
        state.orgs.insert(org.org_id.clone(), org.clone());
        Ok(())
    }

    async fn find_public_user(&self, user_id: &str) -> Result<Option<User>, CoreError> {
        Ok(self.state.borrow().users.contains(user_id).then(|| User {
            user_id: user_id.to_owned(),
            name: None,
        }))
    }

    async fn find_device_by_name(
        &self,
        org_id: &str,
        name: &str,
    ) -> Result<Option<Device>, CoreError> {
        Ok(self
            .state
            .borrow()
            .devices
            .iter()
            .find(|d| d.org_id == org_id && d.name == name)
            .cloned())
    }

    async fn find_device(
        &self,
        org_id: &str,
        client_id: &str,
    ) -> Result<Option<Device>, CoreError> {
        Ok(self
            .state
            .borrow()
            .devices
            .iter()
            .find(|d| d.org_id == org_id && d.client_id == client_id)
            .cloned())
    }

    async fn create_device(
        &self,
        user_id: &str,
        spec: &DeviceSpec,
    ) -> Result<IssuedDevice, CoreError> {
        let mut state = self.state.borrow_mut();
        state.creates += 1;
        state.next_client_id += 1;
        let client_id = format!("{}", 5400 + state.next_client_id);
        let device = Device {
            org_id: spec.org_id.clone(),
            client_id: client_id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            location: Some(spec.location.clone()),
            tags: spec.tags.clone(),
            owner_id: Some(user_id.to_owned()),
        };
        state.devices.push(device.clone());
        Ok(IssuedDevice {
            device,
            client_password: format!("pw-{client_id}"),
        })
    }

    async fn update_device(&self, device: &Device) -> Result<(), CoreError> {
        let mut state = self.state.borrow_mut();
        state.updates += 1;
        let slot = state
            .devices
            .iter_mut()
            .find(|d| d.client_id == device.client_id)
            .unwrap();
        *slot = device.clone();
        Ok(())
    }

    async fn find_topic(&self, path: &str) -> Result<Option<Topic>, CoreError> {
        Ok(self.topic(path))
    }

    async fn find_topics_for_org(
        &self,
        org_id: &str,
        path: &str,
    ) -> Result<Vec<Topic>, CoreError> {
        let org_prefix = format!("/orgs/{org_id}/");
        Ok(self
            .state
            .borrow()
            .topics
            .values()
            .filter(|t| t.path.starts_with(&org_prefix) && t.path.starts_with(path))
            .cloned()
            .collect())
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, CoreError> {
        let mut state = self.state.borrow_mut();
        state.creates += 1;
        let created = Topic {
            path: topic.path.clone(),
            name: topic.name.clone(),
            description: topic.description.clone(),
            is_public: topic.is_public,
            info: Some(topic.info.clone()),
            contributors_can_read: Some(topic.contributors_can_read),
            schema_id: Some(topic.schema_id.clone()),
        };
        state.topics.insert(created.path.clone(), created.clone());
        Ok(created)
    }

    async fn update_topic(&self, path: &str, update: &TopicUpdate) -> Result<(), CoreError> {
        let mut state = self.state.borrow_mut();
        state.updates += 1;
        let topic = state.topics.get_mut(path).unwrap();
        topic.name = update.name.clone();
        topic.description = update.description.clone();
        topic.is_public = update.is_public;
        topic.info = update.info.clone();
        Ok(())
    }
}

// ── Document fixtures ───────────────────────────────────────────────

pub const ORG: &str = "acme";
pub const BOX_LABEL: &str = "scs-bgx-401";

pub fn system_id() -> SystemId {
    SystemId {
        vendor_id: "SCS".into(),
        model_id: "BGX".into(),
        model_name: "Praxis".into(),
        configuration: "BGX-INDOOR".into(),
        system_serial_number: 401,
    }
}

pub fn afe_calib(gases: &[&str]) -> AfeCalib {
    AfeCalib {
        serial_number: "27-000001".into(),
        afe_type: "810-0023-02".into(),
        calibrated_on: None,
        sensors: gases
            .iter()
            .map(|g| {
                Some(SensorCalib {
                    serial_number: format!("sn-{g}"),
                    sensor_type: format!("{g}A4"),
                    gas_name: (*g).to_owned(),
                    values: serde_json::Map::new(),
                })
            })
            .collect(),
    }
}

pub fn opc_conf(model: &str) -> OpcConf {
    OpcConf {
        model: model.into(),
        sample_period: 10,
        power_saving: false,
    }
}

/// A store holding SystemID, AFECalib (NO2, CO) and an OPC with a monitor.
pub fn populated_store() -> (tempfile::TempDir, ConfStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfStore::open(dir.path().join("conf"));
    store.save(&system_id()).unwrap();
    store.save(&afe_calib(&["NO2", "CO"])).unwrap();
    store.save(&opc_conf("N2")).unwrap();
    (dir, store)
}
