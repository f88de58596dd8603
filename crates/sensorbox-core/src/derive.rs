// ── Desired-state derivation ──
//
// Pure functions from local documents to the shape remote entities should
// have: device tags, topic schemas and topic paths. Nothing here touches
// the store or the registry.

use std::collections::BTreeSet;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::document::{AfeCalib, OpcConf, Project, SystemId};
use crate::error::CoreError;
use crate::store::ConfStore;

/// Tag added to devices that carry a particulate monitor.
pub const PARTICULATES_TAG: &str = "particulates";

const SCHEMA_PREFIX: &str = "sensorbox";

/// The telemetry streams a device publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TopicRole {
    Climate,
    Gases,
    Particulates,
    Status,
    Control,
}

impl TopicRole {
    /// Status and control live under the device path; the rest under the
    /// location path.
    pub fn is_device_scoped(self) -> bool {
        matches!(self, Self::Status | Self::Control)
    }
}

/// Name, description and schema reference for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TopicSchema {
    pub name: String,
    pub description: String,
    pub schema_id: String,
}

impl TopicSchema {
    fn fixed(role: TopicRole, name: &str, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            schema_id: format!("{SCHEMA_PREFIX}-{role}"),
        }
    }

    pub fn climate() -> Self {
        Self::fixed(
            TopicRole::Climate,
            "Climate",
            "Temperature and relative humidity",
        )
    }

    pub fn particulates() -> Self {
        Self::fixed(
            TopicRole::Particulates,
            "Particulates",
            "Particulate mass density (PM1, PM2.5, PM10)",
        )
    }

    pub fn status() -> Self {
        Self::fixed(TopicRole::Status, "Status", "Device health and status reports")
    }

    pub fn control() -> Self {
        Self::fixed(TopicRole::Control, "Control", "Device control messages")
    }
}

/// Schema for the gases topic of a given set of gas channels.
///
/// The id depends only on the set of names: order and duplicates do not
/// matter, and names compare case-insensitively.
pub fn gases_topic(gas_names: &[String]) -> TopicSchema {
    let set: BTreeSet<String> = gas_names
        .iter()
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty())
        .collect();

    let suffix = if set.is_empty() {
        "none".to_owned()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join("-")
    };

    let description = if gas_names.is_empty() {
        "Electrochemical gas concentrations".to_owned()
    } else {
        format!("Electrochemical gas concentrations: {}", gas_names.join(", "))
    };

    TopicSchema {
        name: "Gases".to_owned(),
        description,
        schema_id: format!("{SCHEMA_PREFIX}-gases-{suffix}"),
    }
}

/// Device tags: one per gas channel, plus `particulates` with a monitor.
pub fn tags(afe_calib: &AfeCalib, include_particulates: bool) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = afe_calib.gas_names().into_iter().collect();
    if include_particulates {
        tags.insert(PARTICULATES_TAG.to_owned());
    }
    tags
}

/// Topic path for a role within a project.
pub fn topic_path(
    role: TopicRole,
    org_id: &str,
    group: &str,
    location_id: &str,
    box_label: &str,
) -> Result<String, CoreError> {
    Ok(Project::construct(org_id, group, location_id)?.topic_path(role, box_label))
}

// ── Desired state ────────────────────────────────────────────────────

/// Target shape of this device's remote entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DesiredState {
    pub box_label: String,
    pub device_description: String,
    pub gas_names: Vec<String>,
    pub tags: BTreeSet<String>,
    pub include_particulates: bool,
    pub gases: TopicSchema,
}

impl DesiredState {
    /// Derive from the local documents. `OpcConf` is optional: without it
    /// there is no particulate monitor.
    pub fn from_documents(
        system_id: Option<&SystemId>,
        afe_calib: Option<&AfeCalib>,
        opc_conf: Option<&OpcConf>,
    ) -> Result<Self, CoreError> {
        let system_id =
            system_id.ok_or_else(|| CoreError::incomplete("SystemID document not available"))?;
        let afe_calib =
            afe_calib.ok_or_else(|| CoreError::incomplete("AFECalib document not available"))?;
        let include_particulates = opc_conf.is_some_and(OpcConf::has_monitor);
        let gas_names = afe_calib.gas_names();

        Ok(Self {
            box_label: system_id.box_label(),
            device_description: system_id.description(),
            tags: tags(afe_calib, include_particulates),
            gases: gases_topic(&gas_names),
            gas_names,
            include_particulates,
        })
    }

    /// Load the documents from `store` and derive.
    pub fn load(store: &ConfStore) -> Result<Self, CoreError> {
        let system_id: Option<SystemId> = store.load()?;
        let afe_calib: Option<AfeCalib> = store.load()?;
        let opc_conf: Option<OpcConf> = store.load()?;
        Self::from_documents(system_id.as_ref(), afe_calib.as_ref(), opc_conf.as_ref())
    }

    /// Roles to provision, in order. Particulates only with a monitor.
    pub fn roles(&self) -> Vec<TopicRole> {
        TopicRole::iter()
            .filter(|r| *r != TopicRole::Particulates || self.include_particulates)
            .collect()
    }

    pub fn schema(&self, role: TopicRole) -> TopicSchema {
        match role {
            TopicRole::Climate => TopicSchema::climate(),
            TopicRole::Gases => self.gases.clone(),
            TopicRole::Particulates => TopicSchema::particulates(),
            TopicRole::Status => TopicSchema::status(),
            TopicRole::Control => TopicSchema::control(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::SensorCalib;

    fn system_id() -> SystemId {
        SystemId {
            vendor_id: "SCS".into(),
            model_id: "BGX".into(),
            model_name: "Praxis".into(),
            configuration: "BGX-INDOOR".into(),
            system_serial_number: 401,
        }
    }

    fn sensor(gas: &str) -> SensorCalib {
        SensorCalib {
            serial_number: format!("sn-{gas}"),
            sensor_type: format!("{gas}A4"),
            gas_name: gas.into(),
            values: serde_json::Map::new(),
        }
    }

    fn afe_calib(gases: &[&str]) -> AfeCalib {
        AfeCalib {
            serial_number: "27-000001".into(),
            afe_type: "810-0023-02".into(),
            calibrated_on: None,
            sensors: gases.iter().map(|g| Some(sensor(g))).chain([None]).collect(),
        }
    }

    fn opc(model: &str) -> OpcConf {
        OpcConf {
            model: model.into(),
            sample_period: 10,
            power_saving: false,
        }
    }

    #[test]
    fn gases_schema_id_depends_only_on_the_set() {
        let a = gases_topic(&["NO2".into(), "CO".into(), "SO2".into()]);
        let b = gases_topic(&["SO2".into(), "NO2".into(), "CO".into(), "NO2".into()]);
        assert_eq!(a.schema_id, b.schema_id);
        assert_eq!(a.schema_id, "sensorbox-gases-co-no2-so2");

        let c = gases_topic(&["NO2".into(), "CO".into()]);
        assert_ne!(a.schema_id, c.schema_id);
    }

    #[test]
    fn gases_schema_without_channels() {
        assert_eq!(gases_topic(&[]).schema_id, "sensorbox-gases-none");
    }

    #[test]
    fn tags_follow_channels_and_monitor() {
        let calib = afe_calib(&["NO2", "CO"]);
        assert_eq!(
            tags(&calib, true),
            BTreeSet::from(["CO".to_owned(), "NO2".to_owned(), "particulates".to_owned()])
        );
        assert!(!tags(&calib, false).contains(PARTICULATES_TAG));
    }

    #[test]
    fn topic_paths_are_distinct_per_role() {
        let paths: HashSet<String> = TopicRole::iter()
            .map(|r| topic_path(r, "acme", "trial", "2", "scs-bgx-401").unwrap())
            .collect();
        assert_eq!(paths.len(), TopicRole::iter().count());
    }

    #[test]
    fn topic_path_is_deterministic() {
        let a = topic_path(TopicRole::Status, "acme", "trial", "2", "scs-bgx-401").unwrap();
        let b = topic_path(TopicRole::Status, "acme", "trial", "2", "scs-bgx-401").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "/orgs/acme/trial/device/scs-bgx-401/status");
    }

    #[test]
    fn desired_state_requires_system_id_and_calibration() {
        let calib = afe_calib(&["NO2"]);
        assert!(matches!(
            DesiredState::from_documents(None, Some(&calib), None),
            Err(CoreError::IncompleteConfiguration { .. })
        ));
        assert!(matches!(
            DesiredState::from_documents(Some(&system_id()), None, None),
            Err(CoreError::IncompleteConfiguration { .. })
        ));
    }

    #[test]
    fn particulates_role_only_with_monitor() {
        let calib = afe_calib(&["NO2"]);
        let sid = system_id();

        let without = DesiredState::from_documents(Some(&sid), Some(&calib), Some(&opc("none")))
            .unwrap();
        assert!(!without.roles().contains(&TopicRole::Particulates));
        assert_eq!(without.roles().len(), 4);

        let with = DesiredState::from_documents(Some(&sid), Some(&calib), Some(&opc("N2"))).unwrap();
        assert!(with.roles().contains(&TopicRole::Particulates));
        assert_eq!(with.box_label, "scs-bgx-401");
        assert_eq!(with.device_description, "Praxis BGX-INDOOR");
    }
}
