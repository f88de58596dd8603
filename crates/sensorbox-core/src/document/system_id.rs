use serde::{Deserialize, Serialize};

/// Identity of the appliance as assigned at manufacture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemId {
    pub vendor_id: String,
    pub model_id: String,
    pub model_name: String,
    pub configuration: String,
    pub system_serial_number: u32,
}

impl SystemId {
    /// Device name used in the registry, e.g. `scs-bgx-401`.
    ///
    /// Unique within an organisation; used to find an existing device
    /// before it has a client id.
    pub fn box_label(&self) -> String {
        format!(
            "{}-{}-{}",
            self.vendor_id, self.model_id, self.system_serial_number
        )
        .to_lowercase()
    }

    /// Default device description: `"{model-name} {configuration}"`.
    pub fn description(&self) -> String {
        format!("{} {}", self.model_name, self.configuration)
    }
}
