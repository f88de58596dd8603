use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Calibration record for the analogue front-end board.
///
/// Each slot holds one electrochemical sensor or is empty (`null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AfeCalib {
    pub serial_number: String,
    #[serde(rename = "type")]
    pub afe_type: String,
    #[serde(default)]
    pub calibrated_on: Option<NaiveDate>,
    pub sensors: Vec<Option<SensorCalib>>,
}

/// One sensor slot. Calibration values beyond the identifying fields are
/// carried opaquely and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SensorCalib {
    pub serial_number: String,
    pub sensor_type: String,
    pub gas_name: String,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl AfeCalib {
    /// Gas names of the populated slots, in slot order.
    pub fn gas_names(&self) -> Vec<String> {
        self.sensors
            .iter()
            .flatten()
            .map(|s| s.gas_name.clone())
            .collect()
    }
}
