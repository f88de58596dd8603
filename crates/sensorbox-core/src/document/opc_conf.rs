use serde::{Deserialize, Serialize};

/// Particulate monitor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OpcConf {
    #[serde(default)]
    pub model: String,
    pub sample_period: u32,
    #[serde(default)]
    pub power_saving: bool,
}

impl OpcConf {
    /// `true` when a monitor model is configured and it is not `"none"`.
    pub fn has_monitor(&self) -> bool {
        let model = self.model.trim();
        !model.is_empty() && !model.eq_ignore_ascii_case("none")
    }
}
