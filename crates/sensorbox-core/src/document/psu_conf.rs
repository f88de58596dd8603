use serde::{Deserialize, Serialize};

/// Power supply board configuration. Absent when no board is fitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsuConf {
    /// Board model, e.g. `OsloV1` or `PrototypeV1`.
    pub model: String,
}
