use std::fmt;

use serde::{Deserialize, Serialize};

/// Device credentials issued by the registry on first registration.
///
/// Written exactly once, when the device is created. Never regenerated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClientAuth {
    pub user_id: String,
    pub client_id: String,
    pub client_password: String,
}

impl fmt::Debug for ClientAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientAuth")
            .field("user_id", &self.user_id)
            .field("client_id", &self.client_id)
            .field("client_password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_hides_password() {
        let auth = ClientAuth {
            user_id: "tech-1".into(),
            client_id: "5403".into(),
            client_password: "rtxSrK2f".into(),
        };
        let rendered = format!("{auth:?}");
        assert!(rendered.contains("5403"));
        assert!(!rendered.contains("rtxSrK2f"));
    }
}
