//! Remote catalog (Apache Atlas) connection configuration.

use serde::{Deserialize, Serialize};

/// Default Atlas REST endpoint.
fn default_endpoint() -> String {
    String::from("http://localhost:21000")
}

/// Default request timeout.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Base URL of the Atlas server, without the `/api/atlas` path.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Basic auth user. Requests are sent unauthenticated when empty.
    #[serde(default)]
    pub username: String,

    /// Basic auth password.
    #[serde(default)]
    pub password: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            username: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}
