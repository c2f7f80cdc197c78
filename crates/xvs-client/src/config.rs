use serde::{Deserialize, Serialize};
use xvs_protocol::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://localhost/";
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Connection settings for a [`TowerClient`](crate::TowerClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base URL. Its path, if any, prefixes every API path.
    pub base_url: String,
    pub credentials: Credentials,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Redirect hops followed before giving up.
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            credentials: Credentials::default(),
            insecure: false,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}
