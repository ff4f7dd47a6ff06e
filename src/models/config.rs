//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_PAGE_SIZE;

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings needed to reach the clinic backend.
pub struct ClientConfig {
    pub api_base_url: String,
    /// Bearer token attached to every request, if any.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[cfg(feature = "client")]
impl ClientConfig {
    /// Loads `<dir>/default.yaml`, then the optional `<dir>/<profile>.yaml`,
    /// then `APP_*` environment variables, later sources overriding earlier
    /// ones.
    pub fn load(dir: &std::path::Path, profile: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            // Add `<dir>/default.yaml`
            .add_source(config::File::from(dir.join("default")))
            // Add environment-specific overrides
            .add_source(config::File::from(dir.join(profile)).required(false))
            // Add settings from the environment (with a prefix of APP)
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
