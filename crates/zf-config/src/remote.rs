//! Remote record service configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Values shipped in setup templates. Treated the same as an unset field.
pub const PLACEHOLDER_VALUES: &[&str] = &[
    "YOUR_SUPABASE_URL_HERE",
    "YOUR_SUPABASE_ANON_KEY_HERE",
    "your-url",
    "your-key",
];

/// Default collection holding task records.
fn default_collection() -> String {
    String::from("tasks")
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Base address of the record service (e.g., `https://abc.supabase.co`).
    #[serde(default)]
    pub endpoint_url: String,

    /// Access key sent as both `apikey` and bearer token.
    #[serde(default)]
    pub access_key: String,

    /// Collection (table) name.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            access_key: String::new(),
            collection: default_collection(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Check if the remote config has usable values for every required field.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    /// Report the first problem that keeps this config from being usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when a required field is unset or
    /// still holds a placeholder, and `ConfigError::InvalidValue` when a set
    /// value is malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&'static str> = [
            ("endpoint_url", self.endpoint_url.as_str()),
            ("access_key", self.access_key.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| is_unset(value))
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "remote",
                missing,
            });
        }

        let url = self.endpoint_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "remote.endpoint_url".into(),
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        if self.collection.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remote.collection".into(),
                reason: "collection name must not be empty".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "remote.timeout_secs".into(),
                reason: "timeout must be at least one second".into(),
            });
        }
        Ok(())
    }

    /// Endpoint without trailing slashes, ready for path joining.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.endpoint_url.trim().trim_end_matches('/')
    }
}

fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || PLACEHOLDER_VALUES.contains(&value)
}
