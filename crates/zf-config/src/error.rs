//! Errors from loading or validating ZenFocus configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed to read or the merged values did not deserialize.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// Required fields are unset or still hold placeholder values.
    #[error("[{section}] is missing {}. {}", .missing.join(", "), crate::SETUP_GUIDANCE)]
    NotConfigured {
        section: &'static str,
        missing: Vec<&'static str>,
    },

    /// A field is set but unusable.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
