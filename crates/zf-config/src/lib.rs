//! # zf-config
//!
//! Layered configuration loading for ZenFocus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ZENFOCUS_*` prefix, `__` as separator)
//! 2. Legacy `SUPABASE_URL` / `SUPABASE_KEY` environment variables
//! 3. Project-level `.zenfocus/config.toml`
//! 4. User-level `~/.config/zenfocus/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ZENFOCUS_REMOTE__ENDPOINT_URL` -> `remote.endpoint_url`,
//! `ZENFOCUS_REMOTE__ACCESS_KEY` -> `remote.access_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use zf_config::FocusConfig;
//!
//! let config = FocusConfig::load_with_dotenv().expect("config");
//!
//! if config.is_configured() {
//!     println!("Record service: {}", config.remote.base_url());
//! }
//! ```

mod error;
mod remote;

pub use error::ConfigError;
pub use remote::{PLACEHOLDER_VALUES, RemoteConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for all ZenFocus settings.
pub const ENV_PREFIX: &str = "ZENFOCUS_";

/// Shown whenever the board is asked to work without a usable remote config.
pub const SETUP_GUIDANCE: &str = "Setup required: set ZENFOCUS_REMOTE__ENDPOINT_URL and \
     ZENFOCUS_REMOTE__ACCESS_KEY (or SUPABASE_URL and SUPABASE_KEY), or add a [remote] \
     section to .zenfocus/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FocusConfig {
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl FocusConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".zenfocus/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Legacy variable names
        figment = figment.merge(Self::legacy_env());

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
    }

    /// Whether the board has what it needs to reach the record service.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.remote.is_configured()
    }

    /// Hints for env vars that look intended for ZenFocus but did not land in
    /// the config, usually a single underscore where `__` was needed.
    pub fn unconfigured_warnings<I>(&self, env: I) -> Vec<String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        if self.remote.is_configured() {
            return Vec::new();
        }
        let has_remote_vars = env
            .into_iter()
            .any(|(key, _)| key.starts_with("ZENFOCUS_REMOTE"));
        if has_remote_vars {
            vec![
                "Remote config appears default while ZENFOCUS_REMOTE* env vars exist. Use double underscores (example: ZENFOCUS_REMOTE__ENDPOINT_URL)."
                    .to_string(),
            ]
        } else {
            Vec::new()
        }
    }

    /// `SUPABASE_URL` / `SUPABASE_KEY` mapped onto the `remote` section.
    fn legacy_env() -> Env {
        Env::raw()
            .only(&["SUPABASE_URL", "SUPABASE_KEY"])
            .map(|key| {
                if key.as_str().eq_ignore_ascii_case("SUPABASE_URL") {
                    "remote.endpoint_url".into()
                } else {
                    "remote.access_key".into()
                }
            })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zenfocus").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
