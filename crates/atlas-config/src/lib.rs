//! # atlas-config
//!
//! Layered configuration loading for the Atlas publisher using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ATLAS_*` prefix, `__` as separator)
//! 2. An explicit file passed to [`AtlasConfig::load_from_file`]
//! 3. Project-level `.atlas-publisher/config.toml`
//! 4. User-level `~/.config/atlas-publisher/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ATLAS_PUBLISHER__BATCH_SIZE` -> `publisher.batch_size`,
//! `ATLAS_CATALOG__ENDPOINT` -> `catalog.endpoint`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use atlas_config::AtlasConfig;
//!
//! let config = AtlasConfig::load_with_dotenv().expect("config");
//! if config.catalog.is_configured() {
//!     println!("Atlas endpoint: {}", config.catalog.endpoint);
//! }
//! ```

mod catalog;
mod error;
mod publisher;

pub use catalog::CatalogConfig;
pub use error::ConfigError;
pub use publisher::PublisherConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub publisher: PublisherConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AtlasConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`AtlasConfig::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`AtlasConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file layered above the
    /// discovered files and below environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the file does not exist, or
    /// [`ConfigError::Figment`] if it cannot be parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::InvalidValue {
                field: "config".to_string(),
                reason: format!("{} is not a file", path.display()),
            });
        }
        Self::layered(Some(path)).extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::layered(None)
    }

    fn layered(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".atlas-publisher/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("ATLAS_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("atlas-publisher").join("config.toml"))
    }
}
