//! Errors raised while loading or validating publisher configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `ATLAS_*` variable could not be parsed into
    /// [`AtlasConfig`](crate::AtlasConfig).
    #[error("failed to load publisher configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A setting the publish cycle needs is unset, e.g. `publisher.batch_size`
    /// while entity files are waiting.
    #[error("'{key}' is required; set it in config.toml or via {}", env_var(key))]
    NotConfigured { key: String },

    /// A setting is present but unusable.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Environment variable that overrides a dotted config key
/// (`publisher.batch_size` → `ATLAS_PUBLISHER__BATCH_SIZE`).
fn env_var(key: &str) -> String {
    format!("ATLAS_{}", key.to_uppercase().replace('.', "__"))
}
