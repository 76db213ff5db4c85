//! Publish cycle configuration.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublisherConfig {
    /// Directory of entity record files. Unset means no entities are published.
    #[serde(default)]
    pub entity_files_directory: Option<PathBuf>,

    /// Directory of relationship record files. Unset means no relationships are published.
    #[serde(default)]
    pub relation_files_directory: Option<PathBuf>,

    /// Maximum number of entities submitted per transaction.
    #[serde(default)]
    pub batch_size: Option<usize>,
}

impl PublisherConfig {
    /// The configured batch size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] if unset, or
    /// [`ConfigError::InvalidValue`] if zero.
    pub fn batch_size(&self) -> Result<NonZeroUsize, ConfigError> {
        let size = self.batch_size.ok_or_else(|| ConfigError::NotConfigured {
            key: "publisher.batch_size".to_string(),
        })?;
        NonZeroUsize::new(size).ok_or_else(|| ConfigError::InvalidValue {
            field: "publisher.batch_size".to_string(),
            reason: "must be a positive integer".to_string(),
        })
    }

    /// Whether at least one input directory is set.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.entity_files_directory.is_some() || self.relation_files_directory.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = PublisherConfig::default();
        assert!(!config.is_configured());
        assert!(matches!(
            config.batch_size(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn zero_batch_size_is_invalid() {
        let config = PublisherConfig {
            batch_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.batch_size(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn relation_directory_alone_is_configured() {
        let config = PublisherConfig {
            relation_files_directory: Some(PathBuf::from("/tmp/relations")),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
