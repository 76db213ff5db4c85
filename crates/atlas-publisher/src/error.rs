//! Publish cycle error types.
//!
//! Every variant that can be traced to an input names the offending file, and
//! the row when the failure is specific to one record.

use std::path::PathBuf;

use atlas_client::CatalogError;
use atlas_config::ConfigError;
use atlas_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    /// Publisher configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input directory could not be listed.
    #[error("Failed to list record files in {}: {source}", path.display())]
    ListFiles {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record file could not be opened or its header parsed.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: CoreError },

    /// One record could not be read or turned into a write request.
    #[error("{} record {row}: {source}", path.display())]
    Record {
        path: PathBuf,
        /// 1-based data row, not counting the header.
        row: usize,
        source: CoreError,
    },

    /// The catalog rejected a submission with a non-recoverable error.
    #[error("Catalog rejected a submission from {}: {source}", path.display())]
    Catalog { path: PathBuf, source: CatalogError },
}
