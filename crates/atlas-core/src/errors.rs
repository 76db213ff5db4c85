//! Cross-cutting error types for the Atlas publishing workspace.
//!
//! Errors raised by the remote catalog live in `atlas-client`, and errors
//! bound to a publish cycle (file and row context) live in `atlas-publisher`.

use thiserror::Error;

/// Errors that can be raised while handling identities and records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A raw identifier matched neither the qualified-name nor the catalog-key grammar.
    #[error("Value is neither a valid qualified name nor a catalog key: {raw}")]
    IdentityFormat { raw: String },

    /// A record is missing a structurally required field or has an undecodable one.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The CSV layer failed to read or write a record file.
    #[error("Record file error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while opening or flushing a record file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn identity_format(raw: &str) -> Self {
        Self::IdentityFormat {
            raw: raw.to_string(),
        }
    }
}
