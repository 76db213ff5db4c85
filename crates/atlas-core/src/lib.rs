//! # atlas-core
//!
//! Core types shared by every crate in the Atlas publishing workspace.
//!
//! - Identity keys translating between Atlas qualified names and
//!   catalog keys (`source://cluster.db/table[/column]`)
//! - In-memory entity and relationship models produced by extractors
//! - The record serializer flattening models into `-elo` suffixed records
//! - The CSV record-file codec shared by writers and the publisher
//! - Cross-cutting error types

pub mod errors;
pub mod fields;
pub mod keys;
pub mod model;
pub mod record_file;
pub mod serializer;

pub use errors::CoreError;
pub use keys::{ColumnKey, EntityKey, IdentityKey, KeyDetails, TableKey};
pub use model::{Entity, EntityRelationship, Relationship};
pub use serializer::Record;
