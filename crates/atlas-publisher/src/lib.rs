//! # atlas-publisher
//!
//! Publishes entity and relationship record files into Apache Atlas.
//!
//! A publish cycle:
//! 1. Lists the entity and relationship directories (regular files, sorted)
//! 2. Converts each entity file into entity write requests and submits them
//!    in chunks of at most `batch_size`
//! 3. Only then converts each relationship file and submits its
//!    relationships one at a time, skipping those that already exist
//!
//! Any other failure aborts the cycle. Cycles are safe to re-run.

mod batch;
mod error;
mod files;
mod publisher;
mod records;

pub use batch::{Batches, batches};
pub use error::PublishError;
pub use files::list_files;
pub use publisher::{CsvPublisher, PublishSummary};
pub use records::{
    RelationshipDecl, decode_relationships, entity_from_record, relationship_from_record,
};
