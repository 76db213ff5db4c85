//! The publish cycle.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use atlas_client::{AtlasEntity, AtlasRelationship, CatalogWriter};
use atlas_config::PublisherConfig;
use atlas_core::record_file::RecordFileReader;
use atlas_core::{CoreError, Record};
use serde::Serialize;

use crate::batch::batches;
use crate::error::PublishError;
use crate::files::list_files;
use crate::records::{entity_from_record, relationship_from_record};

/// Counts from one completed publish cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishSummary {
    pub entity_files: usize,
    pub entities_submitted: usize,
    pub entity_chunks: usize,
    pub relationship_files: usize,
    pub relationships_created: usize,
    /// Relationships the catalog reported as already existing.
    pub relationships_skipped: usize,
}

/// Publishes CSV record files into a catalog.
///
/// Every entity file is submitted, in chunks of at most `batch_size`, before
/// the first relationship file is read, so relationship endpoints can always
/// be resolved by the catalog. Files are processed in sorted order and records
/// in file order.
pub struct CsvPublisher<W> {
    writer: W,
    config: PublisherConfig,
}

impl<W: CatalogWriter> CsvPublisher<W> {
    #[must_use]
    pub const fn new(writer: W, config: PublisherConfig) -> Self {
        Self { writer, config }
    }

    #[must_use]
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    #[must_use]
    pub const fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Run one publish cycle.
    ///
    /// Re-running against the same files is safe: entity submission is an
    /// upsert and relationships that already exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Config`] if entity files exist but no valid
    /// batch size is configured, a file or record error naming the offending
    /// input, or [`PublishError::Catalog`] for any catalog failure other than
    /// a duplicate relationship. Work done before the failure is not rolled
    /// back.
    pub async fn publish(&self) -> Result<PublishSummary, PublishError> {
        let entity_files = list_files(self.config.entity_files_directory.as_deref())?;
        let relation_files = list_files(self.config.relation_files_directory.as_deref())?;

        tracing::info!(
            entity_files = entity_files.len(),
            relation_files = relation_files.len(),
            "starting publish cycle"
        );

        let mut summary = PublishSummary::default();

        if !entity_files.is_empty() {
            let batch_size = self.config.batch_size()?;
            for path in &entity_files {
                self.publish_entity_file(path, batch_size, &mut summary)
                    .await?;
            }
        }

        for path in &relation_files {
            self.publish_relationship_file(path, &mut summary).await?;
        }

        tracing::info!(
            entities = summary.entities_submitted,
            chunks = summary.entity_chunks,
            relationships = summary.relationships_created,
            skipped = summary.relationships_skipped,
            "publish cycle complete"
        );
        Ok(summary)
    }

    async fn publish_entity_file(
        &self,
        path: &Path,
        batch_size: NonZeroUsize,
        summary: &mut PublishSummary,
    ) -> Result<(), PublishError> {
        let entities: Vec<AtlasEntity> = read_requests(path, entity_from_record)?;
        tracing::info!(file = %path.display(), entities = entities.len(), "publishing entity file");

        for chunk in batches(entities, batch_size) {
            let mutations =
                self.writer
                    .create_entities(&chunk)
                    .await
                    .map_err(|source| PublishError::Catalog {
                        path: path.to_path_buf(),
                        source,
                    })?;

            tracing::debug!(
                file = %path.display(),
                size = chunk.len(),
                created = mutations.count("CREATE"),
                updated = mutations.count("UPDATE"),
                "entity chunk submitted"
            );
            summary.entity_chunks += 1;
            summary.entities_submitted += chunk.len();
        }

        summary.entity_files += 1;
        Ok(())
    }

    async fn publish_relationship_file(
        &self,
        path: &Path,
        summary: &mut PublishSummary,
    ) -> Result<(), PublishError> {
        let relationships: Vec<AtlasRelationship> = read_requests(path, relationship_from_record)?;
        tracing::info!(
            file = %path.display(),
            relationships = relationships.len(),
            "publishing relationship file"
        );

        for relationship in &relationships {
            match self.writer.create_relationship(relationship).await {
                Ok(()) => summary.relationships_created += 1,
                Err(e) if e.is_duplicate() => {
                    tracing::warn!(
                        file = %path.display(),
                        relationship = %relationship.type_name,
                        end1 = relationship.end1.qualified_name(),
                        end2 = relationship.end2.qualified_name(),
                        "relationship already exists, skipping"
                    );
                    summary.relationships_skipped += 1;
                }
                Err(source) => {
                    return Err(PublishError::Catalog {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        summary.relationship_files += 1;
        Ok(())
    }
}

/// Read every record of `path` and convert it into a write request.
///
/// The whole file is converted before anything is submitted, so a malformed
/// record aborts the file without a partial submission.
fn read_requests<T>(
    path: &Path,
    convert: fn(Record) -> Result<T, CoreError>,
) -> Result<Vec<T>, PublishError> {
    let reader = RecordFileReader::open(path).map_err(|source| PublishError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let record_error = |row: usize, source: CoreError| PublishError::Record {
        path: PathBuf::from(path),
        row,
        source,
    };

    let mut requests = Vec::new();
    for (idx, record) in reader.enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| record_error(row, e))?;
        requests.push(convert(record).map_err(|e| record_error(row, e))?);
    }
    Ok(requests)
}
