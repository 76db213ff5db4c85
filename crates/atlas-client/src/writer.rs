//! The write seam between the publisher and the remote catalog.

use std::future::Future;

use crate::error::CatalogError;
use crate::http::check_response;
use crate::types::{AtlasEntity, AtlasRelationship, EntitiesBody, EntityMutations};
use crate::AtlasClient;

/// Write operations the publisher needs from a catalog.
///
/// [`AtlasClient`] talks to a live Atlas server; tests supply in-memory
/// implementations.
pub trait CatalogWriter {
    /// Create or update a bundle of entities in one request.
    ///
    /// Entities are matched on their unique attributes, so re-sending the
    /// same bundle updates rather than duplicates.
    fn create_entities(
        &self,
        entities: &[AtlasEntity],
    ) -> impl Future<Output = Result<EntityMutations, CatalogError>> + Send;

    /// Create one relationship between two entity references.
    ///
    /// Fails with [`CatalogError::Duplicate`] if it already exists.
    fn create_relationship(
        &self,
        relationship: &AtlasRelationship,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;
}

impl CatalogWriter for AtlasClient {
    async fn create_entities(
        &self,
        entities: &[AtlasEntity],
    ) -> Result<EntityMutations, CatalogError> {
        let url = self.url("entity/bulk");
        let resp = self
            .request(self.http.post(&url))
            .json(&EntitiesBody { entities })
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(EntityMutations::default());
        }
        let mutations: EntityMutations =
            serde_json::from_str(&text).map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::debug!(
            requested = entities.len(),
            mutated = mutations.total(),
            "entity bulk request accepted"
        );
        Ok(mutations)
    }

    async fn create_relationship(
        &self,
        relationship: &AtlasRelationship,
    ) -> Result<(), CatalogError> {
        let url = self.url("relationship");
        let resp = self
            .request(self.http.post(&url))
            .json(relationship)
            .send()
            .await?;
        check_response(resp).await?;

        tracing::debug!(
            relationship = %relationship.type_name,
            end1 = relationship.end1.qualified_name(),
            end2 = relationship.end2.qualified_name(),
            "relationship created"
        );
        Ok(())
    }
}
