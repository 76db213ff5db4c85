//! Wire types of the Atlas v2 write API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to an entity by type and unique qualified name.
///
/// Serialized as an Atlas object id with unique attributes, so the related
/// entity is resolved by the server without being fetched first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub type_name: String,
    pub unique_attributes: UniqueAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueAttributes {
    pub qualified_name: String,
}

impl EntityReference {
    #[must_use]
    pub fn new(type_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            unique_attributes: UniqueAttributes {
                qualified_name: qualified_name.into(),
            },
        }
    }

    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.unique_attributes.qualified_name
    }
}

/// Value of a relationship attribute: one reference, or several when the
/// same attribute was declared more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedAttribute {
    One(EntityReference),
    Many(Vec<EntityReference>),
}

impl RelatedAttribute {
    fn push(&mut self, reference: EntityReference) {
        match self {
            Self::One(existing) => {
                *self = Self::Many(vec![existing.clone(), reference]);
            }
            Self::Many(references) => references.push(reference),
        }
    }
}

/// An entity create/upsert request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasEntity {
    pub type_name: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationship_attributes: BTreeMap<String, RelatedAttribute>,
}

impl AtlasEntity {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Map::new(),
            relationship_attributes: BTreeMap::new(),
        }
    }

    /// Qualified name attribute, if present as a string.
    #[must_use]
    pub fn qualified_name(&self) -> Option<&str> {
        self.attributes.get("qualifiedName").and_then(Value::as_str)
    }

    /// Add a reference under `attribute`, turning it into a list when the
    /// attribute already holds one.
    pub fn add_relationship(&mut self, attribute: impl Into<String>, reference: EntityReference) {
        match self.relationship_attributes.entry(attribute.into()) {
            std::collections::btree_map::Entry::Occupied(mut entry) => entry.get_mut().push(reference),
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(RelatedAttribute::One(reference));
            }
        }
    }
}

/// A relationship create request between two entity references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasRelationship {
    pub type_name: String,
    pub end1: EntityReference,
    pub end2: EntityReference,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

/// Body of `POST /api/atlas/v2/entity/bulk`.
#[derive(Debug, Serialize)]
pub(crate) struct EntitiesBody<'a> {
    pub entities: &'a [AtlasEntity],
}

/// Header of an entity touched by a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityHeader {
    #[serde(default)]
    pub guid: Option<String>,
    pub type_name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

/// Per-entity outcome of a bulk create/upsert, keyed by operation
/// (`CREATE`, `UPDATE`, `PARTIAL_UPDATE`, `DELETE`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMutations {
    #[serde(default)]
    pub mutated_entities: BTreeMap<String, Vec<EntityHeader>>,
    #[serde(default)]
    pub guid_assignments: BTreeMap<String, String>,
}

impl EntityMutations {
    /// Number of entities reported under `operation`.
    #[must_use]
    pub fn count(&self, operation: &str) -> usize {
        self.mutated_entities.get(operation).map_or(0, Vec::len)
    }

    /// Number of entities touched by any operation.
    #[must_use]
    pub fn total(&self) -> usize {
        self.mutated_entities.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn entity_serializes_to_atlas_shape() {
        let mut entity = AtlasEntity::new("hive_column");
        entity
            .attributes
            .insert("qualifiedName".into(), json!("db.t.c@gold"));
        entity.add_relationship("table", EntityReference::new("hive_table", "db.t@gold"));

        assert_eq!(
            serde_json::to_value(&entity).unwrap(),
            json!({
                "typeName": "hive_column",
                "attributes": {"qualifiedName": "db.t.c@gold"},
                "relationshipAttributes": {
                    "table": {"typeName": "hive_table", "uniqueAttributes": {"qualifiedName": "db.t@gold"}}
                }
            })
        );
        assert_eq!(entity.qualified_name(), Some("db.t.c@gold"));
    }

    #[test]
    fn repeated_relationship_attribute_becomes_list() {
        let mut entity = AtlasEntity::new("hive_table");
        entity.add_relationship("columns", EntityReference::new("hive_column", "db.t.a@gold"));
        entity.add_relationship("columns", EntityReference::new("hive_column", "db.t.b@gold"));
        entity.add_relationship("columns", EntityReference::new("hive_column", "db.t.c@gold"));

        let RelatedAttribute::Many(columns) = &entity.relationship_attributes["columns"] else {
            panic!("expected a list of references");
        };
        let names: Vec<&str> = columns.iter().map(EntityReference::qualified_name).collect();
        assert_eq!(names, vec!["db.t.a@gold", "db.t.b@gold", "db.t.c@gold"]);
    }

    #[test]
    fn entity_without_relationships_omits_field() {
        let value = serde_json::to_value(AtlasEntity::new("hive_db")).unwrap();
        assert!(value.get("relationshipAttributes").is_none());
    }

    #[test]
    fn relationship_serializes_to_atlas_shape() {
        let rel = AtlasRelationship {
            type_name: "hive_table_columns".into(),
            end1: EntityReference::new("hive_table", "db.t@gold"),
            end2: EntityReference::new("hive_column", "db.t.c@gold"),
            attributes: Map::new(),
        };
        assert_eq!(
            serde_json::to_value(&rel).unwrap(),
            json!({
                "typeName": "hive_table_columns",
                "end1": {"typeName": "hive_table", "uniqueAttributes": {"qualifiedName": "db.t@gold"}},
                "end2": {"typeName": "hive_column", "uniqueAttributes": {"qualifiedName": "db.t.c@gold"}},
            })
        );
    }

    #[test]
    fn parses_bulk_mutation_response() {
        let json = r#"{
            "mutatedEntities": {
                "CREATE": [{"guid": "g1", "typeName": "hive_table", "attributes": {"qualifiedName": "db.t@gold"}}],
                "UPDATE": [{"guid": "g2", "typeName": "hive_column"}, {"guid": "g3", "typeName": "hive_column"}]
            },
            "guidAssignments": {"-1": "g1"}
        }"#;
        let mutations: EntityMutations = serde_json::from_str(json).unwrap();
        assert_eq!(mutations.count("CREATE"), 1);
        assert_eq!(mutations.count("UPDATE"), 2);
        assert_eq!(mutations.count("DELETE"), 0);
        assert_eq!(mutations.total(), 3);
        assert_eq!(mutations.guid_assignments["-1"], "g1");
    }

    #[test]
    fn empty_mutation_response() {
        let mutations: EntityMutations = serde_json::from_str("{}").unwrap();
        assert_eq!(mutations.total(), 0);
    }
}
