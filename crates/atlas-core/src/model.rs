//! In-memory entity and relationship models produced by extractors.
//!
//! These are the objects handed to the record serializer. Attribute values are
//! kept as JSON values so integers and booleans survive until the record file
//! writer decides how to store them.

use serde_json::{Map, Value};

/// A catalog node, such as a table or a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Atlas type name (e.g. `hive_table`).
    pub type_name: String,
    /// Attribute values keyed by attribute name, without the `-elo` marker.
    pub attributes: Map<String, Value>,
    /// Outbound relationship declarations.
    pub relationships: Vec<EntityRelationship>,
}

impl Entity {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Map::new(),
            relationships: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_relationship(mut self, relationship: EntityRelationship) -> Self {
        self.relationships.push(relationship);
        self
    }
}

/// One outbound reference from an entity, stored in the entity's
/// `relationships` field as `attribute#related_type#qualified_name`.
///
/// The related identity may be given in either key form; it is normalised to
/// a qualified name when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRelationship {
    /// Relationship attribute on the owning entity (e.g. `table`, `columns`).
    pub attribute: String,
    /// Atlas type name of the related entity.
    pub related_type: String,
    /// Raw identity of the related entity.
    pub related_id: String,
}

impl EntityRelationship {
    #[must_use]
    pub fn new(
        attribute: impl Into<String>,
        related_type: impl Into<String>,
        related_id: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            related_type: related_type.into(),
            related_id: related_id.into(),
        }
    }
}

/// A directed, typed edge between two entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Atlas relationship type name (e.g. `hive_table_columns`).
    pub relation_type: String,
    pub entity_type_1: String,
    pub qualified_name_1: String,
    pub entity_type_2: String,
    pub qualified_name_2: String,
    /// Extra relationship attributes, without the `-elo` marker.
    pub attributes: Map<String, Value>,
}

impl Relationship {
    #[must_use]
    pub fn new(
        relation_type: impl Into<String>,
        (entity_type_1, qualified_name_1): (&str, &str),
        (entity_type_2, qualified_name_2): (&str, &str),
    ) -> Self {
        Self {
            relation_type: relation_type.into(),
            entity_type_1: entity_type_1.to_string(),
            qualified_name_1: qualified_name_1.to_string(),
            entity_type_2: entity_type_2.to_string(),
            qualified_name_2: qualified_name_2.to_string(),
            attributes: Map::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// A model that can be flattened into entity and relationship records.
///
/// Producers hand out their entities and relationships one at a time and
/// return `None` once exhausted.
pub trait AtlasSerializable {
    fn next_entity(&mut self) -> Option<Entity>;

    fn next_relationship(&mut self) -> Option<Relationship>;
}
