//! Record serializer: flattens entities and relationships into records.
//!
//! A record is a flat map from field name to value. Free-form attributes are
//! written as `<attribute>-elo` so downstream readers can tell them apart from
//! reserved fields; the reserved fields themselves are written verbatim.

use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::fields::{
    ENTITY_TYPE_1, ENTITY_TYPE_2, QUALIFIED_NAME_1, QUALIFIED_NAME_2, RELATION_TYPE,
    RELATIONSHIP_PART_SEPARATOR, RELATIONSHIP_SEPARATOR, RELATIONSHIPS, TYPE_NAME,
    UNQUOTED_SUFFIX, suffixed,
};
use crate::keys::resolve_qualified_name;
use crate::model::{AtlasSerializable, Entity, EntityRelationship, Relationship};

/// One serialized entity or relationship.
pub type Record = Map<String, Value>;

/// Flatten an entity into a record.
///
/// `None` yields an empty record, which producers use to mark the end of
/// their stream. Relationship declarations are encoded into the
/// `relationships` field with related identities normalised to qualified
/// names.
///
/// # Errors
///
/// Returns [`CoreError::IdentityFormat`] if a related table or column identity
/// is malformed, or [`CoreError::MalformedRecord`] if a declaration contains a
/// separator character.
pub fn serialize_entity(entity: Option<&Entity>) -> Result<Record, CoreError> {
    let Some(entity) = entity else {
        return Ok(Record::new());
    };

    let mut record = Record::new();
    record.insert(TYPE_NAME.to_string(), Value::from(entity.type_name.as_str()));
    for (name, value) in &entity.attributes {
        record.insert(suffixed(name), value.clone());
    }

    if !entity.relationships.is_empty() {
        let encoded = encode_relationships(&entity.relationships)?;
        record.insert(RELATIONSHIPS.to_string(), Value::String(encoded));
    }

    Ok(record)
}

/// Flatten a relationship into a record.
///
/// The relation type and both endpoints are structural and stay unsuffixed.
#[must_use]
pub fn serialize_relationship(relationship: Option<&Relationship>) -> Record {
    let Some(relationship) = relationship else {
        return Record::new();
    };

    let mut record = Record::new();
    for (field, value) in [
        (RELATION_TYPE, &relationship.relation_type),
        (ENTITY_TYPE_1, &relationship.entity_type_1),
        (QUALIFIED_NAME_1, &relationship.qualified_name_1),
        (ENTITY_TYPE_2, &relationship.entity_type_2),
        (QUALIFIED_NAME_2, &relationship.qualified_name_2),
    ] {
        record.insert(field.to_string(), Value::from(value.as_str()));
    }
    for (name, value) in &relationship.attributes {
        record.insert(suffixed(name), value.clone());
    }

    record
}

/// Marker telling the record file writer to store `value` unquoted.
///
/// Integers and booleans are stored unquoted; everything else gets no marker.
#[must_use]
pub fn unquoted_marker(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => UNQUOTED_SUFFIX,
        Value::Number(n) if n.is_i64() || n.is_u64() => UNQUOTED_SUFFIX,
        _ => "",
    }
}

/// Encode declarations as `attr#type#qualifiedName` joined by `,`.
///
/// # Errors
///
/// See [`serialize_entity`].
pub fn encode_relationships(relationships: &[EntityRelationship]) -> Result<String, CoreError> {
    let mut encoded = Vec::with_capacity(relationships.len());
    for rel in relationships {
        let qualified_name = resolve_qualified_name(&rel.related_type, &rel.related_id)?;

        let has_separator = |s: &str| {
            s.contains(RELATIONSHIP_SEPARATOR) || s.contains(RELATIONSHIP_PART_SEPARATOR)
        };
        if has_separator(&rel.attribute)
            || has_separator(&rel.related_type)
            || qualified_name.contains(RELATIONSHIP_SEPARATOR)
        {
            return Err(CoreError::MalformedRecord(format!(
                "relationship '{}' to '{qualified_name}' contains a reserved separator",
                rel.attribute
            )));
        }

        encoded.push(format!(
            "{}{RELATIONSHIP_PART_SEPARATOR}{}{RELATIONSHIP_PART_SEPARATOR}{qualified_name}",
            rel.attribute, rel.related_type
        ));
    }
    Ok(encoded.join(&RELATIONSHIP_SEPARATOR.to_string()))
}

/// Serialize every entity a producer hands out, stopping at its end marker.
///
/// # Errors
///
/// Propagates the first [`serialize_entity`] failure.
pub fn drain_entity_records<S>(producer: &mut S) -> Result<Vec<Record>, CoreError>
where
    S: AtlasSerializable + ?Sized,
{
    let mut records = Vec::new();
    while let Some(entity) = producer.next_entity() {
        records.push(serialize_entity(Some(&entity))?);
    }
    Ok(records)
}

/// Serialize every relationship a producer hands out.
pub fn drain_relationship_records<S>(producer: &mut S) -> Vec<Record>
where
    S: AtlasSerializable + ?Sized,
{
    std::iter::from_fn(|| producer.next_relationship())
        .map(|rel| serialize_relationship(Some(&rel)))
        .collect()
}
