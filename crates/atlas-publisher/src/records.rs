//! Turning serialized records back into catalog write requests.

use atlas_client::{AtlasEntity, AtlasRelationship, EntityReference};
use atlas_core::CoreError;
use atlas_core::fields::{
    ATTRIBUTE_SUFFIX, ENTITY_TYPE_1, ENTITY_TYPE_2, QUALIFIED_NAME_1, QUALIFIED_NAME_2, RELATION_TYPE,
    RELATIONSHIP_PART_SEPARATOR, RELATIONSHIP_SEPARATOR, RELATIONSHIPS, TYPE_NAME, unsuffixed,
};
use atlas_core::keys::resolve_qualified_name;
use atlas_core::serializer::Record;
use serde_json::{Map, Value};

/// One `attribute#related_type#qualified_name` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipDecl<'a> {
    pub attribute: &'a str,
    pub related_type: &'a str,
    pub qualified_name: &'a str,
}

/// Decode the `relationships` field of an entity record.
///
/// Declarations are yielded lazily in field order and taken verbatim, so a
/// qualified name keeps surrounding whitespace and any further `#`
/// characters. Blank declarations are skipped.
pub fn decode_relationships(
    encoded: &str,
) -> impl Iterator<Item = Result<RelationshipDecl<'_>, CoreError>> {
    encoded
        .split(RELATIONSHIP_SEPARATOR)
        .filter(|decl| !decl.trim().is_empty())
        .map(|decl| {
            let mut parts = decl.splitn(3, RELATIONSHIP_PART_SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(attribute), Some(related_type), Some(qualified_name))
                    if !attribute.is_empty()
                        && !related_type.is_empty()
                        && !qualified_name.is_empty() =>
                {
                    Ok(RelationshipDecl {
                        attribute,
                        related_type,
                        qualified_name,
                    })
                }
                _ => Err(CoreError::MalformedRecord(format!(
                    "relationship declaration '{decl}' is not attribute#type#qualifiedName"
                ))),
            }
        })
}

/// Build an entity write request from an entity record.
///
/// `typeName` becomes the entity type, `relationships` is decoded into
/// relationship attributes, and every other field becomes an attribute with
/// its `-elo` marker stripped.
///
/// # Errors
///
/// Returns [`CoreError::MalformedRecord`] if the type name or qualified name
/// is missing or a declaration is malformed, and
/// [`CoreError::IdentityFormat`] if a related table or column identity is
/// malformed.
pub fn entity_from_record(mut record: Record) -> Result<AtlasEntity, CoreError> {
    let type_name = take_required(&mut record, TYPE_NAME)?;
    let relationships = record.remove(RELATIONSHIPS);

    let mut entity = AtlasEntity::new(type_name);
    entity.attributes = strip_suffixes(record)?;
    if entity.qualified_name().is_none() {
        return Err(CoreError::MalformedRecord(format!(
            "{} entity has no qualifiedName",
            entity.type_name
        )));
    }

    if let Some(encoded) = relationships {
        let encoded = scalar_text(&encoded);
        for decl in decode_relationships(&encoded) {
            let decl = decl?;
            let qualified_name = resolve_qualified_name(decl.related_type, decl.qualified_name)?;
            entity.add_relationship(
                decl.attribute,
                EntityReference::new(decl.related_type, qualified_name),
            );
        }
    }

    Ok(entity)
}

/// Build a relationship write request from a relationship record.
///
/// Endpoints are referenced by type and qualified name; whether they exist is
/// left to the catalog. Remaining fields become relationship attributes.
///
/// # Errors
///
/// Returns [`CoreError::MalformedRecord`] if a required field is missing, and
/// [`CoreError::IdentityFormat`] if an endpoint identity is malformed.
pub fn relationship_from_record(mut record: Record) -> Result<AtlasRelationship, CoreError> {
    let type_name = take_required(&mut record, RELATION_TYPE)?;
    let end1 = take_endpoint(&mut record, ENTITY_TYPE_1, QUALIFIED_NAME_1)?;
    let end2 = take_endpoint(&mut record, ENTITY_TYPE_2, QUALIFIED_NAME_2)?;

    Ok(AtlasRelationship {
        type_name,
        end1,
        end2,
        attributes: strip_suffixes(record)?,
    })
}

fn take_endpoint(
    record: &mut Record,
    type_field: &str,
    name_field: &str,
) -> Result<EntityReference, CoreError> {
    let type_name = take_required(record, type_field)?;
    let raw = take_required(record, name_field)?;
    let qualified_name = resolve_qualified_name(&type_name, &raw)?;
    Ok(EntityReference::new(type_name, qualified_name))
}

fn take_required(record: &mut Record, field: &str) -> Result<String, CoreError> {
    match record.remove(field) {
        Some(Value::Null) | None => Err(CoreError::MalformedRecord(format!(
            "missing required field '{field}'"
        ))),
        Some(value) => {
            let text = scalar_text(&value);
            if text.is_empty() {
                Err(CoreError::MalformedRecord(format!(
                    "required field '{field}' is empty"
                )))
            } else {
                Ok(text)
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strip `-elo` markers, rejecting records that carry an attribute both with
/// and without the marker.
fn strip_suffixes(record: Record) -> Result<Map<String, Value>, CoreError> {
    let mut attributes = Map::new();
    for (field, value) in record {
        let name = unsuffixed(&field);
        if attributes.contains_key(name) {
            return Err(CoreError::MalformedRecord(format!(
                "attribute '{name}' is given both with and without the '{ATTRIBUTE_SUFFIX}' marker"
            )));
        }
        attributes.insert(name.to_string(), value);
    }
    Ok(attributes)
}
