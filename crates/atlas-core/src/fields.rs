//! Reserved record field names shared by the serializer and the publisher.

pub const GUID: &str = "guid";
pub const NAME: &str = "name";
pub const QUALIFIED_NAME: &str = "qualifiedName";
pub const URL: &str = "url";
pub const TYPE_NAME: &str = "typeName";
pub const ID: &str = "id";
pub const DESCRIPTION: &str = "description";
pub const CREATED_TIMESTAMP: &str = "createdTimestamp";
pub const LAST_MODIFIED_TIMESTAMP: &str = "lastModifiedTimestamp";
pub const CLUSTER: &str = "cluster";
pub const PRODUCT: &str = "product";
pub const TABLES: &str = "tables";
pub const GROUP: &str = "group";
pub const OWNED_BY: &str = "ownedBy";

/// Outbound relationship declarations on an entity record.
pub const RELATIONSHIPS: &str = "relationships";

/// Relationship record fields. These are structural and never suffixed.
pub const RELATION_TYPE: &str = "relation_type";
pub const ENTITY_TYPE_1: &str = "entity_type_1";
pub const QUALIFIED_NAME_1: &str = "qualified_name_1";
pub const ENTITY_TYPE_2: &str = "entity_type_2";
pub const QUALIFIED_NAME_2: &str = "qualified_name_2";

/// Marker appended to free-form attribute names.
pub const ATTRIBUTE_SUFFIX: &str = "-elo";

/// Header marker for columns whose values are stored unquoted (integers, booleans).
pub const UNQUOTED_SUFFIX: &str = ":UNQUOTED";

/// Header marker for columns whose cells hold JSON text: floats, arrays,
/// objects, or a mix of strings and unquoted scalars.
pub const JSON_SUFFIX: &str = ":JSON";

/// Separator between relationship declarations in the `relationships` field.
pub const RELATIONSHIP_SEPARATOR: char = ',';

/// Separator between the parts of one `attr#type#qualifiedName` declaration.
pub const RELATIONSHIP_PART_SEPARATOR: char = '#';

/// Append the attribute marker to a field name.
#[must_use]
pub fn suffixed(name: &str) -> String {
    format!("{name}{ATTRIBUTE_SUFFIX}")
}

/// Strip a trailing attribute marker, returning the name unchanged when absent.
#[must_use]
pub fn unsuffixed(name: &str) -> &str {
    name.strip_suffix(ATTRIBUTE_SUFFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_roundtrip() {
        assert_eq!(suffixed("qualifiedName"), "qualifiedName-elo");
        assert_eq!(unsuffixed("qualifiedName-elo"), "qualifiedName");
    }

    #[test]
    fn unsuffixed_leaves_plain_names() {
        assert_eq!(unsuffixed("typeName"), "typeName");
        assert_eq!(unsuffixed("-elo-x"), "-elo-x");
    }
}
