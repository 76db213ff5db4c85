//! Serialized records survive the trip through a record file.

use atlas_core::fields::UNQUOTED_SUFFIX;
use atlas_core::record_file::{RecordFileReader, read_records, write_records};
use atlas_core::serializer::{serialize_entity, serialize_relationship};
use atlas_core::{Entity, EntityRelationship, Relationship};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn entity_records_roundtrip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entities.csv");

    let table = Entity::new("hive_table")
        .with_attribute("qualifiedName", "sales.orders@gold")
        .with_attribute("name", "orders")
        .with_attribute("rowCount", 1200)
        .with_attribute("temporary", false)
        .with_relationship(EntityRelationship::new("db", "hive_db", "sales@gold"));
    let column = Entity::new("hive_column")
        .with_attribute("qualifiedName", "sales.orders.id@gold")
        .with_attribute("comment", "primary key, not null")
        .with_relationship(EntityRelationship::new(
            "table",
            "hive_table",
            "hive_table://gold.sales/orders",
        ));

    let records = vec![
        serialize_entity(Some(&table)).unwrap(),
        serialize_entity(Some(&column)).unwrap(),
    ];
    write_records(&path, &records).unwrap();

    let reader = RecordFileReader::open(&path).unwrap();
    assert!(reader.field_names().any(|f| f == "rowCount-elo"));

    let header = std::fs::read_to_string(&path).unwrap();
    assert!(header.contains(&format!("rowCount-elo{UNQUOTED_SUFFIX}")));

    let read = read_records(&path).unwrap();
    assert_eq!(read[0], records[0]);
    assert_eq!(
        serde_json::Value::Object(read[1].clone()),
        json!({
            "typeName": "hive_column",
            "qualifiedName-elo": "sales.orders.id@gold",
            "comment-elo": "primary key, not null",
            "relationships": "table#hive_table#sales.orders@gold",
        })
    );
}

#[test]
fn relationship_records_roundtrip_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relations.csv");

    let rel = Relationship::new(
        "hive_table_columns",
        ("hive_table", "sales.orders@gold"),
        ("hive_column", "sales.orders.id@gold"),
    )
    .with_attribute("position", 0);
    let records = vec![serialize_relationship(Some(&rel))];
    write_records(&path, &records).unwrap();

    assert_eq!(read_records(&path).unwrap(), records);
}
