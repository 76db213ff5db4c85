//! Identity keys shared by Atlas and the ingestion tooling.
//!
//! Atlas can be populated both by its own hooks and bridges, which mint
//! qualified names (`db.table@cluster`), and by ingestion tooling, which mints
//! catalog keys (`source://cluster.db/table`). [`IdentityKey`] unifies the two:
//! a key is built from either form and renders both on demand.
//!
//! Every accessor is a pure function of the raw identifier and the optional
//! source hint. Nothing is cached between calls.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::errors::CoreError;

static TABLE_QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<db>.*?)\.(?P<table>.*)@(?P<cluster>.*?)$").expect("valid table qn regex")
});

static TABLE_CATALOG_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<source>.*?)://(?P<cluster>.*?)\.(?P<db>.*?)/(?P<table>.*?)$")
        .expect("valid table key regex")
});

static COLUMN_QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<db>.*?)\.(?P<table>.*)\.(?P<column>.*?)@(?P<cluster>.*?)$")
        .expect("valid column qn regex")
});

static COLUMN_CATALOG_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<source>.*?)://(?P<cluster>.*?)\.(?P<db>.*?)/(?P<table>.*?)/(?P<column>.*)$")
        .expect("valid column key regex")
});

// ── Details ────────────────────────────────────────────────────────

/// Structured fields recovered from a key.
///
/// `source` is only present when the details came from a catalog key, since a
/// qualified name carries no source segment. `column` is only present for
/// column keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub cluster: String,
    pub database: String,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl KeyDetails {
    fn capture(pattern: &Regex, raw: &str) -> Result<Self, CoreError> {
        let caps = pattern
            .captures(raw)
            .ok_or_else(|| CoreError::identity_format(raw))?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Ok(Self {
            source: group("source"),
            cluster: group("cluster").unwrap_or_default(),
            database: group("db").unwrap_or_default(),
            table: group("table").unwrap_or_default(),
            column: group("column"),
        })
    }
}

// ── Trait ──────────────────────────────────────────────────────────

/// Shared contract of table and column identities.
///
/// Implementors provide their grammars and renderers; format detection,
/// detail extraction and cross-format conversion are provided.
pub trait IdentityKey {
    /// The identifier exactly as supplied.
    fn raw(&self) -> &str;

    /// Source hint used when rendering a catalog key from a qualified name.
    fn source(&self) -> Option<&str>;

    /// Grammar of the Atlas qualified name for this variant.
    fn qualified_name_pattern(&self) -> &'static Regex;

    /// Grammar of the catalog key for this variant.
    fn catalog_key_pattern(&self) -> &'static Regex;

    /// Render a qualified name from structured fields.
    fn render_qualified_name(&self, details: &KeyDetails) -> String;

    /// Render a catalog key from structured fields and the source hint.
    fn render_catalog_key(&self, details: &KeyDetails) -> String;

    fn is_qualified_name(&self) -> bool {
        self.qualified_name_pattern().is_match(self.raw())
    }

    fn is_catalog_key(&self) -> bool {
        self.catalog_key_pattern().is_match(self.raw())
    }

    /// Collect the structured fields from whichever format matches.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdentityFormat`] if the raw identifier matches
    /// neither grammar.
    fn get_details(&self) -> Result<KeyDetails, CoreError> {
        if self.is_qualified_name() {
            self.details_from_qualified_name()
        } else if self.is_catalog_key() {
            self.details_from_catalog_key()
        } else {
            Err(CoreError::identity_format(self.raw()))
        }
    }

    /// # Errors
    ///
    /// Returns [`CoreError::IdentityFormat`] if the raw identifier is not a qualified name.
    fn details_from_qualified_name(&self) -> Result<KeyDetails, CoreError> {
        KeyDetails::capture(self.qualified_name_pattern(), self.raw())
    }

    /// # Errors
    ///
    /// Returns [`CoreError::IdentityFormat`] if the raw identifier is not a catalog key.
    fn details_from_catalog_key(&self) -> Result<KeyDetails, CoreError> {
        KeyDetails::capture(self.catalog_key_pattern(), self.raw())
    }

    /// Qualified name for this identity. Returned unchanged if already one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdentityFormat`] if the raw identifier matches
    /// neither grammar.
    fn to_qualified_name(&self) -> Result<String, CoreError> {
        if self.is_qualified_name() {
            return Ok(self.raw().to_string());
        }
        let details = self.details_from_catalog_key()?;
        Ok(self.render_qualified_name(&details))
    }

    /// Catalog key for this identity. Returned unchanged if already one.
    ///
    /// Without a source hint the source segment renders empty
    /// (`://cluster.db/table`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IdentityFormat`] if the raw identifier matches
    /// neither grammar.
    fn to_catalog_key(&self) -> Result<String, CoreError> {
        if self.is_catalog_key() {
            return Ok(self.raw().to_string());
        }
        let details = self.details_from_qualified_name()?;
        Ok(self.render_catalog_key(&details))
    }
}

// ── Table ──────────────────────────────────────────────────────────

/// Identity of a table: `db.table@cluster` or `source://cluster.db/table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableKey {
    raw: String,
    source: Option<String>,
}

impl TableKey {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(raw: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            source: Some(source.into()),
        }
    }
}

impl IdentityKey for TableKey {
    fn raw(&self) -> &str {
        &self.raw
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn qualified_name_pattern(&self) -> &'static Regex {
        &TABLE_QUALIFIED_NAME
    }

    fn catalog_key_pattern(&self) -> &'static Regex {
        &TABLE_CATALOG_KEY
    }

    fn render_qualified_name(&self, details: &KeyDetails) -> String {
        format!("{}.{}@{}", details.database, details.table, details.cluster)
    }

    fn render_catalog_key(&self, details: &KeyDetails) -> String {
        format!(
            "{}://{}.{}/{}",
            self.source().unwrap_or_default(),
            details.cluster,
            details.database,
            details.table
        )
    }
}

// ── Column ─────────────────────────────────────────────────────────

/// Identity of a column: `db.table.column@cluster` or
/// `source://cluster.db/table/column`.
///
/// Column catalog keys live under the owning table's source namespace, so any
/// `column` in the source hint renders as `table` (`hive_column` → `hive_table`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnKey {
    raw: String,
    source: Option<String>,
}

impl ColumnKey {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(raw: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            source: Some(source.into()),
        }
    }
}

impl IdentityKey for ColumnKey {
    fn raw(&self) -> &str {
        &self.raw
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn qualified_name_pattern(&self) -> &'static Regex {
        &COLUMN_QUALIFIED_NAME
    }

    fn catalog_key_pattern(&self) -> &'static Regex {
        &COLUMN_CATALOG_KEY
    }

    fn render_qualified_name(&self, details: &KeyDetails) -> String {
        format!(
            "{}.{}.{}@{}",
            details.database,
            details.table,
            details.column.as_deref().unwrap_or_default(),
            details.cluster
        )
    }

    fn render_catalog_key(&self, details: &KeyDetails) -> String {
        let source = self
            .source()
            .map(|s| s.replace("column", "table"))
            .unwrap_or_default();
        format!(
            "{source}://{}.{}/{}/{}",
            details.cluster,
            details.database,
            details.table,
            details.column.as_deref().unwrap_or_default()
        )
    }
}

// ── Dispatch by entity type ────────────────────────────────────────

/// A table or column key chosen from an Atlas entity type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKey {
    Table(TableKey),
    Column(ColumnKey),
}

impl EntityKey {
    /// Pick the key variant for `type_name` by its last `_` segment
    /// (`hive_column` → column, `rdbms_table` → table). Returns `None` for
    /// types without an identity grammar, such as databases, clusters, or
    /// `hive_column_lineage` and `hive_table_ddl`.
    #[must_use]
    pub fn for_type(type_name: &str, raw: &str) -> Option<Self> {
        let kind = type_name.rsplit('_').next().unwrap_or(type_name);
        if kind == "column" {
            Some(Self::Column(ColumnKey::new(raw)))
        } else if kind == "table" {
            Some(Self::Table(TableKey::new(raw)))
        } else {
            None
        }
    }

    fn inner(&self) -> &dyn IdentityKey {
        match self {
            Self::Table(key) => key,
            Self::Column(key) => key,
        }
    }
}

impl IdentityKey for EntityKey {
    fn raw(&self) -> &str {
        self.inner().raw()
    }

    fn source(&self) -> Option<&str> {
        self.inner().source()
    }

    fn qualified_name_pattern(&self) -> &'static Regex {
        self.inner().qualified_name_pattern()
    }

    fn catalog_key_pattern(&self) -> &'static Regex {
        self.inner().catalog_key_pattern()
    }

    fn render_qualified_name(&self, details: &KeyDetails) -> String {
        self.inner().render_qualified_name(details)
    }

    fn render_catalog_key(&self, details: &KeyDetails) -> String {
        self.inner().render_catalog_key(details)
    }
}

/// Resolve the Atlas qualified name of an entity reference.
///
/// Table and column types accept either identity form. Other types have no
/// grammar and their identifier is used as-is.
///
/// # Errors
///
/// Returns [`CoreError::IdentityFormat`] if a table or column identifier
/// matches neither grammar.
pub fn resolve_qualified_name(type_name: &str, raw: &str) -> Result<String, CoreError> {
    match EntityKey::for_type(type_name, raw) {
        Some(key) => key.to_qualified_name(),
        None => Ok(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn details(source: Option<&str>, cluster: &str, db: &str, table: &str) -> KeyDetails {
        KeyDetails {
            source: source.map(str::to_string),
            cluster: cluster.into(),
            database: db.into(),
            table: table.into(),
            column: None,
        }
    }

    #[rstest]
    #[case::from_catalog_key(
        TableKey::new("hive_table://gold.database_name/table_name"),
        details(Some("hive_table"), "gold", "database_name", "table_name"),
        false
    )]
    #[case::from_qualified_name(
        TableKey::with_source("database_name.table_name@gold", "hive_table"),
        details(None, "gold", "database_name", "table_name"),
        true
    )]
    fn table_key_renders_both_forms(
        #[case] key: TableKey,
        #[case] expected: KeyDetails,
        #[case] is_qualified_name: bool,
    ) {
        assert_eq!(
            key.to_catalog_key().unwrap(),
            "hive_table://gold.database_name/table_name"
        );
        assert_eq!(key.to_qualified_name().unwrap(), "database_name.table_name@gold");
        assert_eq!(key.is_qualified_name(), is_qualified_name);
        assert_eq!(key.is_catalog_key(), !is_qualified_name);
        assert_eq!(key.get_details().unwrap(), expected);
    }

    #[rstest]
    #[case::from_catalog_key(
        ColumnKey::new("hive_table://gold.database_name/table_name/column_name"),
        Some("hive_table"),
        false
    )]
    #[case::from_qualified_name(
        ColumnKey::with_source("database_name.table_name.column_name@gold", "hive_table"),
        None,
        true
    )]
    fn column_key_renders_both_forms(
        #[case] key: ColumnKey,
        #[case] source: Option<&str>,
        #[case] is_qualified_name: bool,
    ) {
        assert_eq!(
            key.to_catalog_key().unwrap(),
            "hive_table://gold.database_name/table_name/column_name"
        );
        assert_eq!(
            key.to_qualified_name().unwrap(),
            "database_name.table_name.column_name@gold"
        );
        assert_eq!(key.is_qualified_name(), is_qualified_name);
        assert_eq!(key.is_catalog_key(), !is_qualified_name);
        assert_eq!(
            key.get_details().unwrap(),
            KeyDetails {
                column: Some("column_name".into()),
                ..details(source, "gold", "database_name", "table_name")
            }
        );
    }

    #[test]
    fn column_key_from_catalog_key() {
        let key = ColumnKey::new("hive_table://gold.db/table/col");
        assert_eq!(key.to_qualified_name().unwrap(), "db.table.col@gold");
    }

    #[test]
    fn column_key_from_qualified_name() {
        let key = ColumnKey::with_source("db.table.col@gold", "hive_table");
        assert_eq!(key.to_catalog_key().unwrap(), "hive_table://gold.db/table/col");
    }

    #[test]
    fn column_source_is_rewritten_to_table_namespace() {
        let key = ColumnKey::with_source("db.table.col@gold", "hive_column");
        assert_eq!(key.to_catalog_key().unwrap(), "hive_table://gold.db/table/col");
    }

    #[test]
    fn table_source_is_not_rewritten() {
        let key = TableKey::with_source("db.table@gold", "hive_column");
        assert_eq!(key.to_catalog_key().unwrap(), "hive_column://gold.db/table");
    }

    #[test]
    fn missing_source_renders_empty_segment() {
        assert_eq!(
            TableKey::new("db.table@gold").to_catalog_key().unwrap(),
            "://gold.db/table"
        );
        assert_eq!(
            ColumnKey::new("db.table.col@gold").to_catalog_key().unwrap(),
            "://gold.db/table/col"
        );
    }

    #[rstest]
    #[case("db.table@gold")]
    #[case("sales.orders_2024@prod")]
    #[case("db.schema.nested@c1")]
    fn table_roundtrips_through_catalog_key(#[case] qualified_name: &str) {
        let key = TableKey::with_source(qualified_name, "hive_table")
            .to_catalog_key()
            .unwrap();
        let back = TableKey::with_source(key.clone(), "hive_table")
            .to_qualified_name()
            .unwrap();
        assert_eq!(back, qualified_name);

        let again = TableKey::with_source(back, "hive_table").to_catalog_key().unwrap();
        assert_eq!(again, key);
    }

    #[rstest]
    #[case(TableKey::new("not-a-valid-anything"))]
    #[case(TableKey::with_source("not-a-valid-anything", "hive_table"))]
    fn invalid_table_key(#[case] key: TableKey) {
        assert!(!key.is_qualified_name());
        assert!(!key.is_catalog_key());
        assert!(matches!(key.get_details(), Err(CoreError::IdentityFormat { .. })));
        assert!(key.to_qualified_name().is_err());
        assert!(key.to_catalog_key().is_err());
    }

    #[test]
    fn invalid_column_key() {
        let key = ColumnKey::new("not-a-valid-anything");
        assert!(!key.is_qualified_name());
        assert!(!key.is_catalog_key());
        let err = key.get_details().unwrap_err();
        assert!(err.to_string().contains("not-a-valid-anything"));
    }

    #[test]
    fn table_qualified_name_is_not_a_column_identity() {
        let key = ColumnKey::new("db.table@gold");
        assert!(!key.is_qualified_name());
        assert!(!key.is_catalog_key());
    }

    #[test]
    fn entity_key_dispatches_on_type_name() {
        assert!(matches!(
            EntityKey::for_type("hive_column", "db.t.c@gold"),
            Some(EntityKey::Column(_))
        ));
        assert!(matches!(
            EntityKey::for_type("hive_table", "db.t@gold"),
            Some(EntityKey::Table(_))
        ));
        assert!(EntityKey::for_type("hive_db", "db@gold").is_none());
    }

    #[rstest]
    #[case("column")]
    #[case("rdbms_column")]
    fn column_types_use_the_column_grammar(#[case] type_name: &str) {
        assert!(matches!(
            EntityKey::for_type(type_name, "db.t.c@gold"),
            Some(EntityKey::Column(_))
        ));
    }

    #[rstest]
    #[case("hive_column_lineage")]
    #[case("hive_table_ddl")]
    #[case("hive_process")]
    fn types_only_mentioning_table_or_column_pass_through(#[case] type_name: &str) {
        assert!(EntityKey::for_type(type_name, "free form id").is_none());
        assert_eq!(
            resolve_qualified_name(type_name, "free form id").unwrap(),
            "free form id"
        );
    }

    #[test]
    fn resolve_converts_catalog_keys_and_passes_through_other_types() {
        assert_eq!(
            resolve_qualified_name("hive_table", "hive_table://gold.db/t").unwrap(),
            "db.t@gold"
        );
        assert_eq!(
            resolve_qualified_name("hive_column", "db.t.c@gold").unwrap(),
            "db.t.c@gold"
        );
        assert_eq!(resolve_qualified_name("hive_db", "db@gold").unwrap(), "db@gold");
        assert!(resolve_qualified_name("hive_table", "nonsense").is_err());
    }
}
