use atlas_core::{ColumnKey, IdentityKey, KeyDetails, TableKey};
use serde::Serialize;

use crate::cli::{KeyArgs, KeyKind};
use crate::output::output;

#[derive(Debug, PartialEq, Eq, Serialize)]
struct KeyReport {
    raw: String,
    format: &'static str,
    details: KeyDetails,
    qualified_name: String,
    catalog_key: String,
}

/// Handle `atlas-publish key`.
pub fn handle(args: &KeyArgs, pretty: bool) -> anyhow::Result<()> {
    let raw = args.raw.clone();
    let report = match (args.kind, args.source.clone()) {
        (KeyKind::Table, None) => describe(&TableKey::new(raw))?,
        (KeyKind::Table, Some(source)) => describe(&TableKey::with_source(raw, source))?,
        (KeyKind::Column, None) => describe(&ColumnKey::new(raw))?,
        (KeyKind::Column, Some(source)) => describe(&ColumnKey::with_source(raw, source))?,
    };
    output(&report, pretty)
}

fn describe(key: &impl IdentityKey) -> anyhow::Result<KeyReport> {
    let format = if key.is_qualified_name() {
        "qualified_name"
    } else {
        "catalog_key"
    };
    Ok(KeyReport {
        raw: key.raw().to_string(),
        format,
        details: key.get_details()?,
        qualified_name: key.to_qualified_name()?,
        catalog_key: key.to_catalog_key()?,
    })
}
