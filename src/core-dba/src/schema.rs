//! The validated generation result and the checks that produce it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Error, Result};

/// The seven top-level keys every complete model response must carry.
pub const REQUIRED_KEYS: [&str; 7] = [
    "schema",
    "diagram",
    "postgresqlCode",
    "mysqlCode",
    "mongoDbSchema",
    "prismaSchema",
    "crudOperations",
];

/// A complete, validated generation result.
///
/// Scalar fields are typed strings; `schema`, `mongo_db_schema`, and
/// `crud_operations` stay raw JSON values because their nested shape is
/// model-defined and downstream renderers must tolerate whatever arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSchema {
    /// Nested table/column description.
    pub schema: Value,
    /// Mermaid erDiagram source, one relationship per line.
    pub diagram: String,
    pub postgresql_code: String,
    pub mysql_code: String,
    /// Either a JSON string or a structured collection sketch.
    pub mongo_db_schema: Value,
    pub prisma_schema: String,
    /// Map of table name to create/read/update/delete example statements.
    pub crud_operations: Value,
}

/// Validates the extractor's output into a `GeneratedSchema`.
///
/// `None` (nothing extracted) and non-object JSON are `MalformedResponse`.
/// Required keys that are absent or JSON null fail `IncompleteResponse`
/// with every missing key named. Presence is all that is checked of the
/// nested content; a partial bundle is a total failure, never a partial
/// success.
pub fn validate_generated(parsed: Option<Value>) -> Result<GeneratedSchema> {
    let value = parsed.ok_or(Error::MalformedResponse)?;
    let object = value.as_object().ok_or(Error::MalformedResponse)?;

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| matches!(object.get(**key), None | Some(Value::Null)))
        .map(|key| key.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Error::IncompleteResponse(missing));
    }

    serde_json::from_value(value).map_err(|_| Error::MalformedResponse)
}
