use std::collections::HashMap;

use indoc::indoc;
use subst::substitute;

use crate::errors::{Error, Result};

const GENERATE_SCHEMA: &str = indoc! { r#"
  You are an expert database architect. Based on the following user request, generate a complete and well-structured database schema and corresponding CRUD (Create, Read, Update, Delete) operations.

  The output MUST be a single, valid JSON object with the following keys: "schema", "diagram", "postgresqlCode", "mysqlCode", "mongoDbSchema", "prismaSchema", and "crudOperations".

  ### Instructions & Constraints:
  1.  **Schema Generation**: Generate schemas for PostgreSQL, MySQL, MongoDB, and Prisma.
  2.  **Relational Schemas (PostgreSQL & MySQL)**:
      * Every table must have a UUID primary key named 'id'. For PostgreSQL, use `DEFAULT gen_random_uuid()`. For MySQL, use `(UUID())` and the CHAR(36) type.
      * Include 'created_at' and 'updated_at' timestamps with appropriate default values.
      * Define foreign keys with 'ON DELETE CASCADE' where it makes sense.
      * Add comments to the SQL code.
  3.  **MongoDB Schema**:
      * Provide a JSON string representing the collections and documents. Use embedded documents for tightly coupled one-to-many relationships and references (ObjectId) for many-to-many relationships.
  4.  **Prisma Schema**:
      * Contain a single, comprehensive Prisma schema including `datasource` and `generator` blocks. Define relations correctly.
  5.  **CRUD Operations**:
      * For the "crudOperations" key, provide a JSON object where keys are table names.
      * For each table, provide example SQL statements for `create`, `read`, `update`, and `delete`. Use placeholders like '[value]'.
  6.  **Mermaid Diagram**:
      * The "diagram" key must contain a valid Mermaid.js "erDiagram" string.
      * **Crucially, each relationship definition MUST be on its own separate line.**

  ### User Request:
  "${DESCRIPTION}"
"# };

/// Builds the schema-generation instruction with the user's description
/// embedded verbatim at the end. Deterministic; no side effects.
pub fn prompt_generate_schema(description: &str) -> Result<String> {
    let description = description.trim();
    if description.is_empty() {
        return Err(Error::InvalidInput);
    }

    let res = substitute(GENERATE_SCHEMA, &{
        let mut v = HashMap::new();
        v.insert("DESCRIPTION".to_string(), description.to_string());
        v
    })?;
    Ok(res)
}

const CHAT: &str = indoc! { r#"
  You are a helpful assistant on a database design site. You answer questions about data modeling, SQL, NoSQL, Prisma, and entity-relationship diagrams. Answer the user's message directly and concisely, in plain text. If you don't know, say so.

  ### User Message:
  "${MESSAGE}"
"# };

/// Builds the single-turn chat instruction with the user's message embedded.
pub fn prompt_chat(message: &str) -> Result<String> {
    let message = message.trim();
    if message.is_empty() {
        return Err(Error::InvalidInput);
    }

    let res = substitute(CHAT, &{
        let mut v = HashMap::new();
        v.insert("MESSAGE".to_string(), message.to_string());
        v
    })?;
    Ok(res)
}
