// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Loading of GraphQL introspection results into a resolved schema graph.

mod error;
pub mod introspection;
mod load;
mod model;

use std::path::Path;

pub use error::{Error, Result};
pub use load::load;
pub use model::*;
use serde_json::Value;

use crate::introspection::RawSchema;

/// Parse an introspection result from the given path
pub fn parse_file(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    let filename = path.display().to_string();
    parse_str_with_filename(&content, &filename)
}

/// Parse an introspection result from a string (uses "schema.json" as default filename)
pub fn parse_str(content: &str) -> Result<Schema> {
    parse_str_with_filename(content, "schema.json")
}

/// Parse an introspection result from a string with a custom filename for error reporting
pub fn parse_str_with_filename(content: &str, filename: &str) -> Result<Schema> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| Error::syntax(e, content, filename))?;
    parse_value(value)
}

/// Resolve an already decoded introspection document.
///
/// Accepts either the bare `{"__schema": ...}` object or a full GraphQL
/// response wrapping it in `data`.
pub fn parse_value(mut value: Value) -> Result<Schema> {
    let schema = take_schema(&mut value)?;

    for member in ["queryType", "types"] {
        if schema.get(member).is_none_or(Value::is_null) {
            return Err(Box::new(Error::MissingMember { member }));
        }
    }

    let raw: RawSchema = serde_path_to_error::deserialize(schema).map_err(Error::shape)?;
    load(raw)
}

fn take_schema(value: &mut Value) -> Result<Value> {
    let found = match value.get("__schema") {
        Some(_) => value.get_mut("__schema"),
        None => value
            .get_mut("data")
            .and_then(|data| data.get_mut("__schema")),
    };
    match found {
        Some(schema) if !schema.is_null() => Ok(schema.take()),
        _ => Err(Box::new(Error::MissingMember { member: "__schema" })),
    }
}
