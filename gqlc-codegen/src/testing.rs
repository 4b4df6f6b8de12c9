//! Test utilities for language targets.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use gqlc_core::{to_camel_case, to_pascal_case};
use gqlc_schema::Schema;

use crate::{
    builder::Declaration,
    language::{LanguageTarget, NamingConvention},
    layout::UnitPlan,
};

/// Introspection response for a small blog API.
///
/// Covers an interface with two implementations, a union, an enum with
/// deprecated values, an input object, field arguments and one unmapped
/// custom scalar (`DateTime`).
pub const BLOG_SCHEMA: &str = include_str!("../fixtures/blog.json");

/// The parsed [`BLOG_SCHEMA`].
pub fn blog_schema() -> Schema {
    match gqlc_schema::parse_str(BLOG_SCHEMA) {
        Ok(schema) => schema,
        Err(err) => panic!("blog fixture must parse: {err}"),
    }
}

/// Build an introspection document from SDL-like type descriptions.
///
/// Each entry is `(name, fields)` where a field is `(name, type)`; types
/// use `String`, `Int`, a type name, or `!`/`[..]` wrappers. The first
/// entry is the query type. Only objects and the built-in scalars are
/// supported.
pub fn object_schema(types: &[(&str, &[(&str, &str)])]) -> Schema {
    let objects: Vec<String> = types
        .iter()
        .map(|(name, fields)| {
            let fields: Vec<String> = fields
                .iter()
                .map(|(field, ty)| {
                    format!(
                        r#"{{"name":"{field}","args":[],"type":{},"isDeprecated":false}}"#,
                        type_ref_json(ty)
                    )
                })
                .collect();
            format!(
                r#"{{"kind":"OBJECT","name":"{name}","fields":[{}],"interfaces":[]}}"#,
                fields.join(",")
            )
        })
        .collect();
    let scalars = ["String", "Int", "Boolean"]
        .iter()
        .map(|s| format!(r#"{{"kind":"SCALAR","name":"{s}"}}"#));
    let all: Vec<String> = objects.into_iter().chain(scalars).collect();
    let query = types.first().map(|(name, _)| *name).unwrap_or("Query");
    let json = format!(
        r#"{{"__schema":{{"queryType":{{"name":"{query}"}},"types":[{}],"directives":[]}}}}"#,
        all.join(",")
    );
    match gqlc_schema::parse_str(&json) {
        Ok(schema) => schema,
        Err(err) => panic!("test schema must parse: {err}"),
    }
}

fn type_ref_json(ty: &str) -> String {
    if let Some(inner) = ty.strip_suffix('!') {
        format!(r#"{{"kind":"NON_NULL","ofType":{}}}"#, type_ref_json(inner))
    } else if let Some(inner) = ty.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        format!(r#"{{"kind":"LIST","ofType":{}}}"#, type_ref_json(inner))
    } else if matches!(ty, "String" | "Int" | "Boolean") {
        format!(r#"{{"kind":"SCALAR","name":"{ty}"}}"#)
    } else {
        format!(r#"{{"kind":"OBJECT","name":"{ty}"}}"#)
    }
}

fn escape_with_at(name: &str) -> String {
    format!("@{name}")
}

/// A C#-like convention for engine tests.
pub const TEST_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    member_case: to_pascal_case,
    parameter_case: to_camel_case,
    reserved_words: &["class", "string", "object", "int", "bool", "event"],
    escape_reserved: escape_with_at,
    interface_prefix: "I",
};

/// Target rendering each declaration name on its own line.
#[derive(Debug, Clone, Default)]
pub struct PlainTarget {
    ordered: bool,
}

impl PlainTarget {
    /// A target that requires reference-ordered declarations.
    pub fn ordered() -> Self {
        Self { ordered: true }
    }
}

impl LanguageTarget for PlainTarget {
    fn language(&self) -> &'static str {
        "plain"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn naming(&self) -> &NamingConvention {
        &TEST_NAMING
    }

    fn requires_ordered_declarations(&self) -> bool {
        self.ordered
    }

    fn reserved_type_names(&self) -> &[&'static str] {
        &["GraphQlQueryBuilder"]
    }

    fn render_unit(&self, unit: &UnitPlan<'_>) -> String {
        let mut out = format!("unit {}\n", unit.name);
        for declaration in &unit.declarations {
            let kind = match declaration {
                Declaration::Class(spec) if spec.is_interface() => "interface",
                Declaration::Class(_) => "class",
                Declaration::Enum(_) => "enum",
                Declaration::QueryBuilder(_) => "builder",
                Declaration::Operations(_) => "operations",
            };
            out.push_str(&format!("{kind} {}\n", declaration.name()));
        }
        out
    }
}
