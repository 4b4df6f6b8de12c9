//! Raw serde shapes of a GraphQL introspection result.
//!
//! These mirror the `__schema` document exactly, with type references
//! still expressed as bare names. [`crate::load`] resolves them into the
//! [`crate::Schema`] graph.

use serde::Deserialize;

/// The `__schema` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
    pub query_type: RawRootType,
    #[serde(default)]
    pub mutation_type: Option<RawRootType>,
    #[serde(default)]
    pub subscription_type: Option<RawRootType>,
    pub types: Vec<RawType>,
    #[serde(default)]
    pub directives: Option<Vec<RawDirective>>,
}

/// A root operation type reference (`{ "name": "Query" }`).
#[derive(Debug, Clone, Deserialize)]
pub struct RawRootType {
    pub name: String,
}

/// The `kind` discriminator of `__Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawTypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl RawTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }
}

/// A full type entry in `__schema.types`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawType {
    pub kind: RawTypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<RawField>>,
    #[serde(default)]
    pub input_fields: Option<Vec<RawInputValue>>,
    #[serde(default)]
    pub interfaces: Option<Vec<RawTypeRef>>,
    #[serde(default)]
    pub enum_values: Option<Vec<RawEnumValue>>,
    #[serde(default)]
    pub possible_types: Option<Vec<RawTypeRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<RawInputValue>>,
    #[serde(rename = "type")]
    pub ty: RawTypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: RawTypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// A possibly wrapped type reference (`ofType` chain).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTypeRef {
    pub kind: RawTypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<RawTypeRef>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDirective {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub args: Option<Vec<RawInputValue>>,
}
