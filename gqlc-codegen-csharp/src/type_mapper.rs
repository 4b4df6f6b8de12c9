//! C# type mapper implementation.

use gqlc_codegen::builder::{PrimitiveType, TypeMapper, TypeRef};

/// `System` value types a scalar mapping may name, with or without the
/// `System.` qualifier.
const VALUE_TYPES: &[&str] = &[
    "bool", "byte", "sbyte", "char", "decimal", "double", "float", "short", "ushort", "int",
    "uint", "long", "ulong", "Boolean", "Byte", "SByte", "Char", "Decimal", "Double", "Single",
    "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64", "Guid", "DateTime",
    "DateTimeOffset", "TimeSpan", "DateOnly", "TimeOnly", "Numerics.BigInteger",
];

/// Maps language-agnostic TypeRef types to C# type syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpTypeMapper {
    /// Optional reference types render as `T?` too.
    nullable_references: bool,
}

impl CSharpTypeMapper {
    pub fn new(nullable_references: bool) -> Self {
        Self {
            nullable_references,
        }
    }

    /// Whether the C# type is a value type, which needs `?` to hold null.
    pub fn is_value_type(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Primitive(PrimitiveType::String | PrimitiveType::Object) => false,
            TypeRef::Primitive(_) | TypeRef::Enum(_) => true,
            TypeRef::External(name) => {
                let name = name.strip_prefix("System.").unwrap_or(name);
                VALUE_TYPES.contains(&name)
            }
            TypeRef::Named(_) | TypeRef::Array(_) | TypeRef::Optional(_) => false,
        }
    }
}

impl TypeMapper for CSharpTypeMapper {
    fn map_primitive(&self, ty: PrimitiveType) -> String {
        match ty {
            PrimitiveType::String => "string",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Guid => "Guid",
            PrimitiveType::Object => "object",
        }
        .to_string()
    }

    fn map_optional(&self, inner: &TypeRef, rendered: &str) -> String {
        if rendered.ends_with('?') {
            return rendered.to_string();
        }
        if self.nullable_references || self.is_value_type(inner) {
            format!("{}?", rendered)
        } else {
            rendered.to_string()
        }
    }

    fn map_array(&self, inner: &str) -> String {
        format!("ICollection<{}>", inner)
    }
}
