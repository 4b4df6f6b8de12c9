//! Language-agnostic type system for code generation.
//!
//! This module provides abstractions for representing target types in a
//! way that can be rendered to any language via the [`TypeMapper`] trait.

/// A language-agnostic type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive type (string, int, bool, etc.).
    Primitive(PrimitiveType),
    /// An optional/nullable type.
    Optional(Box<TypeRef>),
    /// An ordered sequence type.
    Array(Box<TypeRef>),
    /// A generated class or interface.
    Named(String),
    /// A generated enum.
    Enum(String),
    /// A type supplied by the user through a scalar mapping, rendered verbatim.
    External(String),
}

impl TypeRef {
    /// Create a primitive type reference.
    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }

    /// Create an optional type reference.
    pub fn optional(inner: TypeRef) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Create an array type reference.
    pub fn array(inner: TypeRef) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Create a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create an enum type reference.
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Create an external type reference.
    pub fn external(name: impl Into<String>) -> Self {
        Self::External(name.into())
    }

    /// Convenience: String type.
    pub fn string() -> Self {
        Self::Primitive(PrimitiveType::String)
    }

    /// Convenience: Int type.
    pub fn int() -> Self {
        Self::Primitive(PrimitiveType::Int)
    }

    /// Convenience: Bool type.
    pub fn bool() -> Self {
        Self::Primitive(PrimitiveType::Bool)
    }

    /// Name of the generated declaration this type ultimately refers to.
    pub fn declaration_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) | Self::Enum(name) => Some(name),
            Self::Optional(inner) | Self::Array(inner) => inner.declaration_name(),
            Self::Primitive(_) | Self::External(_) => None,
        }
    }
}

/// Primitive types the built-in scalar table maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Text (C#: string).
    String,
    /// 32-bit integer (C#: int).
    Int,
    /// 64-bit integer (C#: long).
    Long,
    /// 32-bit float (C#: float).
    Float,
    /// 64-bit float (C#: double).
    Double,
    /// Decimal (C#: decimal).
    Decimal,
    /// Boolean (C#: bool).
    Bool,
    /// UUID (C#: Guid).
    Guid,
    /// Opaque value (C#: object).
    Object,
}

impl PrimitiveType {
    /// Get the canonical name of this primitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Bool => "bool",
            Self::Guid => "guid",
            Self::Object => "object",
        }
    }
}

/// Accessibility of generated top-level declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
}

impl Accessibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
        }
    }
}

/// Trait for mapping types to language-specific representations.
///
/// Implement this trait to support a new target language's type system.
pub trait TypeMapper {
    /// Map a primitive type to the target language.
    fn map_primitive(&self, ty: PrimitiveType) -> String;

    /// Map an optional type. `inner` is the unwrapped type, `rendered` its text.
    fn map_optional(&self, inner: &TypeRef, rendered: &str) -> String;

    /// Map an ordered sequence type.
    fn map_array(&self, inner: &str) -> String;

    /// Map a generated class, interface or enum name.
    fn map_named(&self, name: &str) -> String {
        name.to_string()
    }

    /// Map a user-supplied type name.
    fn map_external(&self, name: &str) -> String {
        name.to_string()
    }

    /// Render a complete TypeRef to a string.
    fn render_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(p) => self.map_primitive(*p),
            TypeRef::Optional(inner) => {
                let inner_str = self.render_type(inner);
                self.map_optional(inner, &inner_str)
            }
            TypeRef::Array(inner) => {
                let inner_str = self.render_type(inner);
                self.map_array(&inner_str)
            }
            TypeRef::Named(name) | TypeRef::Enum(name) => self.map_named(name),
            TypeRef::External(name) => self.map_external(name),
        }
    }
}
