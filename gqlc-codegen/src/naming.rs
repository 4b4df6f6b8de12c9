//! Naming and type-mapping policy.
//!
//! Every function here is a pure transform from schema names to target
//! identifiers, driven by the immutable [`GeneratorConfiguration`] and the
//! target language's [`NamingConvention`].

use gqlc_core::{sanitize_identifier, to_pascal_case};
use gqlc_schema::SchemaType;

use crate::{
    builder::{PrimitiveType, TypeRef},
    config::{EnumNaming, FloatTypeMapping, GeneratorConfiguration, IdTypeMapping},
    language::NamingConvention,
};

/// Result of mapping a scalar to a target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarMapping {
    pub ty: TypeRef,
    /// No built-in or user mapping exists; `ty` is the opaque fallback.
    pub unmapped: bool,
}

/// Schema-to-target naming rules for one generation run.
#[derive(Debug, Clone, Copy)]
pub struct NamingPolicy<'a> {
    config: &'a GeneratorConfiguration,
    convention: &'a NamingConvention,
}

impl<'a> NamingPolicy<'a> {
    pub fn new(config: &'a GeneratorConfiguration, convention: &'a NamingConvention) -> Self {
        Self { config, convention }
    }

    pub fn config(&self) -> &'a GeneratorConfiguration {
        self.config
    }

    pub fn convention(&self) -> &'a NamingConvention {
        self.convention
    }

    /// Target name for a schema type name, ignoring its kind.
    ///
    /// A class mapping override is used verbatim; otherwise the configured
    /// prefix and suffix wrap the PascalCase name.
    pub fn target_class_name(&self, schema_name: &str) -> String {
        if let Some(name) = self.config.class_mapping().get(schema_name) {
            return name.to_string();
        }
        let name = format!(
            "{}{}{}",
            self.config.class_prefix(),
            (self.convention.type_case)(schema_name),
            self.config.class_suffix()
        );
        self.convention.safe_name(&sanitize_identifier(&name))
    }

    /// Target name for a schema type; interfaces and unions get the
    /// convention's interface prefix unless overridden.
    pub fn target_type_name(&self, ty: &SchemaType) -> String {
        if let Some(name) = self.config.class_mapping().get(&ty.name) {
            return name.to_string();
        }
        let name = self.target_class_name(&ty.name);
        if ty.is_abstract() {
            format!("{}{}", self.convention.interface_prefix, name)
        } else {
            name
        }
    }

    /// Target type of a scalar.
    ///
    /// User scalar mappings win over the built-in table; scalars known to
    /// neither fall back to the opaque object type and are flagged.
    pub fn target_scalar_type(&self, scalar: &str) -> ScalarMapping {
        if let Some(target) = self.config.scalar_mapping().get(scalar) {
            return ScalarMapping {
                ty: TypeRef::external(target),
                unmapped: false,
            };
        }

        let primitive = match scalar {
            "String" => Some(PrimitiveType::String),
            "Boolean" => Some(PrimitiveType::Bool),
            "Int" => Some(PrimitiveType::Int),
            "ID" => Some(match self.config.id_type() {
                IdTypeMapping::String => PrimitiveType::String,
                IdTypeMapping::Guid => PrimitiveType::Guid,
                IdTypeMapping::Long => PrimitiveType::Long,
                IdTypeMapping::Object => PrimitiveType::Object,
            }),
            "Float" => Some(match self.config.float_type() {
                FloatTypeMapping::Decimal => PrimitiveType::Decimal,
                FloatTypeMapping::Float => PrimitiveType::Float,
                FloatTypeMapping::Double => PrimitiveType::Double,
            }),
            _ => None,
        };

        match primitive {
            Some(p) => ScalarMapping {
                ty: TypeRef::primitive(p),
                unmapped: false,
            },
            None => ScalarMapping {
                ty: TypeRef::primitive(PrimitiveType::Object),
                unmapped: true,
            },
        }
    }

    /// Identifier of an enum member.
    pub fn target_enum_member_name(&self, value: &str) -> String {
        let name = match self.config.enum_naming() {
            EnumNaming::Original => value.to_string(),
            EnumNaming::PascalCase => to_pascal_case(value),
        };
        self.convention.safe_name(&sanitize_identifier(&name))
    }

    /// Identifier of a property; a name equal to its owner gets a `_` suffix.
    pub fn target_field_name(&self, field: &str, owner: &str) -> String {
        let mut name = sanitize_identifier(&(self.convention.member_case)(field));
        if name == owner {
            name.push('_');
        }
        self.convention.safe_name(&name)
    }

    /// Class holding the arguments of `owner.field`.
    pub fn argument_holder_name(&self, owner: &str, field: &str) -> String {
        sanitize_identifier(&format!("{owner}{}Args", to_pascal_case(field)))
    }

    /// Query builder of a composite type, without the interface prefix.
    pub fn query_builder_name(&self, ty: &SchemaType) -> String {
        format!("{}QueryBuilder", self.target_class_name(&ty.name))
    }

    /// Builder method selecting a field.
    pub fn selection_method_name(&self, field: &str) -> String {
        sanitize_identifier(&format!("With{}", to_pascal_case(field)))
    }

    /// Builder method adding an inline fragment on a possible type.
    pub fn fragment_method_name(&self, variant: &SchemaType) -> String {
        format!("On{}", self.target_class_name(&variant.name))
    }

    /// Parameter identifier of an argument.
    pub fn parameter_name(&self, argument: &str) -> String {
        self.convention
            .safe_name(&sanitize_identifier(&(self.convention.parameter_case)(argument)))
    }

    /// Whether a member named `target` for wire name `original` must carry an
    /// explicit serialized name.
    pub fn needs_serialized_name(&self, original: &str, target: &str) -> bool {
        let target = target.trim_start_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '_'));
        self.config
            .json_property_generation()
            .requires_annotation(original, target)
    }
}
