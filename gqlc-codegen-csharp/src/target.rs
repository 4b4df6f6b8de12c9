//! The C# language target.

use std::sync::LazyLock;

use gqlc_codegen::{
    GeneratorConfiguration, LanguageTarget, NamingConvention,
    builder::{Accessibility, StructureRenderer},
    config::CSharpVersion,
    layout::UnitPlan,
};
use gqlc_core::GENERATED_HEADER;

use crate::{
    csharp_file::{CSharpFile, Using},
    infrastructure::{INFRASTRUCTURE_TYPES, INFRASTRUCTURE_USINGS, infrastructure},
    naming::CSHARP_NAMING,
    structure_renderer::CSharpStructureRenderer,
};

/// Namespaces every unit imports.
const BASE_USINGS: &[&str] = &["System", "System.Collections.Generic", "Newtonsoft.Json"];

/// Namespaces needed by string enums.
const ENUM_USINGS: &[&str] = &["System.Runtime.Serialization", "Newtonsoft.Json.Converters"];

/// Framework types generated declarations name without a namespace
/// qualifier. A schema type with one of these names would shadow it.
const FRAMEWORK_TYPES: &[&str] = &[
    "Guid",
    "ICollection",
    "JsonProperty",
    "JsonPropertyAttribute",
    "JsonConverter",
    "JsonConverterAttribute",
    "StringEnumConverter",
    "EnumMember",
    "EnumMemberAttribute",
    "Obsolete",
    "ObsoleteAttribute",
];

static RESERVED_TYPE_NAMES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INFRASTRUCTURE_TYPES
        .iter()
        .chain(FRAMEWORK_TYPES)
        .copied()
        .collect()
});

/// Renders planned units as C# source files.
#[derive(Debug, Clone)]
pub struct CSharpTarget {
    namespace: String,
    version: CSharpVersion,
    accessibility: Accessibility,
    renderer: CSharpStructureRenderer,
}

impl CSharpTarget {
    pub fn new(config: &GeneratorConfiguration) -> Self {
        Self {
            namespace: config.namespace().to_string(),
            version: config.csharp_version(),
            accessibility: config.accessibility(),
            renderer: CSharpStructureRenderer::new(config.csharp_version()),
        }
    }

    fn usings(&self, unit: &UnitPlan<'_>) -> Vec<Using> {
        let mut usings: Vec<&str> = BASE_USINGS.to_vec();
        if unit.has_enums() || unit.shared {
            usings.extend(ENUM_USINGS);
        }
        if unit.shared {
            usings.extend(INFRASTRUCTURE_USINGS);
        }
        usings.into_iter().map(Using::new).collect()
    }
}

impl LanguageTarget for CSharpTarget {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn file_extension(&self) -> &'static str {
        "cs"
    }

    fn naming(&self) -> &NamingConvention {
        &CSHARP_NAMING
    }

    fn reserved_type_names(&self) -> &[&'static str] {
        &RESERVED_TYPE_NAMES
    }

    fn render_unit(&self, unit: &UnitPlan<'_>) -> String {
        let mut file = CSharpFile::new(&self.namespace)
            .auto_generated(GENERATED_HEADER)
            .nullable(self.version.nullable_references())
            .usings(self.usings(unit));

        if unit.shared {
            file = file.add(infrastructure(
                self.accessibility,
                self.version.nullable_references(),
            ));
        }

        file.add_all(
            unit.declarations
                .iter()
                .map(|declaration| self.renderer.render_declaration(declaration)),
        )
        .render()
    }
}
