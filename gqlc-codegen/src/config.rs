//! Generator configuration.
//!
//! [`GeneratorConfiguration`] is the immutable policy bundle consumed by the
//! engine. It can only be obtained from [`GeneratorConfigurationBuilder::build`],
//! which validates every option and mapping table up front. The
//! serde-facing [`GeneratorOptions`] is what configuration files and command
//! line flags produce before validation.

use std::{fmt, str::FromStr};

use gqlc_core::validate_identifier;
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

pub use crate::builder::Accessibility;

/// Default name of the single output unit.
pub const DEFAULT_UNIT_NAME: &str = "GraphQlClient";

/// Default namespace of generated code.
pub const DEFAULT_NAMESPACE: &str = "GraphQlApi";

/// Errors raised while building a [`GeneratorConfiguration`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown {option} '{value}' (expected one of: {expected})")]
    UnknownOption {
        option: &'static str,
        value: String,
        expected: String,
    },

    #[error("malformed {table} entry '{entry}': expected '<schema name>:<target name>'")]
    MalformedMapping { table: &'static str, entry: String },

    #[error("{table} maps '{key}' to both '{first}' and '{second}'")]
    DuplicateMapping {
        table: &'static str,
        key: String,
        first: String,
        second: String,
    },

    #[error("class mapping sends both '{first}' and '{second}' to '{target}'")]
    ConflictingMapping {
        target: String,
        first: String,
        second: String,
    },

    #[error("invalid {what} '{value}': {reason}")]
    InvalidIdentifier {
        what: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("invalid configuration file: {message}")]
    InvalidFile { message: String },
}

type Result<T> = std::result::Result<T, ConfigurationError>;

/// Parse an option value against a fixed table.
///
/// Matching ignores case, `-` and `_`, so `NewestWithNullableReferences`,
/// `newest-with-nullable-references` and `newest_with_nullable_references`
/// are the same value.
fn parse_option<T: Copy>(option: &'static str, value: &str, table: &[(&str, T)]) -> Result<T> {
    let normalized: String = value
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    table
        .iter()
        .find(|(name, _)| name.replace('-', "") == normalized)
        .map(|(_, v)| *v)
        .ok_or_else(|| ConfigurationError::UnknownOption {
            option,
            value: value.to_string(),
            expected: table
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Target language dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CSharpVersion {
    /// C# 6: block-bodied members, no nullable reference annotations.
    #[default]
    Compatible,
    /// Expression-bodied members.
    Newest,
    /// Newest plus `#nullable enable` and `?` on optional reference types.
    NewestWithNullableReferences,
}

impl CSharpVersion {
    const VALUES: &[(&str, Self)] = &[
        ("compatible", Self::Compatible),
        ("newest", Self::Newest),
        ("newest-with-nullable-references", Self::NewestWithNullableReferences),
    ];

    pub fn expression_bodied(&self) -> bool {
        !matches!(self, Self::Compatible)
    }

    pub fn nullable_references(&self) -> bool {
        matches!(self, Self::NewestWithNullableReferences)
    }
}

/// Target type of the `ID` scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdTypeMapping {
    String,
    #[default]
    Guid,
    Long,
    Object,
}

impl IdTypeMapping {
    const VALUES: &[(&str, Self)] = &[
        ("string", Self::String),
        ("guid", Self::Guid),
        ("long", Self::Long),
        ("object", Self::Object),
    ];
}

/// Target type of the `Float` scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatTypeMapping {
    #[default]
    Decimal,
    Float,
    Double,
}

impl FloatTypeMapping {
    const VALUES: &[(&str, Self)] = &[
        ("decimal", Self::Decimal),
        ("float", Self::Float),
        ("double", Self::Double),
    ];
}

/// When members carry an explicit serialized-name annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonPropertyGeneration {
    Never,
    /// Only when the names differ ignoring case.
    CaseInsensitive,
    /// Whenever the names differ.
    #[default]
    CaseSensitive,
    Always,
}

impl JsonPropertyGeneration {
    const VALUES: &[(&str, Self)] = &[
        ("never", Self::Never),
        ("case-insensitive", Self::CaseInsensitive),
        ("case-sensitive", Self::CaseSensitive),
        ("always", Self::Always),
    ];

    /// Whether a member named `target` for wire name `original` needs an annotation.
    pub fn requires_annotation(&self, original: &str, target: &str) -> bool {
        match self {
            Self::Never => false,
            Self::CaseInsensitive => !original.eq_ignore_ascii_case(target),
            Self::CaseSensitive => original != target,
            Self::Always => true,
        }
    }
}

/// Casing of generated enum members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumNaming {
    Original,
    #[default]
    PascalCase,
}

impl EnumNaming {
    const VALUES: &[(&str, Self)] = &[("original", Self::Original), ("pascal-case", Self::PascalCase)];
}

/// How declarations are grouped into output units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything in one unit.
    #[default]
    Single,
    /// One unit per schema type plus a shared unit.
    Multiple,
}

impl OutputMode {
    const VALUES: &[(&str, Self)] = &[
        ("single", Self::Single),
        ("single-file", Self::Single),
        ("multiple", Self::Multiple),
        ("multiple-files", Self::Multiple),
        ("one-class-per-file", Self::Multiple),
    ];
}

impl Accessibility {
    const VALUES: &[(&str, Self)] = &[("public", Self::Public), ("internal", Self::Internal)];
}

macro_rules! option_enum {
    ($ty:ty, $option:literal) => {
        impl FromStr for $ty {
            type Err = ConfigurationError;

            fn from_str(s: &str) -> Result<Self> {
                parse_option($option, s, Self::VALUES)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let name = Self::VALUES
                    .iter()
                    .find(|(_, v)| v == self)
                    .map(|(name, _)| *name)
                    .unwrap_or_default();
                f.write_str(name)
            }
        }
    };
}

option_enum!(CSharpVersion, "C# version");
option_enum!(IdTypeMapping, "ID type mapping");
option_enum!(FloatTypeMapping, "Float type mapping");
option_enum!(JsonPropertyGeneration, "JSON property generation");
option_enum!(EnumNaming, "enum value naming");
option_enum!(OutputMode, "output type");
option_enum!(Accessibility, "member accessibility");

/// Validated schema type name -> target type name overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMapping {
    entries: IndexMap<String, String>,
}

impl ClassMapping {
    pub fn get(&self, schema_name: &str) -> Option<&str> {
        self.entries.get(schema_name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validated scalar name -> target type overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScalarMappingTable {
    entries: IndexMap<String, String>,
}

impl ScalarMappingTable {
    pub fn get(&self, scalar: &str) -> Option<&str> {
        self.entries.get(scalar).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable configuration bundle for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfiguration {
    csharp_version: CSharpVersion,
    namespace: String,
    unit_name: String,
    class_prefix: String,
    class_suffix: String,
    accessibility: Accessibility,
    partial_classes: bool,
    class_mapping: ClassMapping,
    scalar_mapping: ScalarMappingTable,
    id_type: IdTypeMapping,
    float_type: FloatTypeMapping,
    json_property_generation: JsonPropertyGeneration,
    enum_naming: EnumNaming,
    output_mode: OutputMode,
}

impl GeneratorConfiguration {
    pub fn builder() -> GeneratorConfigurationBuilder {
        GeneratorConfigurationBuilder::default()
    }

    pub fn csharp_version(&self) -> CSharpVersion {
        self.csharp_version
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn unit_name(&self) -> &str {
        &self.unit_name
    }

    pub fn class_prefix(&self) -> &str {
        &self.class_prefix
    }

    pub fn class_suffix(&self) -> &str {
        &self.class_suffix
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn partial_classes(&self) -> bool {
        self.partial_classes
    }

    pub fn class_mapping(&self) -> &ClassMapping {
        &self.class_mapping
    }

    pub fn scalar_mapping(&self) -> &ScalarMappingTable {
        &self.scalar_mapping
    }

    pub fn id_type(&self) -> IdTypeMapping {
        self.id_type
    }

    pub fn float_type(&self) -> FloatTypeMapping {
        self.float_type
    }

    pub fn json_property_generation(&self) -> JsonPropertyGeneration {
        self.json_property_generation
    }

    pub fn enum_naming(&self) -> EnumNaming {
        self.enum_naming
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }
}

impl Default for GeneratorConfiguration {
    fn default() -> Self {
        Self {
            csharp_version: CSharpVersion::default(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            unit_name: DEFAULT_UNIT_NAME.to_string(),
            class_prefix: String::new(),
            class_suffix: String::new(),
            accessibility: Accessibility::default(),
            partial_classes: false,
            class_mapping: ClassMapping::default(),
            scalar_mapping: ScalarMappingTable::default(),
            id_type: IdTypeMapping::default(),
            float_type: FloatTypeMapping::default(),
            json_property_generation: JsonPropertyGeneration::default(),
            enum_naming: EnumNaming::default(),
            output_mode: OutputMode::default(),
        }
    }
}

/// Collects raw settings and validates them into a [`GeneratorConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigurationBuilder {
    config: GeneratorConfiguration,
    class_mapping: Vec<(String, String)>,
    scalar_mapping: Vec<(String, String)>,
    pending: Option<ConfigurationError>,
}

impl GeneratorConfigurationBuilder {
    pub fn csharp_version(mut self, version: CSharpVersion) -> Self {
        self.config.csharp_version = version;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn unit_name(mut self, name: impl Into<String>) -> Self {
        self.config.unit_name = name.into();
        self
    }

    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.class_prefix = prefix.into();
        self
    }

    pub fn class_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.class_suffix = suffix.into();
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.config.accessibility = accessibility;
        self
    }

    pub fn partial_classes(mut self, partial: bool) -> Self {
        self.config.partial_classes = partial;
        self
    }

    pub fn id_type(mut self, id_type: IdTypeMapping) -> Self {
        self.config.id_type = id_type;
        self
    }

    pub fn float_type(mut self, float_type: FloatTypeMapping) -> Self {
        self.config.float_type = float_type;
        self
    }

    pub fn json_property_generation(mut self, mode: JsonPropertyGeneration) -> Self {
        self.config.json_property_generation = mode;
        self
    }

    pub fn enum_naming(mut self, naming: EnumNaming) -> Self {
        self.config.enum_naming = naming;
        self
    }

    pub fn output_mode(mut self, mode: OutputMode) -> Self {
        self.config.output_mode = mode;
        self
    }

    /// Override the target name of a schema type.
    pub fn class_mapping(mut self, schema_name: impl Into<String>, target: impl Into<String>) -> Self {
        self.class_mapping.push((schema_name.into(), target.into()));
        self
    }

    /// Add a class mapping written as `Schema:Target`.
    pub fn class_mapping_entry(mut self, entry: &str) -> Self {
        match parse_mapping_entry("class mapping", entry) {
            Ok(pair) => self.class_mapping.push(pair),
            Err(err) => self.fail(err),
        }
        self
    }

    /// Override the target type of a scalar.
    pub fn scalar_mapping(mut self, scalar: impl Into<String>, target: impl Into<String>) -> Self {
        self.scalar_mapping.push((scalar.into(), target.into()));
        self
    }

    /// Add a scalar mapping written as `Scalar:Target`.
    pub fn scalar_mapping_entry(mut self, entry: &str) -> Self {
        match parse_mapping_entry("scalar mapping", entry) {
            Ok(pair) => self.scalar_mapping.push(pair),
            Err(err) => self.fail(err),
        }
        self
    }

    fn fail(&mut self, err: ConfigurationError) {
        self.pending.get_or_insert(err);
    }

    /// Validate everything and freeze the configuration.
    pub fn build(self) -> Result<GeneratorConfiguration> {
        if let Some(err) = self.pending {
            return Err(err);
        }

        let mut config = self.config;

        validate_namespace(&config.namespace)?;
        check_identifier("unit name", &config.unit_name)?;
        check_affix("class prefix", &config.class_prefix)?;
        check_affix("class suffix", &config.class_suffix)?;

        let class_entries = dedupe("class mapping", self.class_mapping)?;
        let mut targets: IndexMap<&str, &str> = IndexMap::new();
        for (schema_name, target) in &class_entries {
            check_identifier("schema type name", schema_name)?;
            check_identifier("class mapping target", target)?;
            if let Some(first) = targets.insert(target.as_str(), schema_name.as_str()) {
                return Err(ConfigurationError::ConflictingMapping {
                    target: target.clone(),
                    first: first.to_string(),
                    second: schema_name.clone(),
                });
            }
        }

        let scalar_entries = dedupe("scalar mapping", self.scalar_mapping)?;
        for (scalar, target) in &scalar_entries {
            check_identifier("scalar name", scalar)?;
            check_type_expression(target)?;
        }

        config.class_mapping = ClassMapping {
            entries: class_entries,
        };
        config.scalar_mapping = ScalarMappingTable {
            entries: scalar_entries,
        };
        Ok(config)
    }
}

/// Split a `Key:Value` mapping entry.
pub fn parse_mapping_entry(table: &'static str, entry: &str) -> Result<(String, String)> {
    let malformed = || ConfigurationError::MalformedMapping {
        table,
        entry: entry.to_string(),
    };
    let (key, value) = entry.split_once(':').ok_or_else(malformed)?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(malformed());
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse a list of `Key:Value` entries, rejecting malformed and duplicate keys.
pub fn parse_mapping_entries(
    table: &'static str,
    entries: &[String],
) -> Result<IndexMap<String, String>> {
    let pairs = entries
        .iter()
        .map(|entry| parse_mapping_entry(table, entry))
        .collect::<Result<Vec<_>>>()?;
    dedupe(table, pairs)
}

/// Repeating an identical entry is harmless; repeating a key with a new value is not.
fn dedupe(table: &'static str, pairs: Vec<(String, String)>) -> Result<IndexMap<String, String>> {
    let mut entries: IndexMap<String, String> = IndexMap::new();
    for (key, value) in pairs {
        match entries.get(&key) {
            Some(existing) if *existing != value => {
                return Err(ConfigurationError::DuplicateMapping {
                    table,
                    key,
                    first: existing.clone(),
                    second: value,
                });
            }
            Some(_) => {}
            None => {
                entries.insert(key, value);
            }
        }
    }
    Ok(entries)
}

fn check_identifier(what: &'static str, value: &str) -> Result<()> {
    match validate_identifier(value) {
        Some(reason) => Err(ConfigurationError::InvalidIdentifier {
            what,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Prefixes and suffixes may be empty but must otherwise be identifier characters.
fn check_affix(what: &'static str, value: &str) -> Result<()> {
    if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidIdentifier {
            what,
            value: value.to_string(),
            reason: "name must contain only letters, numbers, and underscores",
        })
    }
}

fn validate_namespace(namespace: &str) -> Result<()> {
    namespace
        .split('.')
        .try_for_each(|segment| match validate_identifier(segment) {
            Some(reason) => Err(ConfigurationError::InvalidIdentifier {
                what: "namespace",
                value: namespace.to_string(),
                reason,
            }),
            None => Ok(()),
        })
}

/// Scalar targets are type expressions such as `System.DateTimeOffset` or `List<int>`.
fn check_type_expression(value: &str) -> Result<()> {
    let invalid = |reason| ConfigurationError::InvalidIdentifier {
        what: "scalar mapping target",
        value: value.to_string(),
        reason,
    };
    match value.chars().next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return Err(invalid("type must start with a letter or underscore")),
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || "_.<>,?[] ".contains(c);
    if !value.chars().all(allowed) {
        return Err(invalid("type contains characters that cannot appear in a type name"));
    }
    let depth = value.chars().try_fold(0i32, |depth, c| {
        let depth = match c {
            '<' => depth + 1,
            '>' => depth - 1,
            _ => depth,
        };
        (depth >= 0).then_some(depth)
    });
    if depth != Some(0) {
        return Err(invalid("unbalanced generic brackets"));
    }
    Ok(())
}

/// Raw, unvalidated options as read from `gqlc.toml` or command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorOptions {
    pub namespace: Option<String>,
    pub unit_name: Option<String>,
    pub output_type: Option<String>,
    pub csharp_version: Option<String>,
    pub class_prefix: Option<String>,
    pub class_suffix: Option<String>,
    pub partial_classes: Option<bool>,
    pub member_accessibility: Option<String>,
    pub id_type_mapping: Option<String>,
    pub float_type_mapping: Option<String>,
    pub json_property_attribute: Option<String>,
    pub enum_value_naming: Option<String>,
    #[serde(default)]
    pub class_mapping: IndexMap<String, String>,
    #[serde(default)]
    pub scalar_mapping: IndexMap<String, String>,
}

impl GeneratorOptions {
    /// Parse options from the contents of a `gqlc.toml` file.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigurationError::InvalidFile {
            message: e.message().to_string(),
        })
    }

    /// Layer `overrides` on top of `self`; set values and mapping keys in
    /// `overrides` win.
    pub fn merge(mut self, overrides: GeneratorOptions) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if overrides.$field.is_some() {
                    self.$field = overrides.$field;
                })*
            };
        }
        take!(
            namespace,
            unit_name,
            output_type,
            csharp_version,
            class_prefix,
            class_suffix,
            partial_classes,
            member_accessibility,
            id_type_mapping,
            float_type_mapping,
            json_property_attribute,
            enum_value_naming,
        );
        self.class_mapping.extend(overrides.class_mapping);
        self.scalar_mapping.extend(overrides.scalar_mapping);
        self
    }

    /// Parse every option value and validate the result.
    pub fn build(self) -> Result<GeneratorConfiguration> {
        let mut builder = GeneratorConfiguration::builder();

        if let Some(namespace) = self.namespace {
            builder = builder.namespace(namespace);
        }
        if let Some(unit_name) = self.unit_name {
            builder = builder.unit_name(unit_name);
        }
        if let Some(value) = self.output_type {
            builder = builder.output_mode(value.parse()?);
        }
        if let Some(value) = self.csharp_version {
            builder = builder.csharp_version(value.parse()?);
        }
        if let Some(prefix) = self.class_prefix {
            builder = builder.class_prefix(prefix);
        }
        if let Some(suffix) = self.class_suffix {
            builder = builder.class_suffix(suffix);
        }
        if let Some(partial) = self.partial_classes {
            builder = builder.partial_classes(partial);
        }
        if let Some(value) = self.member_accessibility {
            builder = builder.accessibility(value.parse()?);
        }
        if let Some(value) = self.id_type_mapping {
            builder = builder.id_type(value.parse()?);
        }
        if let Some(value) = self.float_type_mapping {
            builder = builder.float_type(value.parse()?);
        }
        if let Some(value) = self.json_property_attribute {
            builder = builder.json_property_generation(value.parse()?);
        }
        if let Some(value) = self.enum_value_naming {
            builder = builder.enum_naming(value.parse()?);
        }
        for (schema_name, target) in self.class_mapping {
            builder = builder.class_mapping(schema_name, target);
        }
        for (scalar, target) in self.scalar_mapping {
            builder = builder.scalar_mapping(scalar, target);
        }

        builder.build()
    }
}
