//! Arguments shared by commands that load a schema.

use std::{path::PathBuf, time::Duration};

use clap::Args;
use eyre::{Result, bail};
use gqlc_codegen::{GeneratorConfiguration, GeneratorOptions, config::parse_mapping_entries};
use gqlc_schema::Schema;

use super::UnwrapOrExit;
use crate::{
    ops,
    source::{Header, HttpMethod, SchemaSource},
};

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Introspection result to read
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with = "service_url",
        required_unless_present = "service_url"
    )]
    pub schema_file: Option<PathBuf>,

    /// GraphQL endpoint to introspect
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// HTTP method for the introspection request
    #[arg(long, value_enum, default_value_t = HttpMethod::Post)]
    pub http_method: HttpMethod,

    /// Extra request header (repeatable)
    #[arg(long = "header", value_name = "NAME=VALUE", requires = "service_url")]
    pub headers: Vec<Header>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub timeout: u64,
}

impl SourceArgs {
    pub fn source(&self) -> Result<SchemaSource> {
        match (&self.schema_file, &self.service_url) {
            (Some(path), None) => Ok(SchemaSource::File(path.clone())),
            (None, Some(url)) => Ok(SchemaSource::Service {
                url: url.clone(),
                method: self.http_method,
                headers: self.headers.clone(),
                timeout: Duration::from_secs(self.timeout),
            }),
            _ => bail!("exactly one of --schema-file and --service-url is required"),
        }
    }

    /// Fetch and resolve the schema; schema errors exit with a diagnostic report.
    pub fn load(&self) -> Result<(Schema, String)> {
        let document = self.source()?.fetch()?;
        let schema =
            gqlc_schema::parse_str_with_filename(&document.content, &document.label).unwrap_or_exit();
        Ok((schema, document.label))
    }
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Options file (defaults to ./gqlc.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Namespace of the generated code
    #[arg(long)]
    pub namespace: Option<String>,

    /// Name of the unit in single-file mode
    #[arg(long, value_name = "NAME")]
    pub unit_name: Option<String>,

    /// single or multiple
    #[arg(long, value_name = "TYPE")]
    pub output_type: Option<String>,

    /// compatible, newest or newest-with-nullable-references
    #[arg(long, value_name = "VERSION")]
    pub csharp_version: Option<String>,

    /// Prefix added to generated class names
    #[arg(long, value_name = "PREFIX")]
    pub class_prefix: Option<String>,

    /// Suffix added to generated class names
    #[arg(long, value_name = "SUFFIX")]
    pub class_suffix: Option<String>,

    /// Declare generated classes as partial
    #[arg(long)]
    pub partial_classes: bool,

    /// public or internal
    #[arg(long, value_name = "ACCESSIBILITY")]
    pub member_accessibility: Option<String>,

    /// C# type for the ID scalar: guid, string or object
    #[arg(long, value_name = "TYPE")]
    pub id_type_mapping: Option<String>,

    /// C# type for the Float scalar: decimal, double or float
    #[arg(long, value_name = "TYPE")]
    pub float_type_mapping: Option<String>,

    /// When to emit JsonProperty: always, case-sensitive, case-insensitive or never
    #[arg(long, value_name = "MODE")]
    pub json_property_attribute: Option<String>,

    /// original or pascal-case
    #[arg(long, value_name = "NAMING")]
    pub enum_value_naming: Option<String>,

    /// Custom class name (repeatable)
    #[arg(long = "class-mapping", value_name = "SCHEMA:TARGET")]
    pub class_mappings: Vec<String>,

    /// Custom scalar type (repeatable)
    #[arg(long = "scalar-mapping", value_name = "SCALAR:TARGET")]
    pub scalar_mappings: Vec<String>,
}

impl ConfigArgs {
    /// Options set on the command line.
    pub fn overrides(&self) -> Result<GeneratorOptions> {
        Ok(GeneratorOptions {
            namespace: self.namespace.clone(),
            unit_name: self.unit_name.clone(),
            output_type: self.output_type.clone(),
            csharp_version: self.csharp_version.clone(),
            class_prefix: self.class_prefix.clone(),
            class_suffix: self.class_suffix.clone(),
            partial_classes: self.partial_classes.then_some(true),
            member_accessibility: self.member_accessibility.clone(),
            id_type_mapping: self.id_type_mapping.clone(),
            float_type_mapping: self.float_type_mapping.clone(),
            json_property_attribute: self.json_property_attribute.clone(),
            enum_value_naming: self.enum_value_naming.clone(),
            class_mapping: parse_mapping_entries("class mapping", &self.class_mappings)?,
            scalar_mapping: parse_mapping_entries("scalar mapping", &self.scalar_mappings)?,
        })
    }

    /// Merge the options file with flags and validate.
    pub fn configuration(&self, require_namespace: bool) -> Result<GeneratorConfiguration> {
        let dir = std::env::current_dir()?;
        let file = ops::load_options(self.config.as_deref(), &dir)?;
        ops::resolve_configuration(file, self.overrides()?, require_namespace)
    }
}
