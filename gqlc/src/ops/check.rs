//! Check operation: validate schema and configuration without writing.

use eyre::{Context, Result};
use gqlc_codegen::GeneratorConfiguration;
use gqlc_codegen_csharp::Generator;
use gqlc_schema::{Schema, is_builtin_scalar};

use crate::reports::CheckReport;

/// Kinds in reporting order; built-in scalars are not counted.
const KINDS: &[&str] = &["object", "interface", "union", "enum", "input object", "scalar"];

/// Execute the check operation.
///
/// Runs a full generation in memory so layout and naming problems surface
/// exactly as they would during `generate`.
pub fn check(schema: &Schema, config: &GeneratorConfiguration, source: &str) -> Result<CheckReport> {
    let generation = Generator::new(schema, config)
        .preview()
        .wrap_err("Validation failed")?;

    let type_counts = KINDS
        .iter()
        .map(|&kind| {
            let count = schema
                .types()
                .filter(|ty| !ty.is_introspection() && ty.kind.as_str() == kind)
                .filter(|ty| !(ty.is_scalar() && is_builtin_scalar(&ty.name)))
                .count();
            (kind, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();

    let operations = schema
        .root_types()
        .into_iter()
        .map(|(kind, ty)| (kind.keyword(), ty.name.clone()))
        .collect();

    Ok(CheckReport {
        source: source.to_string(),
        type_counts,
        operations,
        unit_count: generation.units.len(),
        warnings: generation.diagnostics.iter().map(super::describe).collect(),
    })
}
