//! Generation context: one run from schema to rendered units.

use gqlc_schema::Schema;

use crate::{
    builder::Declaration,
    config::{GeneratorConfiguration, OutputMode},
    diagnostic::Diagnostic,
    emitter::Emitter,
    error::{GenerationError, Result},
    language::LanguageTarget,
    layout::{LayoutStrategy, MultiUnitLayout, OPERATIONS_NAME, SingleUnitLayout},
    naming::NamingPolicy,
    unit::GeneratedUnit,
};

/// Diagnostic code for custom scalars without a mapping.
pub const UNMAPPABLE_SCALAR: &str = "UnmappableScalar";

/// Result of a successful generation run.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    /// Look up a unit by name.
    pub fn unit(&self, name: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.name == name)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Drives one generation run.
///
/// The schema and configuration are borrowed immutably; the run performs
/// no I/O, so a context can be shared freely across threads.
pub struct GenerationContext<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfiguration,
    target: &'a dyn LanguageTarget,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        schema: &'a Schema,
        config: &'a GeneratorConfiguration,
        target: &'a dyn LanguageTarget,
    ) -> Self {
        Self {
            schema,
            config,
            target,
        }
    }

    /// Emit, lay out and render every unit.
    ///
    /// Any failure aborts the whole run; no partial output is returned.
    pub fn generate(&self) -> Result<Generation> {
        self.check_class_mapping()?;
        let naming = NamingPolicy::new(self.config, self.target.naming());
        let emitter = Emitter::new(self.schema, naming);
        let diagnostics = self.check_scalars(&naming);

        let emitted = self
            .schema
            .types()
            .filter(|ty| !ty.is_scalar() && !ty.is_introspection())
            .map(|ty| {
                let emitted = emitter.emit(ty)?;
                tracing::debug!(
                    schema_type = %ty.name,
                    target = %emitted.target_name,
                    declarations = emitted.declarations.len(),
                    "emitted type"
                );
                Ok(emitted)
            })
            .collect::<Result<Vec<_>>>()?;

        let operations = Declaration::Operations(emitter.operations(OPERATIONS_NAME));

        let plans = match self.config.output_mode() {
            OutputMode::Single => SingleUnitLayout {
                unit_name: self.config.unit_name().to_string(),
            }
            .plan(&emitted, &operations, self.target)?,
            OutputMode::Multiple => MultiUnitLayout.plan(&emitted, &operations, self.target)?,
        };

        let units: Vec<GeneratedUnit> = plans
            .iter()
            .map(|plan| GeneratedUnit::render(plan, self.target))
            .collect();

        tracing::info!(
            language = self.target.language(),
            types = emitted.len(),
            units = units.len(),
            warnings = diagnostics.len(),
            "generation finished"
        );

        Ok(Generation { units, diagnostics })
    }

    /// Class mapping targets are used verbatim, so a keyword cannot be one.
    fn check_class_mapping(&self) -> Result<()> {
        let naming = self.target.naming();
        match self
            .config
            .class_mapping()
            .iter()
            .find(|(_, target)| naming.is_reserved(target))
        {
            Some((schema_name, target)) => Err(GenerationError::ReservedClassName {
                schema_name: schema_name.to_string(),
                target: target.to_string(),
                language: self.target.language(),
            }),
            None => Ok(()),
        }
    }

    /// Warn once per custom scalar that falls back to the opaque type.
    fn check_scalars(&self, naming: &NamingPolicy<'_>) -> Vec<Diagnostic> {
        self.schema
            .types()
            .filter(|ty| ty.is_scalar() && !ty.is_introspection())
            .filter(|ty| naming.target_scalar_type(&ty.name).unmapped)
            .map(|ty| {
                tracing::warn!(scalar = %ty.name, "no mapping for custom scalar, using object");
                Diagnostic::warning(
                    UNMAPPABLE_SCALAR,
                    format!(
                        "custom scalar '{}' has no type mapping and falls back to an opaque object",
                        ty.name
                    ),
                )
                .at(&ty.name)
            })
            .collect()
    }
}
