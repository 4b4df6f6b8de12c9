use std::path::Path;

use eyre::Result;
use gqlc_codegen::{
    Diagnostic, Generation, GenerationContext, GenerationError, GeneratorConfiguration,
    config::OutputMode,
};
use gqlc_core::{File, WriteResult, write_all};
use gqlc_schema::Schema;

use crate::CSharpTarget;

/// Result of writing generated code to disk
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written, in unit order
    pub written: Vec<WriteResult>,
    /// Non-fatal findings from generation
    pub diagnostics: Vec<Diagnostic>,
}

/// C# client generator for one schema and configuration
pub struct Generator<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfiguration,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfiguration) -> Self {
        Self { schema, config }
    }

    /// Render every unit without touching the filesystem
    pub fn preview(&self) -> std::result::Result<Generation, GenerationError> {
        let target = CSharpTarget::new(self.config);
        GenerationContext::new(self.schema, self.config, &target).generate()
    }

    /// Map rendered units to output files.
    ///
    /// In single-unit mode an output path ending in `.cs` is the file
    /// itself; any other path is treated as a directory.
    pub fn files(&self, generation: &Generation, output: &Path) -> Vec<File> {
        let single_file = self.config.output_mode() == OutputMode::Single
            && output
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"));

        generation
            .units
            .iter()
            .map(|unit| {
                if single_file {
                    File::new(output, unit.content.clone())
                } else {
                    unit.to_file(output)
                }
            })
            .collect()
    }

    /// Generate and write every unit.
    ///
    /// Nothing is written unless generation succeeds as a whole.
    pub fn generate(&self, output: &Path) -> Result<GenerateResult> {
        let generation = self.preview()?;
        let files = self.files(&generation, output);
        let written = write_all(&files)?;
        tracing::debug!(files = written.len(), output = %output.display(), "wrote generated units");
        Ok(GenerateResult {
            written,
            diagnostics: generation.diagnostics,
        })
    }
}
