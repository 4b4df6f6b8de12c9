//! Generate operation: C# client code from a schema.

use std::path::Path;

use eyre::{Context, Result, eyre};
use gqlc_codegen::GeneratorConfiguration;
use gqlc_codegen_csharp::Generator;
use gqlc_schema::Schema;

use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output file (single mode) or directory (multiple mode).
    pub output: Option<&'a Path>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Files are written only after every unit rendered successfully.
pub fn generate(
    schema: &Schema,
    config: &GeneratorConfiguration,
    source: &str,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let generator = Generator::new(schema, config);

    let (result, diagnostics) = if opts.dry_run {
        let generation = generator.preview().wrap_err("Failed to generate code")?;
        let files = match opts.output {
            Some(output) => generator
                .files(&generation, output)
                .into_iter()
                .map(|file| PreviewFile {
                    path: file.path().display().to_string(),
                    content: file.content().to_string(),
                })
                .collect(),
            None => generation
                .units
                .iter()
                .map(|unit| PreviewFile {
                    path: unit.file_name.clone(),
                    content: unit.content.clone(),
                })
                .collect(),
        };
        (GenerationResult::Preview(files), generation.diagnostics)
    } else {
        let output = opts
            .output
            .ok_or_else(|| eyre!("--output-path is required unless --dry-run is given"))?;
        let generated = generator
            .generate(output)
            .wrap_err("Failed to generate code")?;
        let files = generated
            .written
            .into_iter()
            .map(|written| WrittenFile {
                path: written.path,
                bytes: written.bytes,
            })
            .collect();
        (GenerationResult::Written(files), generated.diagnostics)
    };

    Ok(GenerateReport {
        source: source.to_string(),
        namespace: config.namespace().to_string(),
        warnings: diagnostics.iter().map(super::describe).collect(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use gqlc_codegen::{config::OutputMode, testing::blog_schema};

    use super::*;

    fn config(mode: OutputMode) -> GeneratorConfiguration {
        GeneratorConfiguration::builder()
            .namespace("Blog")
            .output_mode(mode)
            .build()
            .unwrap()
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = blog_schema();
        let report = generate(
            &schema,
            &config(OutputMode::Multiple),
            "blog.json",
            GenerateOptions {
                output: Some(dir.path()),
                dry_run: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(files) = &report.result else {
            panic!("expected a preview");
        };
        assert_eq!(files.len(), 9);
        assert!(files.iter().any(|f| f.path.ends_with("User.cs")));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("DateTime"));
    }

    #[test]
    fn test_writes_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("BlogClient.cs");
        let schema = blog_schema();
        let report = generate(
            &schema,
            &config(OutputMode::Single),
            "blog.json",
            GenerateOptions {
                output: Some(&output),
                dry_run: false,
            },
        )
        .unwrap();

        let GenerationResult::Written(files) = &report.result else {
            panic!("expected written files");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, output);
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.len(), files[0].bytes);
        assert!(content.contains("namespace Blog"));
    }

    #[test]
    fn test_output_required_without_dry_run() {
        let schema = blog_schema();
        let err = generate(
            &schema,
            &config(OutputMode::Single),
            "blog.json",
            GenerateOptions {
                output: None,
                dry_run: false,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("--output-path"));
    }
}
