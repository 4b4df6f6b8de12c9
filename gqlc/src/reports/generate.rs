//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Where the schema came from.
    pub source: String,
    /// Namespace of the generated code.
    pub namespace: String,
    /// Warning messages from generation.
    pub warnings: Vec<String>,
    /// Files written or previewed.
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(Vec<WrittenFile>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// A file that was written.
#[derive(Debug)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(files) => self.render_written(out, files),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, files: &[WrittenFile]) {
        out.key_value("Schema", &self.source);
        out.key_value("Namespace", &self.namespace);
        out.newline();

        out.section(&format!("Generated ({})", files.len()));
        for file in files {
            out.added_item(&format!("{} ({} B)", file.path.display(), file.bytes));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        let noun = if files.len() == 1 { "file" } else { "files" };
        out.preformatted(&format!("{} {} would be generated", files.len(), noun));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordedOutput;

    fn report(result: GenerationResult) -> GenerateReport {
        GenerateReport {
            source: "schema.json".into(),
            namespace: "Acme".into(),
            warnings: vec!["scalar 'DateTime' has no mapping".into()],
            result,
        }
    }

    #[test]
    fn test_written_lists_files_with_sizes() {
        let mut out = RecordedOutput::default();
        report(GenerationResult::Written(vec![WrittenFile {
            path: PathBuf::from("out/Client.cs"),
            bytes: 1024,
        }]))
        .render(&mut out);

        assert_eq!(out.lines[0], "warning: scalar 'DateTime' has no mapping");
        assert!(out.lines.contains(&"Namespace: Acme".to_string()));
        assert!(out.lines.contains(&"Generated (1):".to_string()));
        assert!(out.lines.contains(&format!("  + {} (1024 B)", PathBuf::from("out/Client.cs").display())));
    }

    #[test]
    fn test_preview_prints_contents() {
        let mut out = RecordedOutput::default();
        report(GenerationResult::Preview(vec![
            PreviewFile {
                path: "User.cs".into(),
                content: "class User { }".into(),
            },
            PreviewFile {
                path: "BaseClasses.cs".into(),
                content: "class Base { }".into(),
            },
        ]))
        .render(&mut out);

        assert_eq!(
            &out.lines[1..],
            &[
                "── User.cs ──",
                "class User { }",
                "── BaseClasses.cs ──",
                "class Base { }",
                "── Summary ──",
                "2 files would be generated",
            ]
        );
    }
}
