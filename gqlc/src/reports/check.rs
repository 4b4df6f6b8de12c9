//! Check command report data structures.

use super::output::{Output, Report};

/// Report data from schema and configuration validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Where the schema came from.
    pub source: String,
    /// Generated declarations per schema kind, e.g. `("object", 4)`.
    pub type_counts: Vec<(&'static str, usize)>,
    /// Root operations as `(keyword, type name)`.
    pub operations: Vec<(&'static str, String)>,
    /// Number of units a generation run would produce.
    pub unit_count: usize,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.source));
        out.newline();

        let total: usize = self.type_counts.iter().map(|(_, count)| count).sum();
        out.section(&format!("Types ({})", total));
        for (kind, count) in &self.type_counts {
            out.key_value_indented(kind, &count.to_string());
        }
        out.newline();

        out.section("Operations");
        for (keyword, type_name) in &self.operations {
            out.key_value_indented(keyword, type_name);
        }
        out.newline();

        out.key_value("Units", &self.unit_count.to_string());
        out.key_value("Warnings", &self.warnings.len().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::RecordedOutput;

    #[test]
    fn test_render_counts() {
        let report = CheckReport {
            source: "blog.json".into(),
            type_counts: vec![("object", 4), ("enum", 1)],
            operations: vec![("query", "Query".into())],
            unit_count: 1,
            warnings: vec![],
        };
        let mut out = RecordedOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "✓ blog.json is valid");
        assert!(out.lines.contains(&"Types (5):".to_string()));
        assert!(out.lines.contains(&"  object: 4".to_string()));
        assert!(out.lines.contains(&"  query: Query".to_string()));
        assert_eq!(out.lines.last().map(String::as_str), Some("Warnings: 0"));
    }
}
