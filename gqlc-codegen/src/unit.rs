//! Rendered output units.

use std::path::Path;

use gqlc_core::File;

use crate::{language::LanguageTarget, layout::UnitPlan};

/// A rendered output artifact (one logical file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub name: String,
    /// `<name>.<extension>`
    pub file_name: String,
    /// Names of the declarations in the unit, in rendering order.
    pub declarations: Vec<String>,
    /// Other units this one references.
    pub references: Vec<String>,
    /// Full rendered text.
    pub content: String,
}

impl GeneratedUnit {
    /// Render a planned unit with the given target.
    pub fn render(plan: &UnitPlan<'_>, target: &dyn LanguageTarget) -> Self {
        Self {
            name: plan.name.clone(),
            file_name: format!("{}.{}", plan.name, target.file_extension()),
            declarations: plan.declarations.iter().map(|d| d.name().to_string()).collect(),
            references: plan.references.clone(),
            content: target.render_unit(plan),
        }
    }

    /// File to write when the unit lands in `dir`.
    pub fn to_file(&self, dir: &Path) -> File {
        File::new(dir.join(&self.file_name), self.content.clone())
    }
}
