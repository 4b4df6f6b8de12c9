//! Language-agnostic code generation traits.

use super::NamingConvention;
use crate::layout::UnitPlan;

/// Trait for target languages the engine can render into.
///
/// The engine decides *what* is declared and how declarations are grouped;
/// the target decides how a planned unit reads as source text.
pub trait LanguageTarget: Send + Sync {
    /// Language identifier (e.g., "csharp")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "cs")
    fn file_extension(&self) -> &'static str;

    /// Identifier rules of the language.
    fn naming(&self) -> &NamingConvention;

    /// Whether declarations must appear after everything they reference.
    ///
    /// Defaults to false; languages that resolve names in a single pass
    /// override this to get a reference-ordered layout.
    fn requires_ordered_declarations(&self) -> bool {
        false
    }

    /// Type names the target claims for itself, such as those of its
    /// support code or of framework types it refers to unqualified.
    fn reserved_type_names(&self) -> &[&'static str] {
        &[]
    }

    /// Render one planned unit into its full source text.
    fn render_unit(&self, unit: &UnitPlan<'_>) -> String;
}
