//! Diagnostics collected during generation.
//!
//! Non-fatal findings (such as a custom scalar with no mapping) are recorded
//! here instead of failing the run. Anything fatal is a
//! [`GenerationError`](crate::GenerationError) instead.

use serde::Serialize;

/// A warning produced while generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Stable identifier of the finding (e.g., "UnmappableScalar").
    pub code: &'static str,
    /// The diagnostic message.
    pub message: String,
    /// Optional schema location (e.g., "User.createdAt").
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning[{}]: {}", self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
