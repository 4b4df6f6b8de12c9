//! Core operations.
//!
//! This module contains the business logic for gqlc commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod config;
pub mod generate;

pub use check::check;
pub use config::{load_options, resolve_configuration};
pub use generate::{GenerateOptions, generate};

use gqlc_codegen::Diagnostic;

/// One-line description of a diagnostic, with its schema location when known.
pub(crate) fn describe(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(location) => format!("{} ({})\n  --> {}", diagnostic.message, diagnostic.code, location),
        None => format!("{} ({})", diagnostic.message, diagnostic.code),
    }
}
