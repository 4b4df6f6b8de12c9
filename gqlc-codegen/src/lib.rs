//! Language-agnostic GraphQL client generation engine for gqlc.
//!
//! The engine turns a resolved [`gqlc_schema::Schema`] plus an immutable
//! [`GeneratorConfiguration`] into rendered output units. Language crates
//! (e.g., `gqlc-codegen-csharp`) plug in through [`LanguageTarget`].
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, declaration specs, etc.)
//! - [`config`] - Validated generator configuration and raw options
//! - [`naming`] - Schema-to-target naming and scalar mapping policy
//! - [`emitter`] - Schema types to declarations
//! - [`layout`] - Single- and multi-unit layouts
//! - [`language`] - Language-specific abstractions (LanguageTarget, NamingConvention)
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod config;
mod context;
mod diagnostic;
pub mod emitter;
mod error;
pub mod language;
pub mod layout;
pub mod naming;
mod unit;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ConfigurationError, GeneratorConfiguration, GeneratorOptions};
pub use context::{Generation, GenerationContext, UNMAPPABLE_SCALAR};
pub use diagnostic::Diagnostic;
pub use error::{GenerationError, Result};
pub use language::{LanguageTarget, NamingConvention};
pub use unit::GeneratedUnit;
