//! C# (Newtonsoft.Json) client generator for gqlc.
//!
//! Implements [`LanguageTarget`] for C#: strongly-typed model classes,
//! interfaces for GraphQL interfaces and unions resolved through
//! `__typename`, string enums, fluent query builders and the shared
//! runtime support they rely on.

mod csharp_file;
mod generator;
mod infrastructure;
mod naming;
mod structure_renderer;
mod target;
mod type_mapper;

pub use csharp_file::{CSharpFile, Using};
pub use generator::{GenerateResult, Generator};
pub use gqlc_codegen::{Generation, LanguageTarget};
pub use infrastructure::{INFRASTRUCTURE_TYPES, QUERY_BUILDER_BASE};
pub use naming::CSHARP_NAMING;
pub use structure_renderer::{CSharpStructureRenderer, string_literal};
pub use target::CSharpTarget;
pub use type_mapper::CSharpTypeMapper;
