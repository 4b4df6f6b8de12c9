//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Builds indented code from lines and fragments
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`Indent`] - Indentation configuration
//!
//! # Declarative Specifications
//!
//! - [`ClassSpec`], [`EnumSpec`], [`QueryBuilderSpec`], [`OperationsSpec`] - Declarations
//! - [`Annotation`] - Serialization and semantic markers
//! - [`TypeRef`] - Language-agnostic type references
//! - [`TypeMapper`], [`StructureRenderer`] - Language-specific rendering

mod code_builder;
mod indent;
mod renderable;
mod structure;
mod types;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
pub use structure::{
    ALL_SCALAR_FIELDS_METHOD, Annotation, ArgumentsSpec, ClassKind, ClassSpec, Declaration, EnumMemberSpec, EnumSpec,
    OperationRoot, OperationsSpec, PropertySpec, QueryBuilderSpec, SelectionKind, SelectionSpec,
    StructureRenderer,
};
pub use types::{Accessibility, PrimitiveType, TypeMapper, TypeRef};
