//! Core utilities and types for the gqlc GraphQL client generator.
//!
//! This crate provides fundamental helpers used across the gqlc
//! workspace: identifier casing, identifier validation and writing
//! generated files to disk.

mod file;
mod utils;

// File operations
pub use file::{File, WriteResult, write_all};
// String utilities
pub use utils::{
    is_identifier, sanitize_identifier, split_words, to_camel_case, to_pascal_case,
    validate_identifier,
};

/// Banner placed at the top of every generated unit.
pub const GENERATED_HEADER: &str =
    "This file was generated by gqlc. Do not edit it by hand, regenerate it instead.";
