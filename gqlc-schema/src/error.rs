use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("export the schema with an introspection query or pass --service-url"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse introspection JSON")]
    #[diagnostic(code(gqlc::schema::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid introspection payload at '{path}': {message}")]
    #[diagnostic(code(gqlc::schema::shape))]
    Shape { path: String, message: String },

    #[error("introspection payload is missing '{member}'")]
    #[diagnostic(
        code(gqlc::schema::missing_member),
        help("the document must contain __schema with queryType and types")
    )]
    MissingMember { member: &'static str },

    #[error("invalid type reference at '{location}': {reason}")]
    #[diagnostic(code(gqlc::schema::invalid_reference))]
    InvalidTypeReference {
        location: String,
        reason: &'static str,
    },

    #[error("type '{name}' is declared more than once")]
    #[diagnostic(code(gqlc::schema::duplicate_type))]
    DuplicateType { name: String },

    #[error("type '{name}' cannot be declared with kind {kind}")]
    #[diagnostic(code(gqlc::schema::unexpected_kind))]
    UnexpectedTypeKind { name: String, kind: String },

    #[error("unresolved type reference '{name}' at '{location}'")]
    #[diagnostic(
        code(gqlc::schema::unresolved_reference),
        help("every referenced type must appear in __schema.types")
    )]
    UnresolvedTypeReference { name: String, location: String },
}

impl Error {
    /// Create a syntax error from a serde_json error with source context
    pub fn syntax(source: serde_json::Error, src: &str, filename: &str) -> Box<Self> {
        let span = offset_of(src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Syntax {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a shape error from a path-aware deserialization error
    pub fn shape(err: serde_path_to_error::Error<serde_json::Error>) -> Box<Self> {
        Box::new(Error::Shape {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    /// Create an unresolved reference error
    pub fn unresolved(name: impl Into<String>, location: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnresolvedTypeReference {
            name: name.into(),
            location: location.into(),
        })
    }

    /// Create an invalid reference error
    pub fn invalid_reference(location: impl Into<String>, reason: &'static str) -> Box<Self> {
        Box::new(Error::InvalidTypeReference {
            location: location.into(),
            reason,
        })
    }

    /// Whether this error means the payload itself is malformed or incomplete.
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Error::UnresolvedTypeReference { .. })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    Some((line_start + column.saturating_sub(1)).min(src.len().saturating_sub(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of() {
        let src = "{\n  \"a\": x\n}";
        assert_eq!(offset_of(src, 1, 1), Some(0));
        assert_eq!(offset_of(src, 2, 8), Some(9));
        assert_eq!(offset_of(src, 0, 1), None);
    }

    #[test]
    fn test_syntax_error_has_span() {
        let src = "{ \"__schema\": ";
        let err = serde_json::from_str::<serde_json::Value>(src).unwrap_err();
        let err = Error::syntax(err, src, "schema.json");
        assert!(matches!(*err, Error::Syntax { span: Some(_), .. }));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_unresolved_is_not_parse_error() {
        let err = Error::unresolved("Missing", "Query.field");
        assert!(!err.is_parse_error());
        assert_eq!(
            err.to_string(),
            "unresolved type reference 'Missing' at 'Query.field'"
        );
    }
}
