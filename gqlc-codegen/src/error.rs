//! Fatal generation errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("type #{id} referenced at '{location}' does not belong to the schema")]
    UnknownType { id: usize, location: String },

    #[error("'{name}' is declared more than once (by {first} and {second})")]
    DuplicateDeclaration {
        name: String,
        first: String,
        second: String,
    },

    #[error("declarations reference each other in a cycle: {}", cycle.join(" -> "))]
    CyclicDeclarations { cycle: Vec<String> },

    #[error("class mapping sends '{schema_name}' to '{target}', a reserved {language} keyword")]
    ReservedClassName {
        schema_name: String,
        target: String,
        language: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_display() {
        let err = GenerationError::CyclicDeclarations {
            cycle: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(
            err.to_string(),
            "declarations reference each other in a cycle: A -> B -> A"
        );
    }

    #[test]
    fn test_reserved_class_name_display() {
        let err = GenerationError::ReservedClassName {
            schema_name: "Lesson".into(),
            target: "class".into(),
            language: "csharp",
        };
        assert_eq!(
            err.to_string(),
            "class mapping sends 'Lesson' to 'class', a reserved csharp keyword"
        );
    }
}
