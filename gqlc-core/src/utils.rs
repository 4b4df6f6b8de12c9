//! Shared string utilities for code generation.

/// Split a schema name into words on any non-alphanumeric separator.
///
/// Casing inside a word is left untouched, so `userName` stays one word.
pub fn split_words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Convert a string to PascalCase (e.g., "user_name" -> "UserName", "userId" -> "UserId")
///
/// Words written entirely in upper case are normalized, so `URL_PATH`
/// becomes `UrlPath` and `ID` becomes `Id`.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).into_iter().map(capitalize_word).collect()
}

/// Convert a string to camelCase (e.g., "user_name" -> "userName")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

fn capitalize_word(word: &str) -> String {
    let all_upper = word.chars().any(|c| c.is_ascii_alphabetic())
        && !word.chars().any(|c| c.is_ascii_lowercase());
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) if all_upper => std::iter::once(first.to_ascii_uppercase())
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect(),
        Some(first) => std::iter::once(first.to_ascii_uppercase())
            .chain(chars)
            .collect(),
    }
}

/// Check if a string is a plain ASCII identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(s: &str) -> bool {
    validate_identifier(s).is_none()
}

/// Validate that a name is a plain identifier.
///
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}

/// Turn an arbitrary string into a plain identifier.
///
/// Disallowed characters become `_` and a leading digit gets a `_` prefix.
/// The transform is deterministic and leaves valid identifiers unchanged.
pub fn sanitize_identifier(s: &str) -> String {
    let mut result: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    match result.chars().next() {
        None => result.push('_'),
        Some(c) if c.is_ascii_digit() => result.insert(0, '_'),
        Some(_) => {}
    }

    result
}
