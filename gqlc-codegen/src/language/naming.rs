//! Naming conventions for different target languages.

/// Language-specific naming conventions.
///
/// Defines how schema names become identifiers and how reserved words are handled.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a schema type name to a type name (e.g., "search_result" -> "SearchResult")
    pub type_case: fn(&str) -> String,
    /// Transform a schema field name to a member name (e.g., "createdAt" -> "CreatedAt")
    pub member_case: fn(&str) -> String,
    /// Transform an argument name to a parameter name (e.g., "first_name" -> "firstName")
    pub parameter_case: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "class" -> "@class" in C#)
    pub escape_reserved: fn(&str) -> String,
    /// Prefix given to abstract base types (e.g., "I" in C#)
    pub interface_prefix: &'static str,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.type_case)(name))
    }

    /// Transform and make safe for use as a member name.
    pub fn member_name(&self, name: &str) -> String {
        self.safe_name(&(self.member_case)(name))
    }

    /// Transform and make safe for use as a parameter name.
    pub fn parameter_name(&self, name: &str) -> String {
        self.safe_name(&(self.parameter_case)(name))
    }
}
