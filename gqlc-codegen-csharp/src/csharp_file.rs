//! CSharpFile abstraction for structured C# file generation.
//!
//! Provides a high-level API for generating C# files with a generated-code
//! banner, organized using directives and a block-scoped namespace.

use gqlc_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A C# using directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Using(String);

impl Using {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }

    pub fn namespace(&self) -> &str {
        &self.0
    }

    /// `System` namespaces sort before everything else.
    fn sort_key(&self) -> (bool, &str) {
        let system = self.0 == "System" || self.0.starts_with("System.");
        (!system, &self.0)
    }
}

impl Renderable for Using {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(format!("using {};", self.0))]
    }
}

/// A structured representation of a C# file.
///
/// # Example
///
/// ```ignore
/// let file = CSharpFile::new("Acme.Client")
///     .using(Using::new("System"))
///     .add(fragments)
///     .render();
/// ```
#[derive(Debug, Default)]
pub struct CSharpFile {
    header: Vec<String>,
    nullable: bool,
    usings: Vec<Using>,
    namespace: String,
    body: Vec<Vec<CodeFragment>>,
}

impl CSharpFile {
    /// Create a new empty file in the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Add the `<auto-generated>` banner with the given message.
    pub fn auto_generated(mut self, message: &str) -> Self {
        self.header = vec![
            "<auto-generated>".to_string(),
            format!("    {}", message),
            "</auto-generated>".to_string(),
        ];
        self
    }

    /// Enable nullable reference annotations for the whole file.
    pub fn nullable(mut self, enabled: bool) -> Self {
        self.nullable = enabled;
        self
    }

    /// Add a using directive; duplicates are ignored.
    pub fn using(mut self, using: Using) -> Self {
        if !self.usings.contains(&using) {
            self.usings.push(using);
        }
        self
    }

    /// Add multiple using directives.
    pub fn usings(self, usings: impl IntoIterator<Item = Using>) -> Self {
        usings.into_iter().fold(self, |file, using| file.using(using))
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Render the file with C# indentation (4 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::CSHARP)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        // 1. Banner
        for line in &self.header {
            builder.push_comment(line);
        }
        if !self.header.is_empty() {
            builder.push_blank();
        }

        // 2. Nullable context
        if self.nullable {
            builder.push_line("#nullable enable");
            builder.push_blank();
        }

        // 3. Using directives, System first
        let mut usings: Vec<&Using> = self.usings.iter().collect();
        usings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        for using in &usings {
            builder.emit(*using);
        }
        if !usings.is_empty() {
            builder.push_blank();
        }

        // 4. Namespace with declarations separated by blank lines
        let mut body = Vec::new();
        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(fragments.iter().cloned());
        }
        builder.apply_fragment(CodeFragment::braced(
            format!("namespace {}", self.namespace),
            body,
        ));

        builder.build()
    }

    /// Check if the file has no declarations.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
