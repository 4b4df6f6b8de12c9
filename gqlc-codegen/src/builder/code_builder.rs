//! Code builder utility for generating properly indented code.

use super::{CodeFragment, Indent, Renderable};

/// Builds code with proper indentation.
///
/// Renderers hand it [`CodeFragment`]s; files push their framing lines
/// (banner, directives) directly.
///
/// # Example
///
/// ```
/// use gqlc_codegen::builder::{CodeBuilder, Indent};
///
/// let mut builder = CodeBuilder::new(Indent::CSHARP);
/// builder
///     .push_line("namespace Api")
///     .push_line("{")
///     .push_indent()
///     .push_line("class Foo { }")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "namespace Api\n{\n    class Foo { }\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (no indentation).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a line comment.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.push_line("//")
        } else {
            self.push_line(&format!("// {}", text))
        }
    }

    /// Add an XML `<summary>` doc comment.
    ///
    /// Every line of `text` becomes one `///` line; markup characters are escaped.
    pub fn push_xml_doc(&mut self, text: &str) -> &mut Self {
        self.push_line("/// <summary>");
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.push_line("///");
            } else {
                self.push_line(&format!("/// {}", escape_xml(line)));
            }
        }
        self.push_line("/// </summary>")
    }

    /// Emit a Renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
            CodeFragment::XmlDoc(text) => {
                self.push_xml_doc(&text);
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
