//! C# implementation of StructureRenderer.
//!
//! Renders the language-agnostic declaration specs to C# classes,
//! interfaces and enums annotated for Newtonsoft.Json.

use gqlc_codegen::{
    builder::{
        ALL_SCALAR_FIELDS_METHOD, Accessibility, Annotation, ClassSpec, CodeFragment, EnumSpec,
        OperationsSpec, PropertySpec, QueryBuilderSpec, SelectionKind, SelectionSpec,
        StructureRenderer, TypeMapper,
    },
    config::CSharpVersion,
};

use crate::{infrastructure::QUERY_BUILDER_BASE, type_mapper::CSharpTypeMapper};

/// Quote and escape a string as a C# regular string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// C# implementation of StructureRenderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpStructureRenderer {
    type_mapper: CSharpTypeMapper,
    expression_bodied: bool,
    nullable_references: bool,
}

impl CSharpStructureRenderer {
    pub fn new(version: CSharpVersion) -> Self {
        Self {
            type_mapper: CSharpTypeMapper::new(version.nullable_references()),
            expression_bodied: version.expression_bodied(),
            nullable_references: version.nullable_references(),
        }
    }

    pub fn type_mapper(&self) -> &CSharpTypeMapper {
        &self.type_mapper
    }

    fn doc(&self, doc: &Option<String>) -> Option<CodeFragment> {
        doc.as_deref()
            .filter(|d| !d.trim().is_empty())
            .map(CodeFragment::xml_doc)
    }

    fn annotations(&self, annotations: &[Annotation]) -> Vec<CodeFragment> {
        annotations
            .iter()
            .flat_map(|a| self.render_annotation(a))
            .map(CodeFragment::Line)
            .collect()
    }

    fn modifiers(&self, accessibility: Accessibility, partial: bool) -> String {
        let mut modifiers = self.render_accessibility(accessibility).to_string();
        if partial {
            modifiers.push_str(" partial");
        }
        modifiers
    }

    fn property(&self, spec: &PropertySpec, in_interface: bool) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self.doc(&spec.doc).into_iter().collect();
        fragments.extend(self.annotations(&spec.annotations));
        let ty = self.type_mapper.render_type(&spec.ty);
        fragments.push(if in_interface {
            CodeFragment::line(format!("{} {} {{ get; }}", ty, spec.name))
        } else {
            CodeFragment::line(format!("public {} {} {{ get; set; }}", ty, spec.name))
        });
        fragments
    }

    /// A method with a single-expression body in the configured dialect.
    fn method(&self, signature: String, expression: String) -> Vec<CodeFragment> {
        if self.expression_bodied {
            vec![CodeFragment::line(format!("{} => {};", signature, expression))]
        } else {
            vec![CodeFragment::braced(
                signature,
                vec![CodeFragment::line(format!("return {};", expression))],
            )]
        }
    }

    /// Type of an optional reference-type parameter.
    fn optional_parameter(&self, ty: &str) -> String {
        if self.nullable_references {
            format!("{}?", ty)
        } else {
            ty.to_string()
        }
    }

    fn selection(&self, builder: &str, selection: &SelectionSpec) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self.doc(&selection.doc).into_iter().collect();
        if let Some(reason) = &selection.deprecation {
            fragments.extend(
                self.render_annotation(&Annotation::Deprecated(reason.clone()))
                    .into_iter()
                    .map(CodeFragment::Line),
            );
        }

        let field = string_literal(&selection.field_name);
        let mut parameters = Vec::new();
        let arguments = match &selection.arguments {
            Some(args) if args.required => {
                parameters.push(format!("{} args", args.holder));
                "args"
            }
            Some(args) => {
                parameters.push(format!("{} args = null", self.optional_parameter(&args.holder)));
                "args"
            }
            None => "null",
        };

        let (parameters, expression) = match &selection.kind {
            SelectionKind::Scalar => (
                parameters,
                format!("WithScalarField({}, {})", field, arguments),
            ),
            SelectionKind::Composite { builder: nested } => {
                parameters.insert(0, format!("{} builder", nested));
                (
                    parameters,
                    format!("WithObjectField({}, builder, {})", field, arguments),
                )
            }
            SelectionKind::Fragment { builder: nested } => {
                (vec![format!("{} builder", nested)], "WithFragment(builder)".to_string())
            }
        };

        let signature = format!(
            "public {} {}({})",
            builder,
            selection.method_name,
            parameters.join(", ")
        );
        fragments.extend(self.method(signature, expression));
        fragments
    }

    /// `WithAllScalarFields` selects every scalar field that needs no
    /// arguments and is not deprecated.
    fn all_scalar_fields(&self, spec: &QueryBuilderSpec) -> Vec<CodeFragment> {
        let mut body: Vec<CodeFragment> = spec
            .selections
            .iter()
            .filter(|s| s.is_scalar() && s.deprecation.is_none())
            .filter(|s| s.arguments.as_ref().is_none_or(|a| !a.required))
            .map(|s| {
                CodeFragment::line(format!(
                    "WithScalarField({}, null);",
                    string_literal(&s.field_name)
                ))
            })
            .collect();
        body.push(CodeFragment::line("return this;"));
        vec![CodeFragment::braced(
            format!("public {} {}()", spec.name, ALL_SCALAR_FIELDS_METHOD),
            body,
        )]
    }
}

impl StructureRenderer for CSharpStructureRenderer {
    fn render_class(&self, spec: &ClassSpec) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self.doc(&spec.doc).into_iter().collect();
        fragments.extend(self.annotations(&spec.annotations));

        let keyword = if spec.is_interface() { "interface" } else { "class" };
        let mut header = format!(
            "{} {} {}",
            self.modifiers(spec.accessibility, spec.partial),
            keyword,
            spec.name
        );
        if !spec.implements.is_empty() {
            header.push_str(" : ");
            header.push_str(&spec.implements.join(", "));
        }

        let body = spec
            .properties
            .iter()
            .flat_map(|p| self.property(p, spec.is_interface()))
            .collect();
        fragments.push(CodeFragment::braced(header, body));
        fragments
    }

    fn render_enum(&self, spec: &EnumSpec) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self.doc(&spec.doc).into_iter().collect();
        fragments.extend(self.annotations(&spec.annotations));

        let mut body = Vec::new();
        for member in &spec.members {
            body.extend(self.doc(&member.doc));
            for annotation in &member.annotations {
                let lines = match annotation {
                    Annotation::SerializedName(name) => {
                        vec![format!("[EnumMember(Value = {})]", string_literal(name))]
                    }
                    other => self.render_annotation(other),
                };
                body.extend(lines.into_iter().map(CodeFragment::Line));
            }
            body.push(CodeFragment::line(format!("{},", member.name)));
        }

        fragments.push(CodeFragment::braced(
            format!("{} enum {}", self.render_accessibility(spec.accessibility), spec.name),
            body,
        ));
        fragments
    }

    fn render_query_builder(&self, spec: &QueryBuilderSpec) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> = self.doc(&spec.doc).into_iter().collect();

        let header = format!(
            "{} class {} : {}<{}>",
            self.modifiers(spec.accessibility, spec.partial),
            spec.name,
            QUERY_BUILDER_BASE,
            spec.name
        );

        let constructor = format!(
            "public {}() : base({})",
            spec.name,
            string_literal(&spec.type_name)
        );
        let mut body = if spec.include_typename {
            vec![CodeFragment::braced(
                constructor,
                vec![CodeFragment::line("IncludeTypeName();")],
            )]
        } else {
            vec![CodeFragment::line(format!("{} {{ }}", constructor))]
        };

        body.push(CodeFragment::blank());
        body.extend(self.all_scalar_fields(spec));
        for selection in &spec.selections {
            body.push(CodeFragment::blank());
            body.extend(self.selection(&spec.name, selection));
        }

        fragments.push(CodeFragment::braced(header, body));
        fragments
    }

    fn render_operations(&self, spec: &OperationsSpec) -> Vec<CodeFragment> {
        let operation_name = self.optional_parameter("string");
        let mut body = Vec::new();
        for (i, root) in spec.roots.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            let keyword = root.kind.keyword();
            let method = format!(
                "public static string {}{}({} builder, {} operationName = null)",
                keyword[..1].to_ascii_uppercase(),
                &keyword[1..],
                root.builder,
                operation_name
            );
            body.extend(self.method(
                method,
                format!("builder.Build({}, operationName)", string_literal(keyword)),
            ));
        }

        vec![CodeFragment::braced(
            format!(
                "{} static class {}",
                self.render_accessibility(spec.accessibility),
                spec.name
            ),
            body,
        )]
    }

    fn render_annotation(&self, annotation: &Annotation) -> Vec<String> {
        match annotation {
            Annotation::SerializedName(name) => {
                vec![format!("[JsonProperty({})]", string_literal(name))]
            }
            Annotation::Deprecated(Some(reason)) => {
                vec![format!("[Obsolete({})]", string_literal(reason))]
            }
            Annotation::Deprecated(None) => vec!["[Obsolete]".to_string()],
            Annotation::Discriminator(name) => {
                vec![format!("[GraphQlObjectType({})]", string_literal(name))]
            }
            Annotation::Polymorphic { possible_types } => {
                let mut lines =
                    vec!["[JsonConverter(typeof(GraphQlInterfaceJsonConverter))]".to_string()];
                if !possible_types.is_empty() {
                    let types: Vec<String> = possible_types
                        .iter()
                        .map(|t| format!("typeof({})", t))
                        .collect();
                    lines.push(format!("[GraphQlPossibleTypes({})]", types.join(", ")));
                }
                lines
            }
            Annotation::StringEnum => {
                vec!["[JsonConverter(typeof(StringEnumConverter))]".to_string()]
            }
        }
    }

    fn render_accessibility(&self, accessibility: Accessibility) -> &'static str {
        accessibility.as_str()
    }
}

#[cfg(test)]
mod tests {
    use gqlc_codegen::builder::{
        ArgumentsSpec, CodeBuilder, Declaration, EnumMemberSpec, Indent, OperationRoot, TypeRef,
    };
    use gqlc_schema::OperationKind;

    use super::*;

    fn render(renderer: &CSharpStructureRenderer, declaration: &Declaration) -> String {
        let mut builder = CodeBuilder::new(Indent::CSHARP);
        for fragment in renderer.render_declaration(declaration) {
            builder.apply_fragment(fragment);
        }
        builder.build()
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(string_literal("C:\\temp"), "\"C:\\\\temp\"");
    }

    #[test]
    fn test_render_class() {
        let spec = ClassSpec::new("User")
            .doc(Some("A registered user"))
            .implements(["INode"])
            .annotation(Annotation::Discriminator("User".into()))
            .property(
                PropertySpec::new("TypeName", TypeRef::string())
                    .annotation(Annotation::SerializedName("__typename".into())),
            )
            .property(
                PropertySpec::new("Email", TypeRef::optional(TypeRef::string()))
                    .annotation(Annotation::SerializedName("email".into()))
                    .annotation(Annotation::Deprecated(Some("Use \"contact\"".into()))),
            )
            .partial(true);

        let code = render(&CSharpStructureRenderer::default(), &Declaration::Class(spec));
        assert_eq!(
            code,
            r#"/// <summary>
/// A registered user
/// </summary>
[GraphQlObjectType("User")]
public partial class User : INode
{
    [JsonProperty("__typename")]
    public string TypeName { get; set; }
    [JsonProperty("email")]
    [Obsolete("Use \"contact\"")]
    public string Email { get; set; }
}
"#
        );
    }

    #[test]
    fn test_render_interface() {
        let spec = ClassSpec::interface("INode")
            .annotation(Annotation::Polymorphic {
                possible_types: vec!["User".into(), "Post".into()],
            })
            .property(PropertySpec::new("Id", TypeRef::string()))
            .accessibility(Accessibility::Internal);

        let code = render(&CSharpStructureRenderer::default(), &Declaration::Class(spec));
        assert!(code.contains("[JsonConverter(typeof(GraphQlInterfaceJsonConverter))]\n"));
        assert!(code.contains("[GraphQlPossibleTypes(typeof(User), typeof(Post))]\n"));
        assert!(code.contains("internal interface INode\n"));
        assert!(code.contains("    string Id { get; }\n"));
    }

    #[test]
    fn test_render_enum() {
        let spec = EnumSpec::new("Role")
            .annotation(Annotation::StringEnum)
            .member(
                EnumMemberSpec::new("RegularUser")
                    .annotation(Annotation::SerializedName("REGULAR_USER".into())),
            )
            .member(EnumMemberSpec::new("Guest").annotation(Annotation::Deprecated(None)));

        let code = render(&CSharpStructureRenderer::default(), &Declaration::Enum(spec));
        assert_eq!(
            code,
            r#"[JsonConverter(typeof(StringEnumConverter))]
public enum Role
{
    [EnumMember(Value = "REGULAR_USER")]
    RegularUser,
    [Obsolete]
    Guest,
}
"#
        );
    }

    fn user_builder() -> QueryBuilderSpec {
        let mut posts = SelectionSpec::new(
            "posts",
            "WithPosts",
            SelectionKind::Composite {
                builder: "PostQueryBuilder".into(),
            },
        );
        posts.arguments = Some(ArgumentsSpec {
            holder: "UserPostsArgs".into(),
            arguments: vec![("first".into(), "First".into())],
            required: false,
        });
        let mut email = SelectionSpec::new("email", "WithEmail", SelectionKind::Scalar);
        email.deprecation = Some(None);

        QueryBuilderSpec::new("UserQueryBuilder", "User")
            .selection(SelectionSpec::new("name", "WithName", SelectionKind::Scalar))
            .selection(email)
            .selection(posts)
    }

    #[test]
    fn test_render_query_builder_compatible() {
        let code = render(
            &CSharpStructureRenderer::new(CSharpVersion::Compatible),
            &Declaration::QueryBuilder(user_builder()),
        );

        assert!(code.contains(
            "public class UserQueryBuilder : GraphQlQueryBuilder<UserQueryBuilder>\n"
        ));
        assert!(code.contains("    public UserQueryBuilder() : base(\"User\") { }\n"));
        assert!(code.contains(
            "    public UserQueryBuilder WithName()\n    {\n        return WithScalarField(\"name\", null);\n    }\n"
        ));
        assert!(code.contains(
            "    public UserQueryBuilder WithPosts(PostQueryBuilder builder, UserPostsArgs args = null)\n"
        ));
        assert!(code.contains("        return WithObjectField(\"posts\", builder, args);\n"));
        assert!(code.contains("    [Obsolete]\n    public UserQueryBuilder WithEmail()"));
        // Deprecated fields are left out of the all-scalars shortcut.
        assert!(code.contains(
            "    public UserQueryBuilder WithAllScalarFields()\n    {\n        WithScalarField(\"name\", null);\n        return this;\n    }\n"
        ));
    }

    #[test]
    fn test_render_query_builder_newest() {
        let code = render(
            &CSharpStructureRenderer::new(CSharpVersion::NewestWithNullableReferences),
            &Declaration::QueryBuilder(user_builder()),
        );

        assert!(code.contains(
            "    public UserQueryBuilder WithName() => WithScalarField(\"name\", null);\n"
        ));
        assert!(code.contains("WithPosts(PostQueryBuilder builder, UserPostsArgs? args = null) =>"));
    }

    #[test]
    fn test_render_abstract_query_builder() {
        let mut spec = QueryBuilderSpec::new("NodeQueryBuilder", "Node").selection(
            SelectionSpec::new(
                "User",
                "OnUser",
                SelectionKind::Fragment {
                    builder: "UserQueryBuilder".into(),
                },
            ),
        );
        spec.include_typename = true;

        let code = render(
            &CSharpStructureRenderer::new(CSharpVersion::Newest),
            &Declaration::QueryBuilder(spec),
        );
        assert!(code.contains(
            "    public NodeQueryBuilder() : base(\"Node\")\n    {\n        IncludeTypeName();\n    }\n"
        ));
        assert!(code.contains(
            "    public NodeQueryBuilder OnUser(UserQueryBuilder builder) => WithFragment(builder);\n"
        ));
    }

    #[test]
    fn test_render_operations() {
        let spec = OperationsSpec {
            name: "GraphQlOperations".into(),
            roots: vec![
                OperationRoot {
                    kind: OperationKind::Query,
                    builder: "QueryQueryBuilder".into(),
                },
                OperationRoot {
                    kind: OperationKind::Mutation,
                    builder: "MutationQueryBuilder".into(),
                },
            ],
            accessibility: Accessibility::Public,
        };

        let code = render(
            &CSharpStructureRenderer::new(CSharpVersion::Compatible),
            &Declaration::Operations(spec),
        );
        assert!(code.starts_with("public static class GraphQlOperations\n{\n"));
        assert!(code.contains(
            "    public static string Query(QueryQueryBuilder builder, string operationName = null)\n"
        ));
        assert!(code.contains("        return builder.Build(\"mutation\", operationName);\n"));
    }
}
