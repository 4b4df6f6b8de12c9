//! End-to-end C# output for the blog fixture.

use gqlc_codegen::{
    GenerationError, GeneratorConfiguration, UNMAPPABLE_SCALAR,
    config::{Accessibility, CSharpVersion, OutputMode},
    testing::{blog_schema, object_schema},
};
use gqlc_codegen_csharp::Generator;

fn render(config: &GeneratorConfiguration) -> String {
    let schema = blog_schema();
    let generation = Generator::new(&schema, config)
        .preview()
        .expect("blog schema generates");
    assert_eq!(generation.units.len(), 1);
    generation.units[0].content.clone()
}

fn default_output() -> String {
    render(&GeneratorConfiguration::default())
}

#[test]
fn test_file_layout() {
    let code = default_output();
    assert!(code.starts_with("// <auto-generated>\n"));
    assert!(code.contains("using System;\nusing System.Collections;\n"));
    assert!(code.contains("using Newtonsoft.Json;\n"));
    assert!(code.contains("namespace GraphQlApi\n{\n"));
    assert!(!code.contains("#nullable enable\n\n"));

    let base = code.find("abstract class GraphQlQueryBuilder").unwrap();
    let operations = code.find("public static class GraphQlOperations").unwrap();
    let user = code.find("public class User : INode, ISearchResult").unwrap();
    assert!(base < operations && operations < user);
}

#[test]
fn test_object_types() {
    let code = default_output();
    assert!(code.contains("    [GraphQlObjectType(\"User\")]\n    public class User : INode, ISearchResult\n"));
    assert!(code.contains("        [JsonProperty(\"__typename\")]\n        public string TypeName { get; set; }\n"));
    assert!(code.contains("        [JsonProperty(\"id\")]\n        public Guid Id { get; set; }\n"));
    assert!(code.contains("        public decimal? Score { get; set; }\n"));
    assert!(code.contains("        public ICollection<Post> Posts { get; set; }\n"));
    assert!(code.contains("        public ICollection<string> Tags { get; set; }\n"));
    assert!(code.contains("        public Role Role { get; set; }\n"));
    assert!(code.contains("        [Obsolete(\"Use contact instead\")]\n        public string Email { get; set; }\n"));
}

#[test]
fn test_interfaces_and_unions() {
    let code = default_output();
    assert!(code.contains("[JsonConverter(typeof(GraphQlInterfaceJsonConverter))]\n"));
    assert!(code.contains("[GraphQlPossibleTypes(typeof(User), typeof(Post))]\n"));
    assert!(code.contains("    public interface INode\n"));
    assert!(code.contains("        Guid Id { get; }\n"));
    assert!(code.contains("    public interface ISearchResult\n"));
    assert!(code.contains("public ICollection<ISearchResult> Search { get; set; }"));
}

#[test]
fn test_interface_converter_populates_variants() {
    let code = default_output();
    assert!(code.contains("var instance = global::System.Activator.CreateInstance(targetType);\n"));
    assert!(code.contains("serializer.Populate(token.CreateReader(), instance);\n"));
    assert!(!code.contains("ToObject("));
}

#[test]
fn test_schema_types_named_like_system_types() {
    let schema = object_schema(&[
        ("Query", &[("type", "Type"), ("attribute", "Attribute")]),
        ("Type", &[("name", "String"), ("kind", "String")]),
        ("Attribute", &[("key", "String"), ("value", "String")]),
    ]);
    let config = GeneratorConfiguration::default();
    let generation = Generator::new(&schema, &config).preview().unwrap();
    let code = &generation.units[0].content;
    assert!(code.contains("    public class Type\n"));
    assert!(code.contains("    public class Attribute\n"));
    assert!(code.contains("sealed class GraphQlObjectTypeAttribute : global::System.Attribute\n"));
    assert!(code.contains("public GraphQlPossibleTypesAttribute(params global::System.Type[] types)"));
}

#[test]
fn test_schema_type_shadowing_framework_type_is_rejected() {
    let schema = object_schema(&[("Query", &[("guid", "Guid")]), ("Guid", &[("value", "String")])]);
    let config = GeneratorConfiguration::default();
    let err = Generator::new(&schema, &config).preview().unwrap_err();
    assert!(
        matches!(err, GenerationError::DuplicateDeclaration { ref name, .. } if name == "Guid"),
        "{err}"
    );
}

#[test]
fn test_keyword_class_mapping_is_rejected() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::builder()
        .class_mapping("Post", "class")
        .build()
        .unwrap();
    let err = Generator::new(&schema, &config).preview().unwrap_err();
    assert_eq!(
        err.to_string(),
        "class mapping sends 'Post' to 'class', a reserved csharp keyword"
    );
}

#[test]
fn test_enum_values() {
    let code = default_output();
    assert!(code.contains("    [JsonConverter(typeof(StringEnumConverter))]\n    public enum Role\n"));
    assert!(code.contains("        [EnumMember(Value = \"REGULAR_USER\")]\n        RegularUser,\n"));
    assert!(code.contains("        [Obsolete(\"Guests are gone\")]\n        Guest,\n"));
    assert!(code.contains("using System.Runtime.Serialization;\n"));
    assert!(code.contains("using Newtonsoft.Json.Converters;\n"));
}

#[test]
fn test_query_builders_and_operations() {
    let code = default_output();
    assert!(code.contains("public class UserQueryBuilder : GraphQlQueryBuilder<UserQueryBuilder>"));
    assert!(code.contains("public class NodeQueryBuilder : GraphQlQueryBuilder<NodeQueryBuilder>"));
    assert!(code.contains("public NodeQueryBuilder OnUser(UserQueryBuilder builder)"));
    assert!(code.contains("public class QuerySearchArgs"));
    assert!(code.contains("WithSearch(SearchResultQueryBuilder builder, QuerySearchArgs args)"));
    assert!(code.contains(
        "public static string Query(QueryQueryBuilder builder, string operationName = null)"
    ));
    assert!(code.contains(
        "public static string Mutation(MutationQueryBuilder builder, string operationName = null)"
    ));
}

#[test]
fn test_nullable_reference_types() {
    let config = GeneratorConfiguration::builder()
        .csharp_version(CSharpVersion::NewestWithNullableReferences)
        .build()
        .unwrap();
    let code = render(&config);
    assert!(code.contains("#nullable enable\n"));
    assert!(code.contains("public ICollection<string?>? Tags { get; set; }"));
    assert!(code.contains("public string? Email { get; set; }"));
    assert!(code.contains("public string Name { get; set; }"));
    assert!(code.contains("#nullable disable\n"));
    assert!(code.contains("#nullable restore\n"));
}

#[test]
fn test_accessibility_and_partial() {
    let config = GeneratorConfiguration::builder()
        .accessibility(Accessibility::Internal)
        .partial_classes(true)
        .namespace("Acme.Blog")
        .build()
        .unwrap();
    let code = render(&config);
    assert!(code.contains("namespace Acme.Blog\n"));
    assert!(code.contains("internal partial class User : INode, ISearchResult"));
    assert!(code.contains("internal enum Role"));
    assert!(code.contains("internal static class GraphQlOperations"));
    assert!(!code.contains("public partial class User"));
}

#[test]
fn test_unmapped_scalar_falls_back_to_object() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::default();
    let generation = Generator::new(&schema, &config).preview().unwrap();
    assert!(generation.units[0].content.contains("public object CreatedAt { get; set; }"));
    assert_eq!(generation.warning_count(), 1);
    assert_eq!(generation.diagnostics[0].code, UNMAPPABLE_SCALAR);

    let config = GeneratorConfiguration::builder()
        .scalar_mapping("DateTime", "DateTimeOffset")
        .build()
        .unwrap();
    let generation = Generator::new(&schema, &config).preview().unwrap();
    assert!(generation.units[0].content.contains("public DateTimeOffset? CreatedAt { get; set; }"));
    assert_eq!(generation.warning_count(), 0);
}

#[test]
fn test_multiple_units() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::builder()
        .output_mode(OutputMode::Multiple)
        .build()
        .unwrap();
    let generation = Generator::new(&schema, &config).preview().unwrap();

    let names: Vec<&str> = generation.units.iter().map(|u| u.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Query.cs",
            "Mutation.cs",
            "INode.cs",
            "User.cs",
            "Post.cs",
            "ISearchResult.cs",
            "Role.cs",
            "CreateUserInput.cs",
            "BaseClasses.cs",
        ]
    );

    let role = generation.unit("Role").unwrap();
    assert!(role.content.contains("public enum Role"));
    assert!(!role.content.contains("GraphQlQueryBuilder"));

    let shared = generation.unit("BaseClasses").unwrap();
    assert!(shared.content.contains("abstract class GraphQlQueryBuilder"));
    assert!(shared.content.contains("static class GraphQlOperations"));
}

#[test]
fn test_output_is_deterministic() {
    let config = GeneratorConfiguration::builder()
        .output_mode(OutputMode::Multiple)
        .build()
        .unwrap();
    let schema = blog_schema();
    let first = Generator::new(&schema, &config).preview().unwrap();
    let second = Generator::new(&schema, &config).preview().unwrap();
    assert_eq!(first.units, second.units);
}

#[test]
fn test_generate_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema = blog_schema();
    let config = GeneratorConfiguration::default();

    let target = dir.path().join("Client.cs");
    let result = Generator::new(&schema, &config).generate(&target).unwrap();
    assert_eq!(result.written.len(), 1);
    assert_eq!(result.written[0].path, target);
    assert_eq!(result.diagnostics.len(), 1);

    let content = std::fs::read_to_string(&target).unwrap();
    assert_eq!(content.len(), result.written[0].bytes);
    assert!(content.contains("public class User"));

    let out = dir.path().join("generated");
    let result = Generator::new(&schema, &config).generate(&out).unwrap();
    assert_eq!(result.written[0].path, out.join("GraphQlClient.cs"));
}

#[test]
fn test_generate_multiple_files() {
    let dir = tempfile::tempdir().unwrap();
    let schema = blog_schema();
    let config = GeneratorConfiguration::builder()
        .output_mode(OutputMode::Multiple)
        .build()
        .unwrap();

    let result = Generator::new(&schema, &config).generate(dir.path()).unwrap();
    assert_eq!(result.written.len(), 9);
    for written in &result.written {
        assert!(written.path.exists(), "{} missing", written.path.display());
    }
    insta::assert_snapshot!(
        result
            .written
            .iter()
            .filter_map(|w| w.path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join("\n"),
        @r"
    Query.cs
    Mutation.cs
    INode.cs
    User.cs
    Post.cs
    ISearchResult.cs
    Role.cs
    CreateUserInput.cs
    BaseClasses.cs
    "
    );
}
