//! Shared C# runtime support emitted once per output.
//!
//! Generated classes lean on a handful of helper types: attributes that
//! tie interfaces to their concrete variants, a JSON converter resolving
//! variants from `__typename`, the query builder base class and the
//! argument formatter used when building query text.

use gqlc_codegen::builder::{Accessibility, CodeFragment};

/// Generic base class every generated query builder derives from.
pub const QUERY_BUILDER_BASE: &str = "GraphQlQueryBuilder";

/// Type names declared by the shared support code.
pub const INFRASTRUCTURE_TYPES: &[&str] = &[
    "GraphQlObjectTypeAttribute",
    "GraphQlPossibleTypesAttribute",
    "GraphQlInterfaceJsonConverter",
    QUERY_BUILDER_BASE,
    "GraphQlArgumentFormatter",
];

/// Namespaces the support code needs beyond those of plain declarations.
pub const INFRASTRUCTURE_USINGS: &[&str] = &[
    "System.Collections",
    "System.Globalization",
    "System.Linq",
    "System.Reflection",
    "System.Runtime.Serialization",
    "Newtonsoft.Json.Linq",
];

const SOURCE: &str = r#"[global::System.AttributeUsage(global::System.AttributeTargets.Class, AllowMultiple = false)]
{access} sealed class GraphQlObjectTypeAttribute : global::System.Attribute
{
    public GraphQlObjectTypeAttribute(string typeName)
    {
        TypeName = typeName;
    }

    public string TypeName { get; private set; }
}

[global::System.AttributeUsage(global::System.AttributeTargets.Interface, AllowMultiple = false)]
{access} sealed class GraphQlPossibleTypesAttribute : global::System.Attribute
{
    public GraphQlPossibleTypesAttribute(params global::System.Type[] types)
    {
        Types = types;
    }

    public global::System.Type[] Types { get; private set; }
}

{access} class GraphQlInterfaceJsonConverter : global::Newtonsoft.Json.JsonConverter
{
    public override bool CanWrite
    {
        get { return false; }
    }

    public override bool CanConvert(global::System.Type objectType)
    {
        return objectType.GetTypeInfo().IsInterface;
    }

    public override object ReadJson(global::Newtonsoft.Json.JsonReader reader, global::System.Type objectType, object existingValue, global::Newtonsoft.Json.JsonSerializer serializer)
    {
        if (reader.TokenType == global::Newtonsoft.Json.JsonToken.Null)
        {
            return null;
        }

        var token = global::Newtonsoft.Json.Linq.JToken.ReadFrom(reader);
        var targetType = objectType.GetTypeInfo().IsInterface ? ResolveVariant(token, objectType) : objectType;
        var instance = global::System.Activator.CreateInstance(targetType);
        serializer.Populate(token.CreateReader(), instance);
        return instance;
    }

    private static global::System.Type ResolveVariant(global::Newtonsoft.Json.Linq.JToken token, global::System.Type interfaceType)
    {
        var typeName = token["__typename"] == null ? null : token["__typename"].Value<string>();
        var possibleTypes = interfaceType.GetTypeInfo().GetCustomAttribute<GraphQlPossibleTypesAttribute>();
        if (typeName == null || possibleTypes == null)
        {
            throw new global::Newtonsoft.Json.JsonSerializationException("cannot resolve " + interfaceType.Name + " without __typename");
        }

        var concreteType = possibleTypes.Types.FirstOrDefault(t =>
        {
            var attribute = t.GetTypeInfo().GetCustomAttribute<GraphQlObjectTypeAttribute>();
            return attribute != null && attribute.TypeName == typeName;
        });
        if (concreteType == null)
        {
            throw new global::Newtonsoft.Json.JsonSerializationException("unknown __typename '" + typeName + "' for " + interfaceType.Name);
        }

        return concreteType;
    }

    public override void WriteJson(global::Newtonsoft.Json.JsonWriter writer, object value, global::Newtonsoft.Json.JsonSerializer serializer)
    {
        throw new global::System.NotSupportedException();
    }
}

{access} abstract class GraphQlQueryBuilder
{
    private readonly global::System.Collections.Generic.List<string> _selections = new global::System.Collections.Generic.List<string>();

    protected GraphQlQueryBuilder(string typeName)
    {
        TypeName = typeName;
    }

    public string TypeName { get; private set; }

    protected void AddSelection(string selection)
    {
        if (!_selections.Contains(selection))
        {
            _selections.Add(selection);
        }
    }

    protected void IncludeTypeName()
    {
        AddSelection("__typename");
    }

    public string BuildSelectionSet()
    {
        return "{ " + string.Join(" ", _selections) + " }";
    }

    public string Build(string operationType, string operationName)
    {
        var header = string.IsNullOrEmpty(operationName) ? operationType : operationType + " " + operationName;
        return header + " " + BuildSelectionSet();
    }
}

{access} abstract class GraphQlQueryBuilder<TBuilder> : GraphQlQueryBuilder
    where TBuilder : GraphQlQueryBuilder<TBuilder>
{
    protected GraphQlQueryBuilder(string typeName) : base(typeName)
    {
    }

    protected TBuilder WithScalarField(string fieldName, object arguments)
    {
        AddSelection(fieldName + GraphQlArgumentFormatter.Format(arguments));
        return (TBuilder)this;
    }

    protected TBuilder WithObjectField(string fieldName, GraphQlQueryBuilder builder, object arguments)
    {
        AddSelection(fieldName + GraphQlArgumentFormatter.Format(arguments) + " " + builder.BuildSelectionSet());
        return (TBuilder)this;
    }

    protected TBuilder WithFragment(GraphQlQueryBuilder builder)
    {
        AddSelection("... on " + builder.TypeName + " " + builder.BuildSelectionSet());
        return (TBuilder)this;
    }
}

{access} static class GraphQlArgumentFormatter
{
    public static string Format(object arguments)
    {
        if (arguments == null)
        {
            return string.Empty;
        }

        var values = FormatProperties(arguments).ToList();
        return values.Count == 0 ? string.Empty : "(" + string.Join(", ", values) + ")";
    }

    public static string FormatValue(object value)
    {
        if (value == null)
        {
            return "null";
        }

        if (value is string || value is global::System.Guid)
        {
            return global::Newtonsoft.Json.JsonConvert.ToString(value.ToString());
        }

        if (value is bool)
        {
            return (bool)value ? "true" : "false";
        }

        if (value is global::System.Enum)
        {
            var member = value.GetType().GetTypeInfo().GetDeclaredField(value.ToString());
            var enumMember = member == null ? null : member.GetCustomAttribute<global::System.Runtime.Serialization.EnumMemberAttribute>();
            return enumMember != null && enumMember.Value != null ? enumMember.Value : value.ToString();
        }

        if (value is global::System.DateTime || value is global::System.DateTimeOffset)
        {
            return global::Newtonsoft.Json.JsonConvert.ToString(((global::System.IFormattable)value).ToString("o", global::System.Globalization.CultureInfo.InvariantCulture));
        }

        if (value is global::System.IFormattable)
        {
            return ((global::System.IFormattable)value).ToString(null, global::System.Globalization.CultureInfo.InvariantCulture);
        }

        if (value is global::System.Collections.IEnumerable)
        {
            return "[" + string.Join(", ", ((global::System.Collections.IEnumerable)value).Cast<object>().Select(FormatValue)) + "]";
        }

        return "{" + string.Join(", ", FormatProperties(value)) + "}";
    }

    private static global::System.Collections.Generic.IEnumerable<string> FormatProperties(object value)
    {
        return value.GetType()
            .GetRuntimeProperties()
            .Where(p => p.GetMethod != null && p.GetMethod.IsPublic && !p.GetMethod.IsStatic)
            .Select(p => new global::System.Collections.Generic.KeyValuePair<string, object>(FieldName(p), p.GetValue(value)))
            .Where(p => p.Value != null)
            .Select(p => p.Key + ": " + FormatValue(p.Value));
    }

    private static string FieldName(global::System.Reflection.PropertyInfo property)
    {
        var attribute = property.GetCustomAttribute<global::Newtonsoft.Json.JsonPropertyAttribute>();
        return attribute != null && attribute.PropertyName != null ? attribute.PropertyName : property.Name;
    }
}"#;

/// Render the support types with the given accessibility.
///
/// With nullable reference annotations enabled the support code opts out
/// of nullable analysis, since it is written against the older dialect.
pub fn infrastructure(accessibility: Accessibility, nullable_references: bool) -> Vec<CodeFragment> {
    let mut fragments = Vec::new();
    if nullable_references {
        fragments.push(CodeFragment::line("#nullable disable"));
    }
    fragments.extend(
        SOURCE
            .replace("{access}", accessibility.as_str())
            .lines()
            .map(|line| {
                if line.is_empty() {
                    CodeFragment::blank()
                } else {
                    CodeFragment::line(line)
                }
            }),
    );
    if nullable_references {
        fragments.push(CodeFragment::line("#nullable restore"));
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(fragments: &[CodeFragment]) -> Vec<&str> {
        fragments
            .iter()
            .filter_map(|f| match f {
                CodeFragment::Line(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_infrastructure_accessibility() {
        let fragments = infrastructure(Accessibility::Internal, false);
        let lines = lines(&fragments);
        assert!(lines.contains(&"internal abstract class GraphQlQueryBuilder"));
        assert!(lines.contains(&"internal static class GraphQlArgumentFormatter"));
        assert!(!lines.iter().any(|l| l.contains("{access}")));
    }

    #[test]
    fn test_infrastructure_declares_reserved_types() {
        let fragments = infrastructure(Accessibility::Public, false);
        let text = lines(&fragments).join("\n");
        for name in INFRASTRUCTURE_TYPES {
            assert!(text.contains(&format!("class {}", name)), "{name}");
        }
    }

    /// Whole-word uses of `name` not reached through a qualifier.
    fn bare_uses(text: &str, name: &str) -> usize {
        let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
        text.match_indices(name)
            .filter(|(at, _)| {
                let before = text[..*at].chars().next_back();
                let after = text[at + name.len()..].chars().next();
                !before.is_some_and(|c| is_word(c) || c == '.') && !after.is_some_and(is_word)
            })
            .count()
    }

    #[test]
    fn test_converter_populates_resolved_variant() {
        let text = lines(&infrastructure(Accessibility::Public, false)).join("\n");
        assert!(text.contains(
            "var targetType = objectType.GetTypeInfo().IsInterface ? ResolveVariant(token, objectType) : objectType;"
        ));
        assert!(text.contains("var instance = global::System.Activator.CreateInstance(targetType);"));
        assert!(text.contains("serializer.Populate(token.CreateReader(), instance);"));
        assert!(!text.contains("ToObject("));
    }

    #[test]
    fn test_framework_types_are_qualified() {
        let text = lines(&infrastructure(Accessibility::Public, false)).join("\n");
        for name in [
            "Type",
            "Attribute",
            "Enum",
            "Guid",
            "Activator",
            "List",
            "KeyValuePair",
            "IEnumerable",
            "JsonConverter",
            "JsonSerializer",
            "JToken",
        ] {
            assert_eq!(bare_uses(&text, name), 0, "{name} is used unqualified");
        }
        assert!(text.contains("ReadJson(global::Newtonsoft.Json.JsonReader reader, global::System.Type objectType"));
    }

    #[test]
    fn test_infrastructure_nullable_guard() {
        let fragments = infrastructure(Accessibility::Public, true);
        assert_eq!(fragments.first(), Some(&CodeFragment::line("#nullable disable")));
        assert_eq!(fragments.last(), Some(&CodeFragment::line("#nullable restore")));
    }
}
