//! Member emitter: schema types to target declarations.

use std::collections::HashMap;

use gqlc_schema::{
    Field, InputValue, Schema, SchemaType, TypeId, TypeKind, TypeRef as SchemaTypeRef,
};

use crate::{
    builder::{
        ALL_SCALAR_FIELDS_METHOD, Annotation, ArgumentsSpec, ClassSpec, Declaration, EnumMemberSpec, EnumSpec,
        OperationRoot, OperationsSpec, PropertySpec, QueryBuilderSpec, SelectionKind,
        SelectionSpec, TypeRef,
    },
    error::{GenerationError, Result},
    naming::NamingPolicy,
};

/// Name of the property bound to `__typename` on concrete variants.
const TYPE_NAME_PROPERTY: &str = "TypeName";

/// Declarations produced for one schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedType {
    pub type_id: TypeId,
    /// Target name of the type's primary declaration.
    pub target_name: String,
    /// Primary declaration first, then argument holders, then the query builder.
    pub declarations: Vec<Declaration>,
}

/// Turns schema types into declarations.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    schema: &'a Schema,
    naming: NamingPolicy<'a>,
}

impl<'a> Emitter<'a> {
    pub fn new(schema: &'a Schema, naming: NamingPolicy<'a>) -> Self {
        Self { schema, naming }
    }

    /// Emit every declaration for a non-scalar type.
    pub fn emit(&self, ty: &SchemaType) -> Result<EmittedType> {
        let target_name = self.naming.target_type_name(ty);
        let mut declarations = Vec::new();

        match &ty.kind {
            TypeKind::Scalar => {}
            TypeKind::Enum(_) => declarations.push(Declaration::Enum(self.enumeration(ty, &target_name))),
            TypeKind::InputObject(input) => declarations.push(Declaration::Class(
                self.input_object(ty, &target_name, &input.fields)?,
            )),
            TypeKind::Object(_) => {
                declarations.push(Declaration::Class(self.object(ty, &target_name)?));
                declarations.extend(self.argument_holders(ty)?.into_iter().map(Declaration::Class));
                declarations.push(Declaration::QueryBuilder(self.query_builder(ty)?));
            }
            TypeKind::Interface(_) | TypeKind::Union(_) => {
                declarations.push(Declaration::Class(self.abstract_base(ty, &target_name)?));
                declarations.extend(self.argument_holders(ty)?.into_iter().map(Declaration::Class));
                declarations.push(Declaration::QueryBuilder(self.query_builder(ty)?));
            }
        }

        Ok(EmittedType {
            type_id: ty.id,
            target_name,
            declarations,
        })
    }

    /// Root entry points for every operation type the schema declares.
    pub fn operations(&self, name: &str) -> OperationsSpec {
        OperationsSpec {
            name: name.to_string(),
            roots: self
                .schema
                .root_types()
                .into_iter()
                .map(|(kind, root)| OperationRoot {
                    kind,
                    builder: self.naming.query_builder_name(root),
                })
                .collect(),
            accessibility: self.naming.config().accessibility(),
        }
    }

    /// Map a schema type reference to a target type.
    ///
    /// `NonNull` unwraps to a required type; every other reference is optional.
    pub fn to_target_type(&self, ty: &SchemaTypeRef, location: &str) -> Result<TypeRef> {
        match ty {
            SchemaTypeRef::NonNull(inner) => self.to_required_type(inner, location),
            other => Ok(TypeRef::optional(self.to_required_type(other, location)?)),
        }
    }

    fn to_required_type(&self, ty: &SchemaTypeRef, location: &str) -> Result<TypeRef> {
        match ty {
            SchemaTypeRef::NonNull(inner) => self.to_required_type(inner, location),
            SchemaTypeRef::List(inner) => Ok(TypeRef::array(self.to_target_type(inner, location)?)),
            SchemaTypeRef::Named(id) => {
                let named = self.lookup(*id, location)?;
                Ok(match &named.kind {
                    TypeKind::Scalar => self.naming.target_scalar_type(&named.name).ty,
                    TypeKind::Enum(_) => TypeRef::enumeration(self.naming.target_type_name(named)),
                    _ => TypeRef::named(self.naming.target_type_name(named)),
                })
            }
        }
    }

    fn lookup(&self, id: TypeId, location: &str) -> Result<&'a SchemaType> {
        self.schema
            .try_by_id(id)
            .ok_or_else(|| GenerationError::UnknownType {
                id: id.index(),
                location: location.to_string(),
            })
    }

    fn enumeration(&self, ty: &SchemaType, target_name: &str) -> EnumSpec {
        let TypeKind::Enum(enumeration) = &ty.kind else {
            return EnumSpec::new(target_name);
        };
        let config = self.naming.config();
        let mut taken = Vec::new();
        let mut spec = EnumSpec::new(target_name)
            .doc(ty.description.as_deref())
            .annotation(Annotation::StringEnum)
            .accessibility(config.accessibility());

        for value in &enumeration.values {
            let name = unique(self.naming.target_enum_member_name(&value.name), &mut taken);
            let mut member = EnumMemberSpec::new(&name).doc(value.description.as_deref());
            if self.naming.needs_serialized_name(&value.name, &name) {
                member = member.annotation(Annotation::SerializedName(value.name.clone()));
            }
            if let Some(deprecation) = &value.deprecation {
                member = member.annotation(Annotation::Deprecated(deprecation.reason.clone()));
            }
            spec = spec.member(member);
        }
        spec
    }

    fn object(&self, ty: &SchemaType, target_name: &str) -> Result<ClassSpec> {
        let mut implements = Vec::new();
        let mut interfaces = Vec::new();
        for id in ty.interfaces() {
            let interface = self.lookup(*id, &ty.name)?;
            implements.push(self.naming.target_type_name(interface));
            interfaces.push(interface);
        }
        for id in self.schema.unions_containing(ty.id) {
            implements.push(self.naming.target_type_name(self.lookup(id, &ty.name)?));
        }

        let mut taken = vec![target_name.to_string()];
        let mut properties = Vec::new();

        if !implements.is_empty() {
            let name = unique(TYPE_NAME_PROPERTY.to_string(), &mut taken);
            properties.push(
                PropertySpec::new(name, TypeRef::string())
                    .annotation(Annotation::SerializedName("__typename".into())),
            );
        }

        // Members declared by an interface keep the interface's name.
        let mut inherited: HashMap<&str, String> = HashMap::new();
        for interface in &interfaces {
            let interface_name = self.naming.target_type_name(interface);
            let names = self.interface_member_names(interface, &interface_name);
            for (field, name) in interface.fields().iter().zip(names) {
                if ty.field(&field.name).is_some() && !inherited.contains_key(field.name.as_str()) {
                    taken.push(name.clone());
                    inherited.insert(field.name.as_str(), name);
                }
            }
        }

        for field in ty.fields() {
            // The interface's declaration fixes the member type so the class
            // satisfies the contract.
            let declared = interfaces
                .iter()
                .find_map(|interface| interface.field(&field.name))
                .unwrap_or(field);
            let name = match inherited.get(field.name.as_str()) {
                Some(name) => name.clone(),
                None => unique(self.naming.target_field_name(&field.name, target_name), &mut taken),
            };
            properties.push(self.field_property(ty, name, field, &declared.ty)?);
        }

        let is_variant = !implements.is_empty();
        let mut spec = self
            .class(ClassSpec::new(target_name), ty)
            .implements(implements)
            .properties(properties);
        if is_variant {
            spec = spec.annotation(Annotation::Discriminator(ty.name.clone()));
        }
        Ok(spec)
    }

    fn abstract_base(&self, ty: &SchemaType, target_name: &str) -> Result<ClassSpec> {
        let mut implements = Vec::new();
        for id in ty.interfaces() {
            implements.push(self.naming.target_type_name(self.lookup(*id, &ty.name)?));
        }

        let names = self.interface_member_names(ty, target_name);
        let properties = ty
            .fields()
            .iter()
            .zip(names)
            .map(|(field, name)| self.field_property(ty, name, field, &field.ty))
            .collect::<Result<Vec<_>>>()?;

        let possible_types = self
            .schema
            .possible_types(ty.id)
            .iter()
            .map(|id| Ok(self.naming.target_type_name(self.lookup(*id, &ty.name)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(self
            .class(ClassSpec::interface(target_name), ty)
            .implements(implements)
            .properties(properties)
            .annotation(Annotation::Polymorphic { possible_types }))
    }

    /// Member names of an interface, in field order.
    ///
    /// Names every implementing class could claim for itself (the
    /// `__typename` property or its own class name) are skipped, so each
    /// implementation can reuse these names unchanged.
    fn interface_member_names(&self, ty: &SchemaType, target_name: &str) -> Vec<String> {
        let mut taken = vec![target_name.to_string(), TYPE_NAME_PROPERTY.to_string()];
        taken.extend(
            self.schema
                .types()
                .filter(|t| !t.interfaces().is_empty())
                .map(|t| self.naming.target_type_name(t)),
        );
        ty.fields()
            .iter()
            .map(|field| unique(self.naming.target_field_name(&field.name, target_name), &mut taken))
            .collect()
    }

    fn input_object(
        &self,
        ty: &SchemaType,
        target_name: &str,
        fields: &[InputValue],
    ) -> Result<ClassSpec> {
        let mut taken = vec![target_name.to_string()];
        let mut properties = Vec::new();
        for field in fields {
            let location = format!("{}.{}", ty.name, field.name);
            let name = unique(self.naming.target_field_name(&field.name, target_name), &mut taken);
            // Argument formatting writes the serialized name into query text,
            // so input fields always carry it.
            properties.push(
                PropertySpec::new(&name, self.to_target_type(&field.ty, &location)?)
                    .doc(field.description.as_deref())
                    .annotation(Annotation::SerializedName(field.name.clone())),
            );
        }
        Ok(self.class(ClassSpec::new(target_name), ty).properties(properties))
    }

    fn field_property(
        &self,
        owner: &SchemaType,
        name: String,
        field: &Field,
        ty: &SchemaTypeRef,
    ) -> Result<PropertySpec> {
        let location = format!("{}.{}", owner.name, field.name);
        let mut property =
            PropertySpec::new(&name, self.to_target_type(ty, &location)?).doc(field.description.as_deref());
        if self.naming.needs_serialized_name(&field.name, &name) {
            property = property.annotation(Annotation::SerializedName(field.name.clone()));
        }
        if let Some(deprecation) = &field.deprecation {
            property = property.annotation(Annotation::Deprecated(deprecation.reason.clone()));
        }
        Ok(property)
    }

    /// One holder class per field that takes arguments.
    fn argument_holders(&self, ty: &SchemaType) -> Result<Vec<ClassSpec>> {
        let owner = self.naming.target_class_name(&ty.name);
        let mut holders = Vec::new();
        for field in ty.fields().iter().filter(|f| !f.args.is_empty()) {
            let holder = self.naming.argument_holder_name(&owner, &field.name);
            let mut taken = vec![holder.clone()];
            let mut spec = ClassSpec::new(&holder)
                .accessibility(self.naming.config().accessibility())
                .partial(self.naming.config().partial_classes());
            for arg in &field.args {
                let location = format!("{}.{}.{}", ty.name, field.name, arg.name);
                let name = unique(self.naming.target_field_name(&arg.name, &holder), &mut taken);
                spec = spec.property(
                    PropertySpec::new(name, self.to_target_type(&arg.ty, &location)?)
                        .doc(arg.description.as_deref())
                        .annotation(Annotation::SerializedName(arg.name.clone())),
                );
            }
            holders.push(spec);
        }
        Ok(holders)
    }

    fn query_builder(&self, ty: &SchemaType) -> Result<QueryBuilderSpec> {
        let config = self.naming.config();
        let owner = self.naming.target_class_name(&ty.name);
        let mut spec = QueryBuilderSpec::new(self.naming.query_builder_name(ty), &ty.name);
        spec.doc = ty.description.clone();
        spec.include_typename = ty.is_abstract();
        spec.accessibility = config.accessibility();
        spec.partial = config.partial_classes();

        let mut taken = vec![spec.name.clone(), ALL_SCALAR_FIELDS_METHOD.to_string()];
        for field in ty.fields() {
            let location = format!("{}.{}", ty.name, field.name);
            let named = self.lookup(field.ty.named_type(), &location)?;
            let kind = if named.is_composite() {
                SelectionKind::Composite {
                    builder: self.naming.query_builder_name(named),
                }
            } else {
                SelectionKind::Scalar
            };

            let method = unique(self.naming.selection_method_name(&field.name), &mut taken);
            let mut selection = SelectionSpec::new(&field.name, method, kind);
            selection.doc = field.description.clone();
            selection.deprecation = field.deprecation.as_ref().map(|d| d.reason.clone());
            if !field.args.is_empty() {
                let holder = self.naming.argument_holder_name(&owner, &field.name);
                let mut holder_taken = vec![holder.clone()];
                selection.arguments = Some(ArgumentsSpec {
                    arguments: field
                        .args
                        .iter()
                        .map(|arg| {
                            let name = self.naming.target_field_name(&arg.name, &holder);
                            (arg.name.clone(), unique(name, &mut holder_taken))
                        })
                        .collect(),
                    required: field
                        .args
                        .iter()
                        .any(|arg| arg.ty.is_non_null() && arg.default_value.is_none()),
                    holder,
                });
            }
            spec = spec.selection(selection);
        }

        for id in self.schema.possible_types(ty.id) {
            let variant = self.lookup(*id, &ty.name)?;
            let method = unique(self.naming.fragment_method_name(variant), &mut taken);
            spec = spec.selection(SelectionSpec::new(
                &variant.name,
                method,
                SelectionKind::Fragment {
                    builder: self.naming.query_builder_name(variant),
                },
            ));
        }

        Ok(spec)
    }

    /// Apply the configured modifiers and the type's description.
    fn class(&self, spec: ClassSpec, ty: &SchemaType) -> ClassSpec {
        let config = self.naming.config();
        spec.doc(ty.description.as_deref())
            .accessibility(config.accessibility())
            .partial(config.partial_classes())
    }
}

/// Append `_` until `name` is not yet taken, then claim it.
fn unique(mut name: String, taken: &mut Vec<String>) -> String {
    while taken.contains(&name) {
        name.push('_');
    }
    taken.push(name.clone());
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::PrimitiveType,
        config::{GeneratorConfiguration, JsonPropertyGeneration},
        testing::{TEST_NAMING, blog_schema, object_schema},
    };

    /// Interface `Node` whose fields collide with names its implementations
    /// claim: the `__typename` property and the class name `User`.
    const COLLIDING_SCHEMA: &str = r#"{"__schema":{
        "queryType":{"name":"Query"},
        "types":[
            {"kind":"OBJECT","name":"Query","interfaces":[],"fields":[
                {"name":"node","args":[],"type":{"kind":"INTERFACE","name":"Node"},"isDeprecated":false}]},
            {"kind":"INTERFACE","name":"Node","fields":[
                {"name":"typeName","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false},
                {"name":"user","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false}],
             "possibleTypes":[{"kind":"OBJECT","name":"User"},{"kind":"OBJECT","name":"Post"}]},
            {"kind":"OBJECT","name":"User","interfaces":[{"kind":"INTERFACE","name":"Node"}],"fields":[
                {"name":"typeName","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false},
                {"name":"user","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false},
                {"name":"name","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false}]},
            {"kind":"OBJECT","name":"Post","interfaces":[{"kind":"INTERFACE","name":"Node"}],"fields":[
                {"name":"typeName","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false},
                {"name":"user","args":[],"type":{"kind":"SCALAR","name":"String"},"isDeprecated":false}]},
            {"kind":"SCALAR","name":"String"}
        ],
        "directives":[]}}"#;

    fn property_names(spec: &ClassSpec) -> Vec<&str> {
        spec.properties.iter().map(|p| p.name.as_str()).collect()
    }

    fn emit(schema: &Schema, config: &GeneratorConfiguration, name: &str) -> EmittedType {
        let emitter = Emitter::new(schema, NamingPolicy::new(config, &TEST_NAMING));
        emitter.emit(schema.get(name).unwrap()).unwrap()
    }

    fn class(emitted: &EmittedType) -> &ClassSpec {
        match &emitted.declarations[0] {
            Declaration::Class(spec) => spec,
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_nullability() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let user = emit(&schema, &config, "User");
        let user = class(&user);

        // posts: [Post!]!
        assert_eq!(
            user.find_property("Posts").unwrap().ty,
            TypeRef::array(TypeRef::named("Post"))
        );
        // name: String!
        assert_eq!(user.find_property("Name").unwrap().ty, TypeRef::string());
        // score: Float
        assert_eq!(
            user.find_property("Score").unwrap().ty,
            TypeRef::optional(TypeRef::primitive(PrimitiveType::Decimal))
        );

        let post = emit(&schema, &config, "Post");
        // tags: [String]
        assert_eq!(
            class(&post).find_property("Tags").unwrap().ty,
            TypeRef::optional(TypeRef::array(TypeRef::optional(TypeRef::string())))
        );
    }

    #[test]
    fn test_object_implements_interfaces_and_unions() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let user = emit(&schema, &config, "User");
        let user = class(&user);

        assert_eq!(user.implements, vec!["INode", "ISearchResult"]);
        assert!(user.annotations.contains(&Annotation::Discriminator("User".into())));
        let type_name = user.find_property("TypeName").unwrap();
        assert_eq!(type_name.serialized_name(), Some("__typename"));
        assert_eq!(type_name.ty, TypeRef::string());
    }

    #[test]
    fn test_interface_is_polymorphic_base() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let node = emit(&schema, &config, "Node");
        let node = class(&node);

        assert!(node.is_interface());
        assert_eq!(node.name, "INode");
        assert_eq!(node.find_property("Id").unwrap().ty, TypeRef::primitive(PrimitiveType::Guid));
        assert!(node.annotations.contains(&Annotation::Polymorphic {
            possible_types: vec!["User".into(), "Post".into()],
        }));
    }

    #[test]
    fn test_union_has_no_properties() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let search = emit(&schema, &config, "SearchResult");
        let base = class(&search);
        assert!(base.is_interface());
        assert!(base.properties.is_empty());

        let Declaration::QueryBuilder(builder) = search.declarations.last().unwrap() else {
            panic!("expected query builder");
        };
        assert!(builder.include_typename);
        let fragments: Vec<_> = builder.selections.iter().map(|s| s.method_name.as_str()).collect();
        assert_eq!(fragments, vec!["OnUser", "OnPost"]);
    }

    #[test]
    fn test_enum_members() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let role = emit(&schema, &config, "Role");
        let Declaration::Enum(role) = &role.declarations[0] else {
            panic!("expected enum");
        };

        assert!(role.annotations.contains(&Annotation::StringEnum));
        let names: Vec<_> = role.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Admin", "RegularUser", "Guest"]);
        assert!(role.members[1]
            .annotations
            .contains(&Annotation::SerializedName("REGULAR_USER".into())));
        assert!(role.members[2]
            .annotations
            .contains(&Annotation::Deprecated(Some("Guests are gone".into()))));
    }

    #[test]
    fn test_deprecated_field() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let user = emit(&schema, &config, "User");
        let email = class(&user).find_property("Email").unwrap();
        assert!(email
            .annotations
            .contains(&Annotation::Deprecated(Some("Use contact instead".into()))));
    }

    #[test]
    fn test_argument_holders() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let query = emit(&schema, &config, "Query");
        let names: Vec<_> = query.declarations.iter().map(Declaration::name).collect();
        assert_eq!(
            names,
            vec!["Query", "QueryUserArgs", "QuerySearchArgs", "QueryNodeArgs", "QueryQueryBuilder"]
        );

        let Declaration::Class(search) = &query.declarations[2] else {
            panic!("expected class");
        };
        let term = search.find_property("Term").unwrap();
        assert_eq!(term.ty, TypeRef::string());
        assert_eq!(term.serialized_name(), Some("term"));
        assert_eq!(
            search.find_property("First").unwrap().ty,
            TypeRef::optional(TypeRef::int())
        );
    }

    #[test]
    fn test_query_builder_selections() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let user = emit(&schema, &config, "User");
        let Declaration::QueryBuilder(builder) = user.declarations.last().unwrap() else {
            panic!("expected query builder");
        };

        assert_eq!(builder.name, "UserQueryBuilder");
        let posts = builder
            .selections
            .iter()
            .find(|s| s.field_name == "posts")
            .unwrap();
        assert_eq!(posts.method_name, "WithPosts");
        assert_eq!(
            posts.kind,
            SelectionKind::Composite {
                builder: "PostQueryBuilder".into()
            }
        );
        let args = posts.arguments.as_ref().unwrap();
        assert_eq!(args.holder, "UserPostsArgs");
        assert!(!args.required);

        let email = builder
            .selections
            .iter()
            .find(|s| s.field_name == "email")
            .unwrap();
        assert!(email.is_scalar());
        assert_eq!(email.deprecation, Some(Some("Use contact instead".into())));
    }

    #[test]
    fn test_required_arguments() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let query = emit(&schema, &config, "Query");
        let Declaration::QueryBuilder(builder) = query.declarations.last().unwrap() else {
            panic!("expected query builder");
        };
        let search = builder.selections.iter().find(|s| s.field_name == "search").unwrap();
        assert!(search.arguments.as_ref().unwrap().required);
    }

    #[test]
    fn test_json_property_always() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::builder()
            .json_property_generation(JsonPropertyGeneration::Always)
            .build()
            .unwrap();
        let input = emit(&schema, &config, "CreateUserInput");
        for property in &class(&input).properties {
            assert!(property.serialized_name().is_some(), "{}", property.name);
        }
    }

    #[test]
    fn test_input_object_keeps_wire_names() {
        let schema = blog_schema();
        for generation in [JsonPropertyGeneration::Never, JsonPropertyGeneration::CaseInsensitive] {
            let config = GeneratorConfiguration::builder()
                .json_property_generation(generation)
                .build()
                .unwrap();
            let input = emit(&schema, &config, "CreateUserInput");
            let wire: Vec<_> = class(&input)
                .properties
                .iter()
                .map(|p| (p.name.as_str(), p.serialized_name()))
                .collect();
            assert_eq!(
                wire,
                vec![("Name", Some("name")), ("Role", Some("role")), ("Tags", Some("tags"))],
                "{generation:?}"
            );

            // Output types still follow the configured strategy.
            let user = emit(&schema, &config, "User");
            assert_eq!(class(&user).find_property("Name").unwrap().serialized_name(), None);
        }
    }

    #[test]
    fn test_interface_and_implementations_agree_on_member_names() {
        let schema = gqlc_schema::parse_str(COLLIDING_SCHEMA).unwrap();
        let config = GeneratorConfiguration::default();

        let node = emit(&schema, &config, "Node");
        assert_eq!(property_names(class(&node)), vec!["TypeName_", "User_"]);

        let user = emit(&schema, &config, "User");
        let user = class(&user);
        assert_eq!(property_names(user), vec!["TypeName", "TypeName_", "User_", "Name"]);
        assert_eq!(user.find_property("TypeName").unwrap().serialized_name(), Some("__typename"));
        assert_eq!(user.find_property("TypeName_").unwrap().serialized_name(), Some("typeName"));
        assert_eq!(user.find_property("User_").unwrap().serialized_name(), Some("user"));

        let post = emit(&schema, &config, "Post");
        assert_eq!(property_names(class(&post)), vec!["TypeName", "TypeName_", "User_"]);
    }

    #[test]
    fn test_selection_method_avoids_all_scalar_fields() {
        let schema = object_schema(&[("Query", &[("allScalarFields", "String"), ("name", "String")])]);
        let config = GeneratorConfiguration::default();
        let query = emit(&schema, &config, "Query");
        let Declaration::QueryBuilder(builder) = query.declarations.last().unwrap() else {
            panic!("expected query builder");
        };
        let methods: Vec<_> = builder.selections.iter().map(|s| s.method_name.as_str()).collect();
        assert_eq!(methods, vec!["WithAllScalarFields_", "WithName"]);
    }

    #[test]
    fn test_input_object() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let input = emit(&schema, &config, "CreateUserInput");
        let input = class(&input);
        assert!(!input.is_interface());
        assert_eq!(input.find_property("Role").unwrap().ty, TypeRef::optional(TypeRef::enumeration("Role")));
        assert_eq!(input.properties.len(), 3);
        assert_eq!(input.annotations, vec![]);
    }

    #[test]
    fn test_class_mapping_used_everywhere() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::builder()
            .class_prefix("Gql")
            .class_mapping("Post", "Article")
            .build()
            .unwrap();
        let user = emit(&schema, &config, "User");
        assert_eq!(user.target_name, "GqlUser");
        assert_eq!(
            class(&user).find_property("Posts").unwrap().ty,
            TypeRef::array(TypeRef::named("Article"))
        );

        let node = emit(&schema, &config, "Node");
        assert!(class(&node).annotations.contains(&Annotation::Polymorphic {
            possible_types: vec!["GqlUser".into(), "Article".into()],
        }));
    }

    #[test]
    fn test_operations() {
        let schema = blog_schema();
        let config = GeneratorConfiguration::default();
        let emitter = Emitter::new(&schema, NamingPolicy::new(&config, &TEST_NAMING));
        let operations = emitter.operations("GraphQlOperations");
        let builders: Vec<_> = operations.roots.iter().map(|r| r.builder.as_str()).collect();
        assert_eq!(builders, vec!["QueryQueryBuilder", "MutationQueryBuilder"]);
    }

    #[test]
    fn test_unique() {
        let mut taken = vec!["User".to_string()];
        assert_eq!(unique("User".into(), &mut taken), "User_");
        assert_eq!(unique("User".into(), &mut taken), "User__");
        assert_eq!(unique("Name".into(), &mut taken), "Name");
    }
}
