use gqlc_codegen::{
    GenerationContext, GeneratorConfiguration,
    builder::{Annotation, Declaration, TypeRef},
    config::{JsonPropertyGeneration, OutputMode},
    emitter::Emitter,
    naming::NamingPolicy,
    testing::{PlainTarget, TEST_NAMING, blog_schema, object_schema},
};
use gqlc_schema::{Schema, TypeKind};

fn emitted_declarations(schema: &Schema, config: &GeneratorConfiguration) -> Vec<Declaration> {
    let emitter = Emitter::new(schema, NamingPolicy::new(config, &TEST_NAMING));
    schema
        .types()
        .filter(|ty| !ty.is_scalar() && !ty.is_introspection())
        .flat_map(|ty| emitter.emit(ty).unwrap().declarations)
        .collect()
}

#[test]
fn test_generation_is_deterministic() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::default();
    let target = PlainTarget::default();

    let first = GenerationContext::new(&schema, &config, &target).generate().unwrap();
    let second = GenerationContext::new(&schema, &config, &target).generate().unwrap();
    assert_eq!(first.units, second.units);
}

#[test]
fn test_every_type_declared_once() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::default();
    let target = PlainTarget::default();
    let generation = GenerationContext::new(&schema, &config, &target).generate().unwrap();
    let declared = &generation.units[0].declarations;

    let naming = NamingPolicy::new(&config, &TEST_NAMING);
    for ty in schema.types() {
        let name = naming.target_type_name(ty);
        let count = declared.iter().filter(|d| **d == name).count();
        if ty.is_scalar() || ty.is_introspection() {
            assert_eq!(count, 0, "{} should not be declared", ty.name);
        } else {
            assert_eq!(count, 1, "{} should be declared exactly once", ty.name);
        }
    }
}

#[test]
fn test_renamed_members_carry_original_name() {
    let schema = blog_schema();
    for mode in [JsonPropertyGeneration::CaseSensitive, JsonPropertyGeneration::Always] {
        let config = GeneratorConfiguration::builder()
            .json_property_generation(mode)
            .build()
            .unwrap();
        let naming = NamingPolicy::new(&config, &TEST_NAMING);

        for ty in schema.types().filter(|ty| matches!(ty.kind, TypeKind::Object(_))) {
            let target = naming.target_type_name(ty);
            let declarations = emitted_declarations(&schema, &config);
            let Some(Declaration::Class(class)) = declarations.iter().find(|d| d.name() == target)
            else {
                panic!("missing class for {}", ty.name);
            };
            for field in ty.fields() {
                let member = naming.target_field_name(&field.name, &target);
                let property = class.find_property(&member).unwrap();
                if member != field.name {
                    assert_eq!(property.serialized_name(), Some(field.name.as_str()));
                }
            }
        }
    }
}

#[test]
fn test_class_mapping_precedence() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::builder()
        .class_prefix("Api")
        .class_suffix("Model")
        .class_mapping("User", "Account")
        .build()
        .unwrap();

    let declarations = emitted_declarations(&schema, &config);
    let names: Vec<_> = declarations.iter().map(Declaration::name).collect();
    assert!(names.contains(&"Account"));
    assert!(names.contains(&"ApiPostModel"));
    assert!(!names.iter().any(|n| n.contains("ApiUser")));

    // Every reference to User uses the override.
    let Some(Declaration::Class(post)) = declarations.iter().find(|d| d.name() == "ApiPostModel")
    else {
        panic!("missing post class");
    };
    assert_eq!(post.find_property("Author").unwrap().ty, TypeRef::named("Account"));

    let Some(Declaration::Class(node)) = declarations.iter().find(|d| d.name() == "IApiNodeModel")
    else {
        panic!("missing node interface");
    };
    assert!(node.annotations.contains(&Annotation::Polymorphic {
        possible_types: vec!["Account".into(), "ApiPostModel".into()],
    }));
}

#[test]
fn test_single_field_query() {
    let schema = object_schema(&[("Query", &[("field", "String")])]);
    let config = GeneratorConfiguration::default();
    let declarations = emitted_declarations(&schema, &config);

    let Declaration::Class(query) = &declarations[0] else {
        panic!("expected class");
    };
    assert_eq!(query.name, "Query");
    assert_eq!(query.properties.len(), 1);
    let field = &query.properties[0];
    assert_eq!(field.name, "Field");
    assert_eq!(field.ty, TypeRef::optional(TypeRef::string()));
    assert_eq!(field.serialized_name(), Some("field"));

    let target = PlainTarget::default();
    let generation = GenerationContext::new(&schema, &config, &target).generate().unwrap();
    assert_eq!(generation.units.len(), 1);
}

#[test]
fn test_ten_object_types() {
    let names = [
        "Query", "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
    ];
    let types: Vec<(&str, &[(&str, &str)])> = names
        .iter()
        .map(|name| (*name, &[("id", "Int!")] as &[(&str, &str)]))
        .collect();
    let schema = object_schema(&types);
    let target = PlainTarget::default();

    let multiple = GeneratorConfiguration::builder()
        .output_mode(OutputMode::Multiple)
        .build()
        .unwrap();
    let generation = GenerationContext::new(&schema, &multiple, &target).generate().unwrap();
    assert_eq!(generation.units.len(), 11);
    for name in names {
        assert!(generation.unit(name).is_some(), "missing unit {name}");
    }
    assert!(generation.unit("BaseClasses").is_some());

    let single = GeneratorConfiguration::default();
    let generation = GenerationContext::new(&schema, &single, &target).generate().unwrap();
    assert_eq!(generation.units.len(), 1);
    let declared = &generation.units[0].declarations;
    for name in names {
        assert!(declared.iter().any(|d| d == name), "missing declaration {name}");
    }
}

#[test]
fn test_ordered_target_sorts_acyclic_schema() {
    let schema = object_schema(&[
        ("Query", &[("a", "A")]),
        ("A", &[("b", "B!")]),
        ("B", &[("value", "Int")]),
    ]);
    let config = GeneratorConfiguration::default();
    let target = PlainTarget::ordered();
    let generation = GenerationContext::new(&schema, &config, &target).generate().unwrap();
    let declared = &generation.units[0].declarations;
    let position = |name: &str| declared.iter().position(|d| d == name).unwrap();
    assert!(position("B") < position("A"));
    assert!(position("A") < position("Query"));
}

#[test]
fn test_ordered_target_rejects_cycle() {
    let schema = blog_schema();
    let config = GeneratorConfiguration::default();
    let target = PlainTarget::ordered();
    let err = GenerationContext::new(&schema, &config, &target).generate().unwrap_err();
    assert!(matches!(err, gqlc_codegen::GenerationError::CyclicDeclarations { .. }));
}
