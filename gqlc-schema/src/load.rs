//! Two-pass resolution of a raw introspection result.
//!
//! Pass 1 assigns a [`TypeId`] to every declared type name. Pass 2 rebuilds
//! each type with all references resolved against that table, failing on
//! the first name that does not resolve.

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    introspection::{
        RawDirective, RawEnumValue, RawField, RawInputValue, RawSchema, RawType, RawTypeKind,
        RawTypeRef,
    },
    model::{
        Deprecation, Directive, EnumType, EnumValue, Field, InputObjectType, InputValue,
        InterfaceType, ObjectType, Schema, SchemaType, TypeId, TypeKind, TypeRef, UnionType,
    },
};

/// Resolve a raw schema into the [`Schema`] graph.
pub fn load(raw: RawSchema) -> Result<Schema> {
    let index = build_index(&raw.types)?;
    let resolver = Resolver { index: &index };

    let mut types = raw
        .types
        .iter()
        .enumerate()
        .map(|(i, ty)| resolver.resolve_type(TypeId(i), ty))
        .collect::<Result<Vec<_>>>()?;

    fill_interface_implementations(&mut types);

    let query_type = resolver.lookup(&raw.query_type.name, "__schema.queryType")?;
    let mutation_type = raw
        .mutation_type
        .as_ref()
        .map(|root| resolver.lookup(&root.name, "__schema.mutationType"))
        .transpose()?;
    let subscription_type = raw
        .subscription_type
        .as_ref()
        .map(|root| resolver.lookup(&root.name, "__schema.subscriptionType"))
        .transpose()?;

    let directives = raw
        .directives
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|directive| resolver.resolve_directive(directive))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        types = types.len(),
        directives = directives.len(),
        "resolved introspection schema"
    );

    Ok(Schema {
        types,
        index,
        query_type,
        mutation_type,
        subscription_type,
        directives,
    })
}

/// Pass 1: name -> id table, rejecting duplicates and wrapper kinds.
fn build_index(types: &[RawType]) -> Result<IndexMap<String, TypeId>> {
    let mut index = IndexMap::with_capacity(types.len());
    for (i, ty) in types.iter().enumerate() {
        if matches!(ty.kind, RawTypeKind::List | RawTypeKind::NonNull) {
            return Err(Box::new(Error::UnexpectedTypeKind {
                name: ty.name.clone(),
                kind: ty.kind.as_str().to_string(),
            }));
        }
        if index.insert(ty.name.clone(), TypeId(i)).is_some() {
            return Err(Box::new(Error::DuplicateType {
                name: ty.name.clone(),
            }));
        }
    }
    Ok(index)
}

/// Interfaces without `possibleTypes` get the objects declaring them.
fn fill_interface_implementations(types: &mut [SchemaType]) {
    let mut implementations: IndexMap<TypeId, Vec<TypeId>> = IndexMap::new();
    for ty in types.iter() {
        if let TypeKind::Object(object) = &ty.kind {
            for interface in &object.interfaces {
                implementations.entry(*interface).or_default().push(ty.id);
            }
        }
    }

    for ty in types.iter_mut() {
        if let TypeKind::Interface(interface) = &mut ty.kind
            && interface.possible_types.is_empty()
            && let Some(found) = implementations.get(&ty.id)
        {
            interface.possible_types = found.clone();
        }
    }
}

/// Pass 2 state: the completed name table.
struct Resolver<'a> {
    index: &'a IndexMap<String, TypeId>,
}

impl Resolver<'_> {
    fn lookup(&self, name: &str, location: &str) -> Result<TypeId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::unresolved(name, location))
    }

    fn resolve_type(&self, id: TypeId, raw: &RawType) -> Result<SchemaType> {
        let kind = match raw.kind {
            RawTypeKind::Scalar => TypeKind::Scalar,
            RawTypeKind::Object => TypeKind::Object(ObjectType {
                fields: self.resolve_fields(&raw.name, raw.fields.as_deref())?,
                interfaces: self.resolve_named_list(&raw.name, raw.interfaces.as_deref())?,
            }),
            RawTypeKind::Interface => TypeKind::Interface(InterfaceType {
                fields: self.resolve_fields(&raw.name, raw.fields.as_deref())?,
                interfaces: self.resolve_named_list(&raw.name, raw.interfaces.as_deref())?,
                possible_types: self
                    .resolve_named_list(&raw.name, raw.possible_types.as_deref())?,
            }),
            RawTypeKind::Union => TypeKind::Union(UnionType {
                possible_types: self
                    .resolve_named_list(&raw.name, raw.possible_types.as_deref())?,
            }),
            RawTypeKind::Enum => TypeKind::Enum(EnumType {
                values: raw
                    .enum_values
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(resolve_enum_value)
                    .collect(),
            }),
            RawTypeKind::InputObject => TypeKind::InputObject(InputObjectType {
                fields: self.resolve_input_values(&raw.name, raw.input_fields.as_deref())?,
            }),
            // Rejected during indexing.
            RawTypeKind::List | RawTypeKind::NonNull => {
                return Err(Box::new(Error::UnexpectedTypeKind {
                    name: raw.name.clone(),
                    kind: raw.kind.as_str().to_string(),
                }));
            }
        };

        Ok(SchemaType {
            id,
            name: raw.name.clone(),
            description: raw.description.clone(),
            kind,
        })
    }

    fn resolve_fields(&self, owner: &str, fields: Option<&[RawField]>) -> Result<Vec<Field>> {
        fields
            .unwrap_or_default()
            .iter()
            .map(|field| {
                let location = format!("{}.{}", owner, field.name);
                Ok(Field {
                    name: field.name.clone(),
                    description: field.description.clone(),
                    ty: self.resolve_ref(&field.ty, &location)?,
                    args: self.resolve_input_values(&location, field.args.as_deref())?,
                    deprecation: deprecation(field.is_deprecated, &field.deprecation_reason),
                })
            })
            .collect()
    }

    fn resolve_input_values(
        &self,
        owner: &str,
        values: Option<&[RawInputValue]>,
    ) -> Result<Vec<InputValue>> {
        values
            .unwrap_or_default()
            .iter()
            .map(|value| {
                let location = format!("{}.{}", owner, value.name);
                Ok(InputValue {
                    name: value.name.clone(),
                    description: value.description.clone(),
                    ty: self.resolve_ref(&value.ty, &location)?,
                    default_value: value.default_value.clone(),
                })
            })
            .collect()
    }

    fn resolve_named_list(&self, owner: &str, refs: Option<&[RawTypeRef]>) -> Result<Vec<TypeId>> {
        refs.unwrap_or_default()
            .iter()
            .map(|r| match &r.name {
                Some(name) => self.lookup(name, owner),
                None => Err(Error::invalid_reference(owner, "named type without a name")),
            })
            .collect()
    }

    fn resolve_ref(&self, raw: &RawTypeRef, location: &str) -> Result<TypeRef> {
        match raw.kind {
            RawTypeKind::NonNull => {
                let inner = self.wrapped(raw, location)?;
                if inner.is_non_null() {
                    return Err(Error::invalid_reference(location, "NON_NULL wraps NON_NULL"));
                }
                Ok(TypeRef::NonNull(Box::new(inner)))
            }
            RawTypeKind::List => Ok(TypeRef::List(Box::new(self.wrapped(raw, location)?))),
            _ => match &raw.name {
                Some(name) => Ok(TypeRef::Named(self.lookup(name, location)?)),
                None => Err(Error::invalid_reference(location, "named type without a name")),
            },
        }
    }

    fn wrapped(&self, raw: &RawTypeRef, location: &str) -> Result<TypeRef> {
        match &raw.of_type {
            Some(inner) => self.resolve_ref(inner, location),
            None => Err(Error::invalid_reference(location, "wrapper type without ofType")),
        }
    }

    fn resolve_directive(&self, raw: &RawDirective) -> Result<Directive> {
        let owner = format!("@{}", raw.name);
        Ok(Directive {
            name: raw.name.clone(),
            description: raw.description.clone(),
            locations: raw.locations.clone(),
            args: self.resolve_input_values(&owner, raw.args.as_deref())?,
        })
    }
}

fn resolve_enum_value(raw: &RawEnumValue) -> EnumValue {
    EnumValue {
        name: raw.name.clone(),
        description: raw.description.clone(),
        deprecation: deprecation(raw.is_deprecated, &raw.deprecation_reason),
    }
}

fn deprecation(is_deprecated: bool, reason: &Option<String>) -> Option<Deprecation> {
    is_deprecated.then(|| Deprecation {
        reason: reason.clone(),
    })
}
