//! Resolved schema graph.
//!
//! Every type reference in this module points at a [`TypeId`] inside the
//! owning [`Schema`]; no bare type names survive loading.

use indexmap::IndexMap;

/// Index of a type node inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    /// Position of the type in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A field or argument type: `NonNull(T) | List(T) | Named(T)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(TypeId),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The innermost named type.
    pub fn named_type(&self) -> TypeId {
        match self {
            Self::Named(id) => *id,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    /// Whether the outermost wrapper is `NonNull`.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Render in SDL notation, e.g. `[String!]!`.
    pub fn to_sdl(&self, schema: &Schema) -> String {
        match self {
            Self::Named(id) => schema
                .try_by_id(*id)
                .map(|ty| ty.name.clone())
                .unwrap_or_else(|| format!("<#{}>", id.0)),
            Self::List(inner) => format!("[{}]", inner.to_sdl(schema)),
            Self::NonNull(inner) => format!("{}!", inner.to_sdl(schema)),
        }
    }
}

/// Deprecation marker with its optional reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub reason: Option<String>,
}

/// An output field of an object or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub args: Vec<InputValue>,
    pub deprecation: Option<Deprecation>,
}

/// An argument or input-object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<String>,
    pub args: Vec<InputValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub fields: Vec<Field>,
    pub interfaces: Vec<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub fields: Vec<Field>,
    pub interfaces: Vec<TypeId>,
    pub possible_types: Vec<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub possible_types: Vec<TypeId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub fields: Vec<InputValue>,
}

/// Kind-specific payload of a [`SchemaType`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Scalar,
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Object(_) => "object",
            Self::Interface(_) => "interface",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::InputObject(_) => "input object",
        }
    }
}

/// A named type in the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaType {
    pub id: TypeId,
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeKind,
}

impl SchemaType {
    /// Output fields (objects and interfaces); empty for every other kind.
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            TypeKind::Object(object) => &object.fields,
            TypeKind::Interface(interface) => &interface.fields,
            _ => &[],
        }
    }

    /// Find an output field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Interfaces declared by an object or interface.
    pub fn interfaces(&self) -> &[TypeId] {
        match &self.kind {
            TypeKind::Object(object) => &object.interfaces,
            TypeKind::Interface(interface) => &interface.interfaces,
            _ => &[],
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar)
    }

    /// Objects, interfaces and unions: types that take a selection set.
    pub fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Object(_) | TypeKind::Interface(_) | TypeKind::Union(_)
        )
    }

    /// Interfaces and unions: types resolved to a concrete object at runtime.
    pub fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Interface(_) | TypeKind::Union(_))
    }

    /// Introspection types such as `__Type` are never generated.
    pub fn is_introspection(&self) -> bool {
        is_introspection_type(&self.name)
    }
}

/// Names reserved for the introspection system start with `__`.
pub fn is_introspection_type(name: &str) -> bool {
    name.starts_with("__")
}

/// Scalars every GraphQL schema provides.
pub const BUILTIN_SCALARS: &[&str] = &["String", "Boolean", "Int", "Float", "ID"];

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Operation kind of a root type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// The GraphQL keyword starting an operation of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// A resolved GraphQL schema.
///
/// Built once by [`crate::load`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) types: Vec<SchemaType>,
    pub(crate) index: IndexMap<String, TypeId>,
    pub(crate) query_type: TypeId,
    pub(crate) mutation_type: Option<TypeId>,
    pub(crate) subscription_type: Option<TypeId>,
    pub(crate) directives: Vec<Directive>,
}

impl Schema {
    /// All types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.iter()
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a type by its schema name.
    pub fn get(&self, name: &str) -> Option<&SchemaType> {
        self.index.get(name).map(|id| &self.types[id.0])
    }

    /// Look up a type id by its schema name.
    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.index.get(name).copied()
    }

    /// Look up a type by id, returning `None` for ids foreign to this schema.
    pub fn try_by_id(&self, id: TypeId) -> Option<&SchemaType> {
        self.types.get(id.0)
    }

    /// Look up a type by id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this schema.
    pub fn by_id(&self, id: TypeId) -> &SchemaType {
        &self.types[id.0]
    }

    pub fn query_type(&self) -> &SchemaType {
        self.by_id(self.query_type)
    }

    pub fn mutation_type(&self) -> Option<&SchemaType> {
        self.mutation_type.map(|id| self.by_id(id))
    }

    pub fn subscription_type(&self) -> Option<&SchemaType> {
        self.subscription_type.map(|id| self.by_id(id))
    }

    /// Root operation types that exist, in query/mutation/subscription order.
    pub fn root_types(&self) -> Vec<(OperationKind, &SchemaType)> {
        let mut roots = vec![(OperationKind::Query, self.query_type())];
        if let Some(mutation) = self.mutation_type() {
            roots.push((OperationKind::Mutation, mutation));
        }
        if let Some(subscription) = self.subscription_type() {
            roots.push((OperationKind::Subscription, subscription));
        }
        roots
    }

    /// Concrete object types a union or interface can resolve to.
    pub fn possible_types(&self, id: TypeId) -> &[TypeId] {
        match self.try_by_id(id).map(|ty| &ty.kind) {
            Some(TypeKind::Union(union)) => &union.possible_types,
            Some(TypeKind::Interface(interface)) => &interface.possible_types,
            _ => &[],
        }
    }

    /// Unions listing the given type as a member, in declaration order.
    pub fn unions_containing(&self, id: TypeId) -> Vec<TypeId> {
        self.types
            .iter()
            .filter(|ty| match &ty.kind {
                TypeKind::Union(union) => union.possible_types.contains(&id),
                _ => false,
            })
            .map(|ty| ty.id)
            .collect()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }
}
