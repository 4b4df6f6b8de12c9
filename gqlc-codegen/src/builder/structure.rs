//! Language-agnostic declaration specifications.
//!
//! The emitter describes *what* to declare with these specs; a
//! [`StructureRenderer`] decides how each one looks in the target language.

use gqlc_schema::OperationKind;

use super::{
    CodeFragment,
    types::{Accessibility, TypeRef},
};

/// A serialization or semantic marker attached to a declaration or member.
///
/// Renderers interpret annotations per target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The member is (de)serialized under this wire name.
    SerializedName(String),
    /// The element is deprecated, with an optional reason.
    Deprecated(Option<String>),
    /// The class is the concrete variant named by this `__typename`.
    Discriminator(String),
    /// The declaration is the base of a closed set of variants.
    Polymorphic { possible_types: Vec<String> },
    /// The enum is (de)serialized by member name rather than ordinal.
    StringEnum,
}

/// Whether a class spec declares a concrete class or an abstract base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
}

/// A declarative specification for a class or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    pub name: String,
    pub doc: Option<String>,
    pub kind: ClassKind,
    /// Implemented interfaces, in declaration order.
    pub implements: Vec<String>,
    pub annotations: Vec<Annotation>,
    pub properties: Vec<PropertySpec>,
    pub accessibility: Accessibility,
    pub partial: bool,
}

impl ClassSpec {
    /// Create a new public class spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            kind: ClassKind::Class,
            implements: Vec::new(),
            annotations: Vec::new(),
            properties: Vec::new(),
            accessibility: Accessibility::Public,
            partial: false,
        }
    }

    /// Create a new public interface spec.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Interface,
            ..Self::new(name)
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn implements(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.implements.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = PropertySpec>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Find a property by its target name.
    pub fn find_property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

/// A property of a class or interface.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: TypeRef,
    pub doc: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            doc: None,
            annotations: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The wire name, if the property carries one.
    pub fn serialized_name(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::SerializedName(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// A declarative specification for an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSpec {
    pub name: String,
    pub doc: Option<String>,
    pub members: Vec<EnumMemberSpec>,
    pub annotations: Vec<Annotation>,
    pub accessibility: Accessibility,
}

impl EnumSpec {
    /// Create a new public enum spec.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            members: Vec::new(),
            annotations: Vec::new(),
            accessibility: Accessibility::Public,
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn member(mut self, member: EnumMemberSpec) -> Self {
        self.members.push(member);
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }
}

/// A member of an enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberSpec {
    pub name: String,
    pub doc: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl EnumMemberSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            annotations: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Builder method selecting every argument-free scalar field at once.
pub const ALL_SCALAR_FIELDS_METHOD: &str = "WithAllScalarFields";

/// A fluent query builder for one composite schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilderSpec {
    pub name: String,
    /// Schema name of the type the builder selects from.
    pub type_name: String,
    pub doc: Option<String>,
    pub selections: Vec<SelectionSpec>,
    /// Always request `__typename` (abstract types).
    pub include_typename: bool,
    pub accessibility: Accessibility,
    pub partial: bool,
}

impl QueryBuilderSpec {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            doc: None,
            selections: Vec::new(),
            include_typename: false,
            accessibility: Accessibility::Public,
            partial: false,
        }
    }

    pub fn selection(mut self, selection: SelectionSpec) -> Self {
        self.selections.push(selection);
        self
    }
}

/// One selectable member of a query builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSpec {
    /// Schema field name (or variant type name for fragments).
    pub field_name: String,
    /// Target method name, e.g. `WithPosts` or `OnUser`.
    pub method_name: String,
    pub kind: SelectionKind,
    pub arguments: Option<ArgumentsSpec>,
    pub deprecation: Option<Option<String>>,
    pub doc: Option<String>,
}

impl SelectionSpec {
    pub fn new(
        field_name: impl Into<String>,
        method_name: impl Into<String>,
        kind: SelectionKind,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            method_name: method_name.into(),
            kind,
            arguments: None,
            deprecation: None,
            doc: None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, SelectionKind::Scalar)
    }
}

/// How a selection is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionKind {
    /// Scalar or enum field selected directly.
    Scalar,
    /// Composite field selected through a nested builder.
    Composite { builder: String },
    /// Inline fragment on a possible type.
    Fragment { builder: String },
}

/// Argument holder passed to a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentsSpec {
    /// Name of the generated argument-holder class.
    pub holder: String,
    /// `(schema argument name, holder property name)` pairs.
    pub arguments: Vec<(String, String)>,
    /// At least one argument is non-null, so the holder is mandatory.
    pub required: bool,
}

/// One root operation exposed by the operations entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRoot {
    pub kind: OperationKind,
    pub builder: String,
}

/// Root entry points: one method per operation kind.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationsSpec {
    pub name: String,
    pub roots: Vec<OperationRoot>,
    pub accessibility: Accessibility,
}

/// A single top-level declaration produced by the emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassSpec),
    Enum(EnumSpec),
    QueryBuilder(QueryBuilderSpec),
    Operations(OperationsSpec),
}

impl Declaration {
    /// Declared name.
    pub fn name(&self) -> &str {
        match self {
            Self::Class(spec) => &spec.name,
            Self::Enum(spec) => &spec.name,
            Self::QueryBuilder(spec) => &spec.name,
            Self::Operations(spec) => &spec.name,
        }
    }

    /// Names of other declarations this one mentions, in first-use order.
    pub fn references(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };

        match self {
            Self::Class(spec) => {
                spec.implements.iter().for_each(|i| push(i.as_str()));
                for property in &spec.properties {
                    if let Some(name) = property.ty.declaration_name() {
                        push(name);
                    }
                }
            }
            Self::Enum(_) => {}
            Self::QueryBuilder(spec) => {
                for selection in &spec.selections {
                    match &selection.kind {
                        SelectionKind::Composite { builder } | SelectionKind::Fragment { builder } => {
                            push(builder.as_str())
                        }
                        SelectionKind::Scalar => {}
                    }
                    if let Some(args) = &selection.arguments {
                        push(args.holder.as_str());
                    }
                }
            }
            Self::Operations(spec) => spec.roots.iter().for_each(|r| push(r.builder.as_str())),
        }

        let own = self.name().to_string();
        names.retain(|n| *n != own);
        names
    }

    /// Whether rendering this declaration relies on shared infrastructure.
    pub fn uses_infrastructure(&self) -> bool {
        match self {
            Self::Class(spec) => spec.annotations.iter().any(|a| {
                matches!(
                    a,
                    Annotation::Discriminator(_) | Annotation::Polymorphic { .. }
                )
            }),
            Self::Enum(_) => false,
            Self::QueryBuilder(_) | Self::Operations(_) => true,
        }
    }
}

/// Trait for rendering declaration specs to language-specific code.
pub trait StructureRenderer {
    fn render_class(&self, spec: &ClassSpec) -> Vec<CodeFragment>;

    fn render_enum(&self, spec: &EnumSpec) -> Vec<CodeFragment>;

    fn render_query_builder(&self, spec: &QueryBuilderSpec) -> Vec<CodeFragment>;

    fn render_operations(&self, spec: &OperationsSpec) -> Vec<CodeFragment>;

    /// Render an annotation as the lines it occupies above a declaration or member.
    fn render_annotation(&self, annotation: &Annotation) -> Vec<String>;

    fn render_accessibility(&self, accessibility: Accessibility) -> &'static str;

    /// Dispatch on the declaration kind.
    fn render_declaration(&self, declaration: &Declaration) -> Vec<CodeFragment> {
        match declaration {
            Declaration::Class(spec) => self.render_class(spec),
            Declaration::Enum(spec) => self.render_enum(spec),
            Declaration::QueryBuilder(spec) => self.render_query_builder(spec),
            Declaration::Operations(spec) => self.render_operations(spec),
        }
    }
}
