//! Abstract syntax tree for schema documents.
//!
//! Only the type-system subset the compiler understands is represented:
//! object, interface, union, enum and scalar definitions plus directives.

use crate::{
    directive::{DirectiveKind, DirectiveLocation},
    position::SourcePosition,
};
use derive_more::Display;
use indexmap::{IndexMap, map::Entry};

///
/// Document
/// One or more parsed schema sources merged into a single set of definitions.
///

#[derive(Clone, Debug, Default)]
pub struct Document {
    definitions: IndexMap<String, TypeDefinition>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition; returns the existing definition on name collision.
    pub(crate) fn insert(&mut self, def: TypeDefinition) -> Result<(), &TypeDefinition> {
        match self.definitions.entry(def.name().to_string()) {
            Entry::Occupied(existing) => Err(&*existing.into_mut()),
            Entry::Vacant(slot) => {
                slot.insert(def);
                Ok(())
            }
        }
    }

    /// Definitions in source order.
    pub fn definitions(&self) -> indexmap::map::Values<'_, String, TypeDefinition> {
        self.definitions.values()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.definitions.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectTypeDefinition> {
        self.definitions.values().filter_map(|def| match def {
            TypeDefinition::Object(o) => Some(o),
            _ => None,
        })
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &ObjectTypeDefinition> {
        self.definitions.values().filter_map(|def| match def {
            TypeDefinition::Interface(i) => Some(i),
            _ => None,
        })
    }

    pub fn unions(&self) -> impl Iterator<Item = &UnionTypeDefinition> {
        self.definitions.values().filter_map(|def| match def {
            TypeDefinition::Union(u) => Some(u),
            _ => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumTypeDefinition> {
        self.definitions.values().filter_map(|def| match def {
            TypeDefinition::Enum(e) => Some(e),
            _ => None,
        })
    }

    pub fn scalars(&self) -> impl Iterator<Item = &ScalarTypeDefinition> {
        self.definitions.values().filter_map(|def| match def {
            TypeDefinition::Scalar(s) => Some(s),
            _ => None,
        })
    }
}

///
/// TypeDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Object(ObjectTypeDefinition),
    Interface(ObjectTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    Scalar(ScalarTypeDefinition),
}

impl TypeDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Object(def) | Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::Scalar(def) => &def.name,
        }
    }

    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        match self {
            Self::Object(def) | Self::Interface(def) => def.position,
            Self::Union(def) => def.position,
            Self::Enum(def) => def.position,
            Self::Scalar(def) => def.position,
        }
    }

    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        match self {
            Self::Object(def) | Self::Interface(def) => &def.directives,
            Self::Union(def) => &def.directives,
            Self::Enum(def) => &def.directives,
            Self::Scalar(def) => &def.directives,
        }
    }

    #[must_use]
    pub const fn location(&self) -> DirectiveLocation {
        match self {
            Self::Object(_) => DirectiveLocation::Object,
            Self::Interface(_) => DirectiveLocation::Interface,
            Self::Union(_) => DirectiveLocation::Union,
            Self::Enum(_) => DirectiveLocation::Enum,
            Self::Scalar(_) => DirectiveLocation::Scalar,
        }
    }
}

///
/// ObjectTypeDefinition
/// Shared by `type` and `interface` definitions.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub implements: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    pub position: SourcePosition,
}

impl ObjectTypeDefinition {
    #[must_use]
    pub fn has_directive(&self, kind: DirectiveKind) -> bool {
        has_directive(&self.directives, kind)
    }
}

///
/// FieldDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: String,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
    pub position: SourcePosition,
}

impl FieldDefinition {
    #[must_use]
    pub fn has_directive(&self, kind: DirectiveKind) -> bool {
        has_directive(&self.directives, kind)
    }

    #[must_use]
    pub fn directive(&self, kind: DirectiveKind) -> Option<&Directive> {
        self.directives.iter().find(|d| d.kind() == Some(kind))
    }
}

///
/// TypeRef
/// A field type as written: named, non-null or list wrappers.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum TypeRef {
    #[display("{_0}")]
    Named(String),
    #[display("{_0}!")]
    NonNull(Box<Self>),
    #[display("[{_0}]")]
    List(Box<Self>),
}

impl TypeRef {
    /// Innermost named type.
    #[must_use]
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::NonNull(inner) | Self::List(inner) => inner.base_name(),
        }
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// The type with an outer non-null wrapper removed.
    #[must_use]
    pub fn nullable(&self) -> &Self {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }

    /// Number of list wrappers between the field and its named type.
    #[must_use]
    pub fn list_depth(&self) -> usize {
        match self {
            Self::Named(_) => 0,
            Self::NonNull(inner) => inner.list_depth(),
            Self::List(inner) => 1 + inner.list_depth(),
        }
    }
}

///
/// UnionTypeDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub members: Vec<String>,
    pub position: SourcePosition,
}

///
/// EnumTypeDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<EnumValueDefinition>,
    pub position: SourcePosition,
}

///
/// EnumValueDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub position: SourcePosition,
}

///
/// ScalarTypeDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
    pub position: SourcePosition,
}

///
/// Directive
/// A directive occurrence such as `@derivedFrom(field: "author")`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub position: SourcePosition,
}

impl Directive {
    /// The declared directive this occurrence refers to, if any.
    #[must_use]
    pub fn kind(&self) -> Option<DirectiveKind> {
        DirectiveKind::from_name(&self.name)
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    #[must_use]
    pub fn string_argument(&self, name: &str) -> Option<&str> {
        match self.argument(name)? {
            ConstValue::String(s) => Some(s),
            _ => None,
        }
    }
}

///
/// Argument
///

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: ConstValue,
    pub position: SourcePosition,
}

///
/// ConstValue
///

#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Null,
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<Self>),
    Object(Vec<(String, Self)>),
}

impl ConstValue {
    /// Short description used in argument type errors.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
            Self::Enum(_) => "enum value",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }
}

fn has_directive(directives: &[Directive], kind: DirectiveKind) -> bool {
    directives.iter().any(|d| d.kind() == Some(kind))
}
