use crate::model::{Named, Relation};
use derive_more::Display;
use serde::Serialize;
use std::collections::BTreeSet;

///
/// ModelType
/// What a field's declared type name resolved to.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum ModelType {
    Entity,
    Enum,
    Interface,
    Json,
    Scalar,
    Union,
    Variant,
}

impl ModelType {
    /// Types stored in their own table and reachable through a relation.
    #[must_use]
    pub const fn is_relational(self) -> bool {
        matches!(self, Self::Entity | Self::Interface)
    }
}

///
/// FieldOrigin
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Written in the schema.
    #[default]
    Declared,
    /// Inverse side synthesized by relationship inference.
    Inverse,
    /// Interface discriminator synthesized after all entities are known.
    Discriminator,
}

///
/// Field
///

#[derive(Clone, Debug, Serialize)]
pub struct Field {
    pub name: String,

    /// Type name as written, with list and non-null wrappers removed.
    #[serde(rename = "type")]
    pub ty: String,

    /// Filled in by the second resolution pass.
    pub model_type: Option<ModelType>,

    pub nullable: bool,
    pub list: bool,

    /// Element nullability; always false for non-list fields.
    pub item_nullable: bool,

    pub unique: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub directives: BTreeSet<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,

    pub origin: FieldOrigin,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            model_type: None,
            nullable: true,
            list: false,
            item_nullable: false,
            unique: false,
            derived_from: None,
            description: None,
            directives: BTreeSet::new(),
            relation: None,
            origin: FieldOrigin::Declared,
        }
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.model_type == Some(ModelType::Scalar)
    }

    /// A field whose type is an entity, i.e. one side of a relation.
    #[must_use]
    pub fn is_entity_ref(&self) -> bool {
        self.model_type == Some(ModelType::Entity)
    }

    #[must_use]
    pub const fn is_derived(&self) -> bool {
        self.derived_from.is_some()
    }

    #[must_use]
    pub fn is_declared(&self) -> bool {
        self.origin == FieldOrigin::Declared
    }
}

///
/// ObjectType
/// An entity, interface, variant or JSON type.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ObjectType {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub fields: Vec<Field>,

    pub is_entity: bool,
    pub is_variant: bool,
    pub is_interface: bool,
    pub is_json: bool,

    /// The single interface a concrete entity implements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,

    /// Implementing entities, in declaration order. Interfaces only.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implementers: Vec<String>,
}

impl ObjectType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Names of the non-scalar types this type refers to, excluding itself.
    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter(|f| !f.is_scalar() && f.ty != self.name)
            .map(|f| f.ty.as_str())
            .collect()
    }

    /// Fields carrying a relation, in field order.
    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.relation.is_some())
    }
}

impl Named for ObjectType {
    fn name(&self) -> &str {
        &self.name
    }
}
