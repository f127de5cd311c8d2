mod object;
mod registry;
mod relation;
mod types;

pub use object::{Field, FieldOrigin, ModelType, ObjectType};
pub use registry::{Named, Registry};
pub use relation::{EntityRelationship, JoinTable, Relation, RelationKind};
pub use types::{Enum, EnumValue, FtsClause, FtsQuery, Union};

use crate::{
    error::{ItemKind, ModelError},
    scalar::is_builtin_scalar,
};
use serde::Serialize;

///
/// Model
///
/// The compiled schema. Every collection keeps declaration order and is
/// unique by name within its own kind. Only the build pipeline can mutate
/// a model; everything downstream sees it read-only.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Model {
    entities: Registry<ObjectType>,
    interfaces: Registry<ObjectType>,
    variants: Registry<ObjectType>,
    unions: Registry<Union>,
    enums: Registry<Enum>,
    json_types: Registry<ObjectType>,
    queries: Registry<FtsQuery>,
    relationships: Vec<EntityRelationship>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // collections
    //

    #[must_use]
    pub const fn entities(&self) -> &Registry<ObjectType> {
        &self.entities
    }

    #[must_use]
    pub const fn interfaces(&self) -> &Registry<ObjectType> {
        &self.interfaces
    }

    #[must_use]
    pub const fn variants(&self) -> &Registry<ObjectType> {
        &self.variants
    }

    #[must_use]
    pub const fn unions(&self) -> &Registry<Union> {
        &self.unions
    }

    #[must_use]
    pub const fn enums(&self) -> &Registry<Enum> {
        &self.enums
    }

    #[must_use]
    pub const fn json_types(&self) -> &Registry<ObjectType> {
        &self.json_types
    }

    #[must_use]
    pub const fn queries(&self) -> &Registry<FtsQuery> {
        &self.queries
    }

    #[must_use]
    pub fn relationships(&self) -> &[EntityRelationship] {
        &self.relationships
    }

    //
    // lookups
    //

    pub fn lookup_entity(&self, name: &str) -> Result<&ObjectType, ModelError> {
        self.entities
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Entity, name))
    }

    pub fn lookup_interface(&self, name: &str) -> Result<&ObjectType, ModelError> {
        self.interfaces
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Interface, name))
    }

    pub fn lookup_variant(&self, name: &str) -> Result<&ObjectType, ModelError> {
        self.variants
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Variant, name))
    }

    pub fn lookup_union(&self, name: &str) -> Result<&Union, ModelError> {
        self.unions
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Union, name))
    }

    pub fn lookup_enum(&self, name: &str) -> Result<&Enum, ModelError> {
        self.enums
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Enum, name))
    }

    pub fn lookup_json_field(&self, name: &str) -> Result<&ObjectType, ModelError> {
        self.json_types
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::JsonType, name))
    }

    pub fn lookup_query(&self, name: &str) -> Result<&FtsQuery, ModelError> {
        self.queries
            .get(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Query, name))
    }

    /// Any object type (entity, interface, variant or JSON type) by name.
    pub fn lookup_object(&self, name: &str) -> Result<&ObjectType, ModelError> {
        self.entities
            .get(name)
            .or_else(|| self.interfaces.get(name))
            .or_else(|| self.variants.get(name))
            .or_else(|| self.json_types.get(name))
            .ok_or_else(|| ModelError::not_found(ItemKind::Type, name))
    }

    pub fn lookup_field(&self, type_name: &str, field: &str) -> Result<&Field, ModelError> {
        self.lookup_object(type_name)?
            .field(field)
            .ok_or_else(|| ModelError::FieldNotFound {
                ty: type_name.to_string(),
                field: field.to_string(),
            })
    }

    /// Classify a type name. Built-in scalars win over everything else.
    pub fn lookup_type(&self, name: &str) -> Result<ModelType, ModelError> {
        let ty = if is_builtin_scalar(name) {
            ModelType::Scalar
        } else if self.entities.contains(name) {
            ModelType::Entity
        } else if self.interfaces.contains(name) {
            ModelType::Interface
        } else if self.variants.contains(name) {
            ModelType::Variant
        } else if self.unions.contains(name) {
            ModelType::Union
        } else if self.enums.contains(name) {
            ModelType::Enum
        } else if self.json_types.contains(name) {
            ModelType::Json
        } else {
            return Err(ModelError::not_found(ItemKind::Type, name));
        };

        Ok(ty)
    }

    /// Entities implementing `interface`, in declaration order.
    #[must_use]
    pub fn subclasses(&self, interface: &str) -> Vec<&ObjectType> {
        self.entities
            .iter()
            .filter(|e| e.interface.as_deref() == Some(interface))
            .collect()
    }

    //
    // crate-private mutation
    //

    pub(crate) fn add_entity(&mut self, ty: ObjectType) -> Result<(), ModelError> {
        self.entities
            .insert(ty)
            .map_err(|ty| ModelError::duplicate(ItemKind::Entity, ty.name))
    }

    pub(crate) fn add_interface(&mut self, ty: ObjectType) -> Result<(), ModelError> {
        self.interfaces
            .insert(ty)
            .map_err(|ty| ModelError::duplicate(ItemKind::Interface, ty.name))
    }

    pub(crate) fn add_variant(&mut self, ty: ObjectType) -> Result<(), ModelError> {
        if ty.is_entity {
            return Err(ModelError::InvalidVariant {
                ty: ty.name,
                message: "an entity cannot be a variant".to_string(),
            });
        }

        self.variants
            .insert(ty)
            .map_err(|ty| ModelError::duplicate(ItemKind::Variant, ty.name))
    }

    pub(crate) fn add_json_type(&mut self, ty: ObjectType) -> Result<(), ModelError> {
        self.json_types
            .insert(ty)
            .map_err(|ty| ModelError::duplicate(ItemKind::JsonType, ty.name))
    }

    pub(crate) fn add_union(&mut self, union: Union) -> Result<(), ModelError> {
        self.unions
            .insert(union)
            .map_err(|u| ModelError::duplicate(ItemKind::Union, u.name))
    }

    pub(crate) fn add_enum(&mut self, e: Enum) -> Result<(), ModelError> {
        self.enums
            .insert(e)
            .map_err(|e| ModelError::duplicate(ItemKind::Enum, e.name))
    }

    /// Append a clause to query `query`, creating the query on first use.
    pub(crate) fn add_query_clause(&mut self, query: &str, entity: &str, field: &str) {
        let clause = FtsClause {
            entity: entity.to_string(),
            field: field.to_string(),
        };

        self.queries
            .get_or_insert_with(query, || FtsQuery {
                name: query.to_string(),
                clauses: Vec::new(),
            })
            .clauses
            .push(clause);
    }

    /// Append a synthesized field to entity `entity`.
    pub(crate) fn add_field(&mut self, entity: &str, field: Field) -> Result<(), ModelError> {
        let ty = self
            .entities
            .get_mut(entity)
            .ok_or_else(|| ModelError::not_found(ItemKind::Entity, entity))?;

        if ty.has_field(&field.name) {
            return Err(ModelError::duplicate(
                ItemKind::Field,
                format!("{entity}.{}", field.name),
            ));
        }
        ty.fields.push(field);

        Ok(())
    }

    pub(crate) fn entity_mut(&mut self, name: &str) -> Result<&mut ObjectType, ModelError> {
        self.entities
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Entity, name))
    }

    pub(crate) fn interface_mut(&mut self, name: &str) -> Result<&mut ObjectType, ModelError> {
        self.interfaces
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(ItemKind::Interface, name))
    }

    /// Mutable access to an object type in the registry for `kind`.
    pub(crate) fn object_mut(
        &mut self,
        kind: ItemKind,
        name: &str,
    ) -> Result<&mut ObjectType, ModelError> {
        let registry = match kind {
            ItemKind::Entity => &mut self.entities,
            ItemKind::Interface => &mut self.interfaces,
            ItemKind::Variant => &mut self.variants,
            ItemKind::JsonType => &mut self.json_types,
            _ => return Err(ModelError::not_found(kind, name)),
        };

        registry
            .get_mut(name)
            .ok_or_else(|| ModelError::not_found(kind, name))
    }

    pub(crate) fn push_relationship(&mut self, rel: EntityRelationship) {
        self.relationships.push(rel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str) -> ObjectType {
        ObjectType {
            is_entity: true,
            ..ObjectType::new(name)
        }
    }

    #[test]
    fn lookups_report_kind_and_name() {
        let model = Model::new();
        let err = model.lookup_entity("Post").unwrap_err();

        assert_eq!(err.to_string(), "entity 'Post' not found");
        assert!(matches!(
            model.lookup_union("Shape"),
            Err(ModelError::NotFound {
                kind: ItemKind::Union,
                ..
            })
        ));
    }

    #[test]
    fn lookup_type_classifies_every_kind() {
        let mut model = Model::new();
        model.add_entity(entity("Post")).unwrap();
        model
            .add_interface(ObjectType {
                is_interface: true,
                ..ObjectType::new("Event")
            })
            .unwrap();
        model
            .add_enum(Enum {
                name: "Status".into(),
                description: None,
                values: vec![],
                synthesized: false,
            })
            .unwrap();

        assert_eq!(model.lookup_type("BigInt").unwrap(), ModelType::Scalar);
        assert_eq!(model.lookup_type("Post").unwrap(), ModelType::Entity);
        assert_eq!(model.lookup_type("Event").unwrap(), ModelType::Interface);
        assert_eq!(model.lookup_type("Status").unwrap(), ModelType::Enum);
        assert!(model.lookup_type("Nope").is_err());
    }

    #[test]
    fn duplicate_names_within_a_kind_are_rejected() {
        let mut model = Model::new();
        model.add_entity(entity("Post")).unwrap();

        assert!(matches!(
            model.add_entity(entity("Post")),
            Err(ModelError::DuplicateName { .. })
        ));
    }

    #[test]
    fn entity_cannot_be_variant() {
        let mut model = Model::new();
        let err = model.add_variant(entity("Post")).unwrap_err();

        assert!(err.to_string().contains("an entity cannot be a variant"));
    }

    #[test]
    fn query_clauses_keep_insertion_order() {
        let mut model = Model::new();
        model.add_query_clause("search", "Post", "title");
        model.add_query_clause("search", "Author", "name");
        model.add_query_clause("search", "Post", "body");

        let q = model.lookup_query("search").unwrap();
        let fields: Vec<_> = q.clauses.iter().map(|c| c.field.as_str()).collect();

        assert_eq!(fields, vec!["title", "name", "body"]);
        assert_eq!(q.entities(), vec!["Post", "Author"]);
    }

    #[test]
    fn lookup_field_reports_missing_field() {
        let mut model = Model::new();
        model.add_entity(entity("Post")).unwrap();

        assert!(matches!(
            model.lookup_field("Post", "title"),
            Err(ModelError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn add_field_rejects_collisions() {
        let mut model = Model::new();
        model.add_entity(entity("Post")).unwrap();
        model.add_field("Post", Field::new("title", "String")).unwrap();

        assert!(matches!(
            model.add_field("Post", Field::new("title", "String")),
            Err(ModelError::DuplicateName {
                kind: ItemKind::Field,
                ..
            })
        ));
    }

    #[test]
    fn subclasses_follow_declaration_order() {
        let mut model = Model::new();
        for name in ["B", "A", "C"] {
            let mut e = entity(name);
            if name != "C" {
                e.interface = Some("Event".into());
            }
            model.add_entity(e).unwrap();
        }

        let names: Vec<_> = model
            .subclasses("Event")
            .into_iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
