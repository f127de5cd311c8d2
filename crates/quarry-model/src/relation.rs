//! Relationship inference.
//!
//! Every relation is declared on one side only: a foreign-key field, or a list
//! of entities for many-to-many. This pass gives both sides their [`Relation`],
//! reusing an existing `@derivedFrom` counterpart or synthesizing an inverse
//! field on the target, and records one [`EntityRelationship`] per owning field.

use crate::{
    error::ModelError,
    model::{
        EntityRelationship, Field, FieldOrigin, JoinTable, Model, ModelType, Relation,
        RelationKind,
    },
};
use quarry_utils::{inverse_field_name, join_column_name, join_table_name, to_snake_case};
use std::collections::BTreeSet;
use tracing::{debug, trace};

///
/// OwningEdge
/// A declared entity-typed field without `@derivedFrom`.
///

struct OwningEdge {
    entity: String,
    field: String,
    target: String,
    list: bool,
    nullable: bool,
}

///
/// Counterpart
/// The field on the target that represents the other side.
///

struct Counterpart {
    name: String,
    list: bool,
    nullable: bool,
    synthesized: bool,
}

/// Infer relations for every concrete entity in `model`.
pub(crate) fn generate(model: &mut Model) -> Result<(), ModelError> {
    // Phase 1: snapshot owning edges in declaration order
    let edges = collect_edges(model);
    debug!(edges = edges.len(), "generating relationships");

    // Phase 2: attach both sides, one relationship per owning field
    let mut seen = BTreeSet::new();
    for edge in edges {
        if !seen.insert((edge.entity.clone(), edge.field.clone())) {
            continue;
        }
        link(model, &edge)?;
    }
    debug!(relationships = model.relationships().len(), "relationships generated");

    Ok(())
}

fn collect_edges(model: &Model) -> Vec<OwningEdge> {
    let mut edges = Vec::new();

    for entity in model.entities() {
        for field in &entity.fields {
            if !field.is_declared() || !field.is_entity_ref() || field.is_derived() {
                continue;
            }

            edges.push(OwningEdge {
                entity: entity.name.clone(),
                field: field.name.clone(),
                target: field.ty.clone(),
                list: field.list,
                nullable: field.nullable,
            });
        }
    }

    edges
}

fn link(model: &mut Model, edge: &OwningEdge) -> Result<(), ModelError> {
    let counterpart = find_counterpart(model, edge)?;

    // Owning side
    let owner_kind = match (edge.list, counterpart.list) {
        (true, _) => RelationKind::ManyToMany,
        (false, true) => RelationKind::ManyToOne,
        (false, false) => RelationKind::OneToOne,
    };
    let owner_relation = Relation {
        kind: owner_kind,
        nullable: edge.nullable,
        join_column: !edge.list,
        join_table: edge.list.then(|| join_table(edge)),
        related_entity: edge.target.clone(),
        related_field: counterpart.name.clone(),
    };

    // Inverse side
    let inverse_relation = Relation {
        kind: owner_kind.inverse(),
        nullable: counterpart.nullable,
        join_column: false,
        join_table: None,
        related_entity: edge.entity.clone(),
        related_field: edge.field.clone(),
    };

    if counterpart.synthesized {
        let mut field = Field::new(counterpart.name.clone(), edge.entity.clone());
        field.model_type = Some(ModelType::Entity);
        field.list = true;
        field.nullable = true;
        field.origin = FieldOrigin::Inverse;
        field.relation = Some(inverse_relation);

        trace!(
            target = %edge.target,
            field = %counterpart.name,
            owner = %edge.entity,
            "synthesized inverse field"
        );
        model.add_field(&edge.target, field)?;
    } else {
        set_relation(model, &edge.target, &counterpart.name, inverse_relation)?;
    }
    set_relation(model, &edge.entity, &edge.field, owner_relation)?;

    trace!(
        entity = %edge.entity,
        field = %edge.field,
        related = %edge.target,
        kind = %owner_kind,
        "relationship"
    );
    model.push_relationship(EntityRelationship {
        entity: edge.entity.clone(),
        field: edge.field.clone(),
        related_entity: edge.target.clone(),
        related_field: counterpart.name,
        kind: owner_kind,
    });

    Ok(())
}

// find_counterpart
// an existing field deriving from the edge, else the synthesized inverse
fn find_counterpart(model: &Model, edge: &OwningEdge) -> Result<Counterpart, ModelError> {
    let target = model.lookup_entity(&edge.target)?;

    let derived = target.fields.iter().find(|f| {
        f.derived_from.as_deref() == Some(edge.field.as_str()) && f.ty == edge.entity
    });

    let counterpart = match derived {
        Some(f) => Counterpart {
            name: f.name.clone(),
            list: f.list,
            nullable: f.nullable,
            synthesized: false,
        },
        None => Counterpart {
            name: inverse_field_name(&edge.entity, &edge.field),
            list: true,
            nullable: true,
            synthesized: true,
        },
    };

    Ok(counterpart)
}

fn set_relation(
    model: &mut Model,
    entity: &str,
    field: &str,
    relation: Relation,
) -> Result<(), ModelError> {
    let f = model
        .entity_mut(entity)?
        .field_mut(field)
        .ok_or_else(|| ModelError::FieldNotFound {
            ty: entity.to_string(),
            field: field.to_string(),
        })?;
    f.relation = Some(relation);

    Ok(())
}

fn join_table(edge: &OwningEdge) -> JoinTable {
    let join_column = join_column_name(&edge.entity);
    let mut inverse_join_column = join_column_name(&edge.target);

    // self-referencing many-to-many
    if inverse_join_column == join_column {
        inverse_join_column = format!("{}_id", to_snake_case(&edge.field));
    }

    JoinTable {
        table_name: join_table_name(&edge.entity, &edge.field),
        join_column,
        inverse_join_column,
    }
}
