use crate::{
    error::{ItemKind, ModelError},
    model::{Model, ModelType},
};

/// Variants are plain value types: no entity or interface references, and
/// unions may only list declared variants.
pub(crate) fn validate(model: &Model) -> Result<(), ModelError> {
    // Phase 1: variant fields
    for ty in model.variants() {
        if ty.is_entity {
            return Err(ModelError::InvalidVariant {
                ty: ty.name.clone(),
                message: "an entity cannot be a variant".to_string(),
            });
        }

        for field in &ty.fields {
            if let Some(mt @ (ModelType::Entity | ModelType::Interface)) = field.model_type {
                return Err(ModelError::InvalidVariant {
                    ty: ty.name.clone(),
                    message: format!(
                        "field '{}' references {} '{}'",
                        field.name,
                        match mt {
                            ModelType::Interface => ItemKind::Interface,
                            _ => ItemKind::Entity,
                        },
                        field.ty
                    ),
                });
            }
        }
    }

    // Phase 2: union members
    for union in model.unions() {
        for member in &union.members {
            if model.variants().contains(member) {
                continue;
            }
            if model.lookup_type(member).is_ok() {
                return Err(ModelError::InvalidVariant {
                    ty: member.clone(),
                    message: format!("union '{}' member is not a variant", union.name),
                });
            }

            return Err(ModelError::UndefinedType {
                name: member.clone(),
                context: format!("union '{}'", union.name),
            });
        }
    }

    Ok(())
}
