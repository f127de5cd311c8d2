use crate::{
    error::ModelError,
    model::{Field, Model, ModelType, ObjectType},
};
use std::collections::BTreeMap;

/// Check every `@derivedFrom` field on entities and interfaces.
///
/// The referenced field must exist on the target entity, must not itself be
/// derived and must point back at the declaring type. Shapes:
///
/// | derived | referenced | meaning      |
/// |---------|------------|--------------|
/// | list    | single     | one-to-many  |
/// | single  | single     | one-to-one   |
/// | list    | list       | many-to-many |
/// | single  | list       | rejected     |
///
/// Each owning field pairs with at most one derived field.
pub(crate) fn validate(model: &Model) -> Result<(), ModelError> {
    for ty in model.entities().iter().chain(model.interfaces()) {
        let mut paired: BTreeMap<(&str, &str), &str> = BTreeMap::new();

        for field in &ty.fields {
            let Some(referenced) = &field.derived_from else {
                continue;
            };
            validate_field(model, ty, field, referenced)?;

            let key = (field.ty.as_str(), referenced.as_str());
            if let Some(first) = paired.insert(key, field.name.as_str()) {
                return Err(ModelError::InvalidDerivedFrom {
                    ty: ty.name.clone(),
                    field: field.name.clone(),
                    message: format!(
                        "'{}.{referenced}' is already derived by '{}.{first}'",
                        field.ty, ty.name
                    ),
                });
            }
        }
    }

    Ok(())
}

fn validate_field(
    model: &Model,
    ty: &ObjectType,
    field: &Field,
    referenced: &str,
) -> Result<(), ModelError> {
    let invalid = |message: String| ModelError::InvalidDerivedFrom {
        ty: ty.name.clone(),
        field: field.name.clone(),
        message,
    };

    if field.model_type != Some(ModelType::Entity) {
        return Err(invalid(format!("'{}' is not an entity", field.ty)));
    }
    let target = model.lookup_entity(&field.ty)?;

    let Some(other) = target.field(referenced) else {
        return Err(invalid(format!(
            "field '{referenced}' does not exist on '{}'",
            target.name
        )));
    };
    let other_path = format!("{}.{}", target.name, other.name);

    if other.is_derived() {
        return Err(invalid(format!(
            "'{other_path}' is itself derived and cannot be referenced"
        )));
    }
    if other.ty != ty.name {
        return Err(invalid(format!(
            "'{other_path}' has type '{}', expected '{}'",
            other.ty, ty.name
        )));
    }
    if !field.list && other.list {
        return Err(invalid(format!(
            "'{other_path}' is a list, so '{}.{}' must be a list too",
            ty.name, field.name
        )));
    }

    Ok(())
}
