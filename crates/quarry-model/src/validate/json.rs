use crate::{
    error::ModelError,
    model::{Model, ModelType},
};

/// JSON types embed by value, so they may only hold scalars, enums and
/// other JSON types.
pub(crate) fn validate(model: &Model) -> Result<(), ModelError> {
    for ty in model.json_types() {
        for field in &ty.fields {
            match field.model_type {
                Some(ModelType::Scalar | ModelType::Enum | ModelType::Json) => {}
                other => {
                    let kind = other.map_or_else(|| "unresolved".to_string(), |t| t.to_string());

                    return Err(ModelError::InvalidJsonField {
                        ty: ty.name.clone(),
                        field: field.name.clone(),
                        message: format!(
                            "'{}' resolves to {}; only scalars, enums and JSON types are allowed",
                            field.ty,
                            kind.to_lowercase()
                        ),
                    });
                }
            }
        }
    }

    Ok(())
}
