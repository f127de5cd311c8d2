use crate::{error::ModelError, model::Model};

/// Every implementer redeclares each interface field with the same type
/// name and list shape.
pub(crate) fn validate(model: &Model) -> Result<(), ModelError> {
    for entity in model.entities() {
        let Some(interface_name) = &entity.interface else {
            continue;
        };
        let interface = model.lookup_interface(interface_name)?;

        for expected in interface.fields.iter().filter(|f| f.is_declared()) {
            let invalid = |message: String| ModelError::InvalidInterface {
                ty: entity.name.clone(),
                interface: interface.name.clone(),
                message,
            };

            let Some(actual) = entity.field(&expected.name) else {
                return Err(invalid(format!("missing field '{}'", expected.name)));
            };

            if actual.ty != expected.ty || actual.list != expected.list {
                return Err(invalid(format!(
                    "field '{}' has type '{}{}', expected '{}{}'",
                    expected.name,
                    actual.ty,
                    if actual.list { "[]" } else { "" },
                    expected.ty,
                    if expected.list { "[]" } else { "" },
                )));
            }
        }
    }

    Ok(())
}
