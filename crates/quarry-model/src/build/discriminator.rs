use crate::{
    error::{ItemKind, ModelError},
    model::{Enum, EnumValue, Field, FieldOrigin, Model, ModelType},
};
use quarry_utils::{DISCRIMINATOR_FIELD, interface_enum_name};
use tracing::debug;

/// Give every interface an `<Interface>TypeOptions` enum of its implementers
/// and a non-null `type` field of that enum.
pub(super) fn add_discriminators(model: &mut Model) -> Result<(), ModelError> {
    let interfaces: Vec<(String, Vec<String>)> = model
        .interfaces()
        .iter()
        .map(|i| (i.name.clone(), i.implementers.clone()))
        .collect();

    for (interface, implementers) in interfaces {
        let enum_name = interface_enum_name(&interface);
        debug!(%interface, %enum_name, implementers = implementers.len(), "adding discriminator");

        model.add_enum(Enum {
            name: enum_name.clone(),
            description: Some(format!("Concrete types implementing {interface}")),
            values: implementers
                .into_iter()
                .map(|name| EnumValue {
                    name,
                    description: None,
                })
                .collect(),
            synthesized: true,
        })?;

        let ty = model.interface_mut(&interface)?;
        if ty.has_field(DISCRIMINATOR_FIELD) {
            return Err(ModelError::duplicate(
                ItemKind::Field,
                format!("{interface}.{DISCRIMINATOR_FIELD}"),
            ));
        }

        let mut field = Field::new(DISCRIMINATOR_FIELD, enum_name);
        field.model_type = Some(ModelType::Enum);
        field.nullable = false;
        field.origin = FieldOrigin::Discriminator;
        ty.fields.push(field);
    }

    Ok(())
}
