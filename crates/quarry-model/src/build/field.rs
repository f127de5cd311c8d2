use crate::{
    error::ModelError,
    model::{Field, ModelType},
    scalar::is_builtin_scalar,
};
use quarry_schema::{DirectiveKind, FieldDefinition, TypeRef};

// convert
// scalars resolve immediately; every other type is left for the second pass
pub(super) fn convert(owner: &str, def: &FieldDefinition) -> Result<Field, ModelError> {
    if def.ty.list_depth() > 1 {
        return Err(ModelError::UnsupportedType {
            ty: owner.to_string(),
            field: def.name.clone(),
            message: format!("only one level of lists is supported, found {}", def.ty),
        });
    }

    let base = def.ty.base_name();
    let mut field = Field::new(def.name.clone(), base);

    field.nullable = !def.ty.is_non_null();
    if let TypeRef::List(inner) = def.ty.nullable() {
        field.list = true;
        field.item_nullable = !inner.is_non_null();
    }

    field.unique = def.has_directive(DirectiveKind::Unique);
    field.derived_from = def
        .directive(DirectiveKind::DerivedFrom)
        .and_then(|d| d.string_argument("field"))
        .map(str::to_string);
    field.description = def.description.clone();
    field.directives = def.directives.iter().map(|d| d.name.clone()).collect();

    if is_builtin_scalar(base) {
        field.model_type = Some(ModelType::Scalar);
    }

    Ok(field)
}
