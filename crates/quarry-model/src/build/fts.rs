use crate::{error::ModelError, model::Model};
use quarry_schema::{DirectiveKind, Document, SchemaNode, Visitors};
use tracing::trace;

/// Collect every `@fulltext` occurrence into its named query.
pub(super) fn add_queries(document: &Document, model: &mut Model) -> Result<(), ModelError> {
    let mut visitor = |path: &[SchemaNode<'_>]| add_clause(model, path);

    document.walk(&mut Visitors::new().on(DirectiveKind::FullText, &mut visitor))
}

fn add_clause(model: &mut Model, path: &[SchemaNode<'_>]) -> Result<(), ModelError> {
    // @fulltext is only accepted on field definitions
    let [SchemaNode::Type(def), SchemaNode::Field(field_def), SchemaNode::Directive(directive)] =
        path
    else {
        return Ok(());
    };

    let ty = def.name();
    let invalid = |message: &str| ModelError::InvalidFullText {
        ty: ty.to_string(),
        field: field_def.name.clone(),
        message: message.to_string(),
    };

    let query = directive
        .string_argument("query")
        .ok_or_else(|| invalid("missing query name"))?;

    let entity = model
        .lookup_entity(ty)
        .map_err(|_| invalid("only entity fields can be searched"))?;
    let field = entity
        .field(&field_def.name)
        .ok_or_else(|| invalid("the identity field cannot be searched"))?;

    if field.list || field.ty != "String" {
        return Err(invalid("only non-list String fields can be searched"));
    }

    trace!(query, entity = ty, field = %field.name, "full-text clause");
    model.add_query_clause(query, ty, &field_def.name);

    Ok(())
}
