//! Turns a parsed [`Document`] into a [`Model`].
//!
//! Types are registered first and field types resolved in a second pass, so
//! forward references and cycles need no placeholders.

mod discriminator;
mod field;
mod fts;

use crate::{
    error::{ItemKind, ModelError},
    model::{Enum, EnumValue, Model, ObjectType, Union},
    relation,
    scalar::is_builtin_scalar,
    validate,
};
use quarry_schema::{DirectiveKind, Document, ObjectTypeDefinition};
use tracing::{debug, trace};

///
/// BuildOptions
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildOptions {
    /// Implicit identity field; never materialized on a type.
    pub id_field: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            id_field: "id".to_string(),
        }
    }
}

///
/// PendingField
/// A field whose type name is resolved once every registry is populated.
///

struct PendingField {
    kind: ItemKind,
    owner: String,
    field: String,
    ty: String,
}

///
/// ModelBuilder
///

pub struct ModelBuilder<'d> {
    document: &'d Document,
    options: BuildOptions,
    model: Model,
    pending: Vec<PendingField>,
}

impl<'d> ModelBuilder<'d> {
    #[must_use]
    pub fn new(document: &'d Document) -> Self {
        Self {
            document,
            options: BuildOptions::default(),
            model: Model::new(),
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Run every phase in order; the first failure aborts the build.
    pub fn build(mut self) -> Result<Model, ModelError> {
        // Phase 1: register declared types
        self.check_scalars()?;
        self.add_enums()?;
        self.add_interfaces()?;
        self.add_variants()?;
        self.add_unions()?;
        self.add_entities()?;
        self.add_json_types()?;
        self.link_implementers()?;
        debug!(
            entities = self.model.entities().len(),
            interfaces = self.model.interfaces().len(),
            variants = self.model.variants().len(),
            unions = self.model.unions().len(),
            enums = self.model.enums().len(),
            json_types = self.model.json_types().len(),
            "types registered"
        );

        // Phase 2: resolve field types against the complete registries
        self.resolve_fields()?;

        // Phase 3: full-text queries
        fts::add_queries(self.document, &mut self.model)?;
        debug!(queries = self.model.queries().len(), "full-text queries collected");

        // Phase 4: relations, bracketed by the checks that depend on them
        validate::derived::validate(&self.model)?;
        relation::generate(&mut self.model)?;
        validate::json::validate(&self.model)?;
        validate::variant::validate(&self.model)?;
        validate::interface::validate(&self.model)?;

        // Phase 5: interface discriminators
        discriminator::add_discriminators(&mut self.model)?;

        Ok(self.model)
    }

    //
    // phase 1
    //

    fn check_scalars(&self) -> Result<(), ModelError> {
        for scalar in self.document.scalars() {
            if !is_builtin_scalar(&scalar.name) {
                return Err(ModelError::UnsupportedType {
                    ty: scalar.name.clone(),
                    field: String::new(),
                    message: "custom scalars are not supported".to_string(),
                });
            }
        }

        Ok(())
    }

    fn add_enums(&mut self) -> Result<(), ModelError> {
        let document = self.document;
        for def in document.enums() {
            self.model.add_enum(Enum {
                name: def.name.clone(),
                description: def.description.clone(),
                values: def
                    .values
                    .iter()
                    .map(|v| EnumValue {
                        name: v.name.clone(),
                        description: v.description.clone(),
                    })
                    .collect(),
                synthesized: false,
            })?;
        }

        Ok(())
    }

    fn add_interfaces(&mut self) -> Result<(), ModelError> {
        let document = self.document;
        for def in document.interfaces() {
            let mut ty = self.object_type(def, ItemKind::Interface)?;
            ty.is_interface = true;

            self.model.add_interface(ty)?;
        }

        Ok(())
    }

    fn add_variants(&mut self) -> Result<(), ModelError> {
        let document = self.document;
        for def in document.objects() {
            if !def.has_directive(DirectiveKind::Variant) {
                continue;
            }
            let ty = self.object_type(def, ItemKind::Variant)?;

            self.model.add_variant(ty)?;
        }

        Ok(())
    }

    fn add_unions(&mut self) -> Result<(), ModelError> {
        let document = self.document;
        for def in document.unions() {
            self.model.add_union(Union {
                name: def.name.clone(),
                description: def.description.clone(),
                members: def.members.clone(),
            })?;
        }

        Ok(())
    }

    fn add_entities(&mut self) -> Result<(), ModelError> {
        let document = self.document;
        for def in document.objects() {
            if !def.has_directive(DirectiveKind::Entity) {
                continue;
            }

            let interface = match def.implements.as_slice() {
                [] => None,
                [name] if self.model.interfaces().contains(name) => Some(name.clone()),
                [name] => {
                    return Err(ModelError::UndefinedType {
                        name: name.clone(),
                        context: format!("implements clause of '{}'", def.name),
                    });
                }
                many => {
                    return Err(ModelError::MultipleInterfaces {
                        ty: def.name.clone(),
                        interfaces: many.to_vec(),
                    });
                }
            };

            let mut ty = self.object_type(def, ItemKind::Entity)?;
            ty.interface = interface;

            self.model.add_entity(ty)?;
        }

        Ok(())
    }

    fn add_json_types(&mut self) -> Result<(), ModelError> {
        let document = self.document;
        for def in document.objects() {
            let is_json = def.has_directive(DirectiveKind::JsonField);
            let is_entity = def.has_directive(DirectiveKind::Entity);
            let is_variant = def.has_directive(DirectiveKind::Variant);

            if !is_json {
                if !is_entity && !is_variant {
                    debug!(ty = %def.name, "ignoring object type without @entity, @variant or @jsonField");
                }
                continue;
            }
            if is_entity || is_variant {
                return Err(ModelError::duplicate(ItemKind::JsonType, def.name.clone()));
            }

            let ty = self.object_type(def, ItemKind::JsonType)?;
            self.model.add_json_type(ty)?;
        }

        Ok(())
    }

    fn link_implementers(&mut self) -> Result<(), ModelError> {
        let links: Vec<(String, Vec<String>)> = self
            .model
            .interfaces()
            .iter()
            .map(|i| {
                let names = self
                    .model
                    .subclasses(&i.name)
                    .into_iter()
                    .map(|e| e.name.clone())
                    .collect();
                (i.name.clone(), names)
            })
            .collect();

        for (interface, implementers) in links {
            self.model.interface_mut(&interface)?.implementers = implementers;
        }

        Ok(())
    }

    // object_type
    // converts a type definition, queueing non-scalar fields for resolution
    fn object_type(
        &mut self,
        def: &ObjectTypeDefinition,
        kind: ItemKind,
    ) -> Result<ObjectType, ModelError> {
        let mut ty = ObjectType::new(def.name.clone());
        ty.description = def.description.clone();
        ty.is_entity = def.has_directive(DirectiveKind::Entity);
        ty.is_variant = def.has_directive(DirectiveKind::Variant);
        ty.is_json = def.has_directive(DirectiveKind::JsonField);

        for field_def in &def.fields {
            if field_def.name == self.options.id_field {
                continue;
            }

            let field = field::convert(&def.name, field_def)?;
            if field.model_type.is_none() {
                self.pending.push(PendingField {
                    kind,
                    owner: def.name.clone(),
                    field: field.name.clone(),
                    ty: field.ty.clone(),
                });
            }
            ty.fields.push(field);
        }

        Ok(ty)
    }

    //
    // phase 2
    //

    fn resolve_fields(&mut self) -> Result<(), ModelError> {
        let pending = std::mem::take(&mut self.pending);
        debug!(fields = pending.len(), "resolving field types");

        for p in pending {
            let model_type =
                self.model
                    .lookup_type(&p.ty)
                    .map_err(|_| ModelError::UndefinedType {
                        name: p.ty.clone(),
                        context: format!("field '{}.{}'", p.owner, p.field),
                    })?;

            let field = self
                .model
                .object_mut(p.kind, &p.owner)?
                .field_mut(&p.field)
                .ok_or_else(|| ModelError::FieldNotFound {
                    ty: p.owner.clone(),
                    field: p.field.clone(),
                })?;
            field.model_type = Some(model_type);

            trace!(owner = %p.owner, field = %p.field, ty = %p.ty, %model_type, "field resolved");
        }

        Ok(())
    }
}

/// Build a model from `document` with default options.
pub fn build_model(document: &Document) -> Result<Model, ModelError> {
    ModelBuilder::new(document).build()
}

#[cfg(test)]
mod tests;
