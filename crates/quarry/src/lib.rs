//! ## Crate layout
//! - `config`: `quarry.toml` loading and validation.
//! - `model`: the compiled model, its builder and validators.
//! - `schema`: SDL lexer, parser, loader and directive walk.
//! - `utils`: deterministic naming helpers.
//!
//! The `compile_*` functions run the whole pipeline; `prelude` carries the
//! types most callers need to inspect the result.

pub use quarry_config as config;
pub use quarry_model as model;
pub use quarry_schema as schema;
pub use quarry_utils as utils;

mod error;

pub use error::Error;

use quarry_config::Config;
use quarry_model::{BuildOptions, Model, ModelBuilder};
use quarry_schema::{Document, load_paths, parse_document};
use std::path::Path;
use tracing::debug;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error,
        config::Config,
        model::{
            BuildOptions, EntityRelationship, Enum, Field, FieldOrigin, FtsQuery, ItemKind, Model,
            ModelError, ModelType, ObjectType, Relation, RelationKind, Union,
        },
        schema::{Document, SchemaError},
    };
}

/// Compile a single in-memory schema with default options.
pub fn compile_str(source: &str, source_name: &str) -> Result<Model, Error> {
    let document = parse_document(source, source_name)?;

    build(&document, BuildOptions::default())
}

/// Compile a schema file or directory with default options.
pub fn compile_path(path: impl AsRef<Path>) -> Result<Model, Error> {
    let document = quarry_schema::load_path(path)?;

    build(&document, BuildOptions::default())
}

/// Compile the schema paths named by `config`, with its model options.
pub fn compile_with(config: &Config) -> Result<Model, Error> {
    config.validate()?;

    let document = load_paths(&config.schema.paths, &config.schema.extensions)?;

    build(&document, config.build_options())
}

// build
fn build(document: &Document, options: BuildOptions) -> Result<Model, Error> {
    debug!(definitions = document.len(), id_field = %options.id_field, "compiling");
    let model = ModelBuilder::new(document).with_options(options).build()?;

    Ok(model)
}
