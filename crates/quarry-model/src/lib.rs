//! The compiled schema model and the pipeline that builds it.
//!
//! [`ModelBuilder`] registers every declared type, resolves field types in a
//! second pass, collects full-text queries, infers relationships and runs the
//! consistency checks. The resulting [`Model`] is read-only to callers.

pub mod build;
pub mod error;
pub mod model;
pub mod scalar;

mod relation;
mod validate;

pub use build::{BuildOptions, ModelBuilder, build_model};
pub use error::{ItemKind, ModelError};
pub use model::{
    EntityRelationship, Enum, EnumValue, Field, FieldOrigin, FtsClause, FtsQuery, JoinTable,
    Model, ModelType, Named, ObjectType, Registry, Relation, RelationKind, Union,
};
pub use scalar::{BUILTIN_SCALARS, is_builtin_scalar};
