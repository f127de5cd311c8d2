//! Schema definition language front end.
//!
//! Turns annotated SDL text into a [`Document`], checking every directive
//! against the fixed [`DirectiveKind`] set, and offers a depth-first directive
//! walk for later stages.

pub mod ast;
pub mod directive;
pub mod error;
pub mod lexer;
pub mod loader;
pub mod position;
pub mod visit;

mod parser;

pub use ast::{
    Argument, ConstValue, Directive, Document, EnumTypeDefinition, EnumValueDefinition,
    FieldDefinition, ObjectTypeDefinition, ScalarTypeDefinition, TypeDefinition, TypeRef,
    UnionTypeDefinition,
};
pub use directive::{DirectiveKind, DirectiveLocation};
pub use error::SchemaError;
pub use loader::{DEFAULT_EXTENSIONS, load_path, load_paths, parse_document};
pub use position::SourcePosition;
pub use visit::{DirectiveVisitor, SchemaNode, Visitors, path_names};
