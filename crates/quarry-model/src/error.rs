use derive_more::Display;
use thiserror::Error as ThisError;

///
/// ItemKind
/// The namespace a model name lives in.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ItemKind {
    #[display("entity")]
    Entity,
    #[display("enum")]
    Enum,
    #[display("field")]
    Field,
    #[display("interface")]
    Interface,
    #[display("JSON type")]
    JsonType,
    #[display("query")]
    Query,
    #[display("type")]
    Type,
    #[display("union")]
    Union,
    #[display("variant")]
    Variant,
}

///
/// ModelError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum ModelError {
    #[error("{kind} '{name}' is already defined")]
    DuplicateName { kind: ItemKind, name: String },

    #[error("no field '{field}' on type '{ty}'")]
    FieldNotFound { ty: String, field: String },

    #[error("invalid @derivedFrom on '{ty}.{field}': {message}")]
    InvalidDerivedFrom {
        ty: String,
        field: String,
        message: String,
    },

    #[error("invalid @fulltext on '{ty}.{field}': {message}")]
    InvalidFullText {
        ty: String,
        field: String,
        message: String,
    },

    #[error("'{ty}' does not conform to interface '{interface}': {message}")]
    InvalidInterface {
        ty: String,
        interface: String,
        message: String,
    },

    #[error("invalid field '{ty}.{field}' on JSON type: {message}")]
    InvalidJsonField {
        ty: String,
        field: String,
        message: String,
    },

    #[error("invalid variant '{ty}': {message}")]
    InvalidVariant { ty: String, message: String },

    #[error("'{ty}' implements {} interfaces ({}), but at most one is allowed", interfaces.len(), interfaces.join(", "))]
    MultipleInterfaces { ty: String, interfaces: Vec<String> },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: ItemKind, name: String },

    #[error("type '{name}' is undefined (referenced by {context})")]
    UndefinedType { name: String, context: String },

    #[error("unsupported type for '{ty}.{field}': {message}")]
    UnsupportedType {
        ty: String,
        field: String,
        message: String,
    },
}

impl ModelError {
    pub(crate) fn not_found(kind: ItemKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub(crate) fn duplicate(kind: ItemKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}
