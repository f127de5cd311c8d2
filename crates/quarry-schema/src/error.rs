use crate::{directive::DirectiveLocation, position::SourcePosition};
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("{source_name}:{position}: {message} (argument \"{argument}\" of @{directive})")]
    Argument {
        source_name: String,
        position: SourcePosition,
        directive: String,
        argument: String,
        message: String,
    },

    #[error("{source_name}:{position}: directive \"@{directive}\" may not be used on {location}")]
    DirectiveLocation {
        source_name: String,
        position: SourcePosition,
        directive: String,
        location: DirectiveLocation,
    },

    #[error("{source_name}:{position}: directive \"@{directive}\" can only be used once at this location")]
    DuplicateDirective {
        source_name: String,
        position: SourcePosition,
        directive: String,
    },

    #[error("{source_name}:{position}: there can be only one type named \"{name}\"")]
    DuplicateType {
        source_name: String,
        position: SourcePosition,
        name: String,
    },

    #[error("failed to read schema '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("schema path '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("{source_name}:{position}: syntax error: {message}")]
    Syntax {
        source_name: String,
        position: SourcePosition,
        message: String,
    },

    #[error("{source_name}:{position}: unknown directive \"@{directive}\"")]
    UnknownDirective {
        source_name: String,
        position: SourcePosition,
        directive: String,
    },
}

impl SchemaError {
    /// Position of the offending token, for errors tied to a document.
    #[must_use]
    pub const fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::Argument { position, .. }
            | Self::DirectiveLocation { position, .. }
            | Self::DuplicateDirective { position, .. }
            | Self::DuplicateType { position, .. }
            | Self::Syntax { position, .. }
            | Self::UnknownDirective { position, .. } => Some(*position),
            Self::Io { .. } | Self::NotFound { .. } => None,
        }
    }
}
