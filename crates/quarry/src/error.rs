use quarry_config::ConfigError;
use quarry_model::ModelError;
use quarry_schema::SchemaError;
use thiserror::Error as ThisError;

///
/// Error
/// Any failure of a compile run, by the stage that raised it.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl Error {
    /// Short stage label, used by front ends when reporting.
    #[must_use]
    pub const fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Model(_) => "model",
            Self::Schema(_) => "schema",
        }
    }
}
