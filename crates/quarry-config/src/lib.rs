//! Configuration for a Quarry run, read from `quarry.toml`.
//!
//! Every section is optional. A missing file behaves like an empty one.

use quarry_model::BuildOptions;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Conventional config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "quarry.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub schema: SchemaConfig,
    pub model: ModelConfig,
    pub log: LogConfig,
}

impl Config {
    /// Load and validate a config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schema.validate()?;
        self.model.validate()?;

        Ok(())
    }

    /// Options handed to the model builder.
    #[must_use]
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            id_field: self.model.id_field.clone(),
        }
    }
}

///
/// SchemaConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Schema files or directories, read in order.
    #[serde(default = "default_paths")]
    pub paths: Vec<PathBuf>,

    /// File extensions picked up when scanning a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl SchemaConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "schema.extensions must not be empty".to_string(),
            ));
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "schema.extensions contains a blank entry '{ext}'"
            )));
        }

        Ok(())
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            extensions: default_extensions(),
        }
    }
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("schema")]
}

// kept in step with the loader's DEFAULT_EXTENSIONS
fn default_extensions() -> Vec<String> {
    ["graphql", "gql"].iter().map(ToString::to_string).collect()
}

///
/// ModelConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Implicit identity field, stripped from every object type.
    #[serde(default = "default_id_field")]
    pub id_field: String,
}

impl ModelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.id_field.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "model.id_field must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
        }
    }
}

fn default_id_field() -> String {
    BuildOptions::default().id_field
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

///
/// TESTS
///
