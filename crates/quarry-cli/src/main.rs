//! `quarry`: compile annotated GraphQL schemas from the command line.
//!
//! Usage:
//!   quarry [--config quarry.toml] check [PATHS..]
//!   quarry model [PATHS..] [--pretty]
//!   quarry relations [PATHS..]
//!
//! Paths default to `schema.paths` from the config file.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use quarry::{
    compile_with,
    config::{Config, DEFAULT_CONFIG_FILE},
    model::Model,
};
use std::{io::Write as _, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Quarry schema compiler.
#[derive(Debug, Parser)]
#[command(name = "quarry", version, about = "Compile annotated GraphQL schemas into a persistence model")]
struct Cli {
    /// Path to the config file.
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile and report a summary.
    Check {
        /// Schema files or directories.
        paths: Vec<PathBuf>,
    },

    /// Compile and print the model as JSON.
    Model {
        /// Schema files or directories.
        paths: Vec<PathBuf>,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Compile and print one line per relationship.
    Relations {
        /// Schema files or directories.
        paths: Vec<PathBuf>,
    },
}

impl Command {
    fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Check { paths } | Self::Model { paths, .. } | Self::Relations { paths } => paths,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    // Initialize logging on stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.command.paths().is_empty() {
        config.schema.paths = cli.command.paths().to_vec();
    }
    info!(paths = ?config.schema.paths, "compiling schema");

    let model = compile_with(&config)?;

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Check { .. } => write_summary(&mut out, &model)?,
        Command::Model { pretty, .. } => {
            if pretty {
                serde_json::to_writer_pretty(&mut out, &model)?;
            } else {
                serde_json::to_writer(&mut out, &model)?;
            }
            writeln!(out)?;
        }
        Command::Relations { .. } => {
            for rel in model.relationships() {
                writeln!(
                    out,
                    "{}.{} -> {}.{} ({})",
                    rel.entity, rel.field, rel.related_entity, rel.related_field, rel.kind
                )?;
            }
        }
    }

    Ok(())
}

// write_summary
fn write_summary(out: &mut impl std::io::Write, model: &Model) -> std::io::Result<()> {
    writeln!(out, "entities:      {}", model.entities().len())?;
    writeln!(out, "interfaces:    {}", model.interfaces().len())?;
    writeln!(out, "variants:      {}", model.variants().len())?;
    writeln!(out, "unions:        {}", model.unions().len())?;
    writeln!(out, "enums:         {}", model.enums().len())?;
    writeln!(out, "json types:    {}", model.json_types().len())?;
    writeln!(out, "queries:       {}", model.queries().len())?;
    writeln!(out, "relationships: {}", model.relationships().len())?;

    Ok(())
}
