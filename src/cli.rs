use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::generator::{script::DEFAULT_SCHEMA, ImportOptions};
use crate::import::ImportTarget;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(short, long, global = true, help = "Log progress (INFO level)")]
    pub verbose: bool,

    #[clap(short, long, global = true, help = "Log diagnostics (DEBUG level)")]
    pub debug: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the DDL for every feature class of a workspace definition
    Generate {
        #[clap(flatten)]
        source: Source,

        #[clap(short, long, help = "Write the script to a file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Print the statements and layer imports that loading a GeoPackage would run
    Plan {
        #[clap(flatten)]
        source: Source,

        #[clap(long, value_name = "GPKG", help = "The GeoPackage holding the feature data")]
        package: PathBuf,

        #[clap(long, value_name = "NAME", help = "The PostgreSQL connection to import into")]
        connection: String,

        #[clap(
            long,
            value_delimiter = ',',
            help = "Layers present in the package; all datasets are assumed present if omitted"
        )]
        layers: Option<Vec<String>>,

        #[clap(short, long, help = "Write the plan to a file instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct Source {
    #[clap(value_parser, help = "The XML workspace definition file or URL")]
    pub input: String,

    #[clap(long, default_value = DEFAULT_SCHEMA, help = "Target PostgreSQL schema")]
    pub schema: String,

    #[clap(long, help = "Do not drop existing tables before creating them")]
    pub no_drop: bool,

    #[clap(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,
}

impl Source {
    pub fn options(&self) -> ImportOptions {
        ImportOptions {
            schema: self.schema.clone(),
            drop_before_create: !self.no_drop,
        }
    }

    pub fn is_url(&self) -> bool {
        self.input.starts_with("http://") || self.input.starts_with("https://")
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0:?} is not an XML file")]
    NotXml(String),
    #[error("{0:?} is not a GeoPackage file")]
    NotGeoPackage(PathBuf),
    #[error("the target schema must not be empty")]
    EmptySchema,
}

pub fn validate_source(source: &Source) -> Result<(), ConfigError> {
    if source.schema.trim().is_empty() {
        return Err(ConfigError::EmptySchema);
    }
    if !source.is_url() && !has_extension(Path::new(&source.input), "xml") {
        return Err(ConfigError::NotXml(source.input.clone()));
    }
    Ok(())
}

pub fn import_target(package: PathBuf, connection: String) -> Result<ImportTarget, ConfigError> {
    if !has_extension(&package, "gpkg") {
        return Err(ConfigError::NotGeoPackage(package));
    }
    Ok(ImportTarget {
        package,
        connection,
    })
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
