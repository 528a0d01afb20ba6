use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, Job};

#[derive(Parser, Debug, Clone)]
#[command(name = "schema-batch")]
#[command(version = "0.1.0")]
#[command(about = "Validate a directory of JSON documents against a JSON Schema", long_about = None)]
pub struct Cli {
    /// Path to the schema to validate against
    #[arg(short, long, value_name = "FILE", conflicts_with = "config")]
    pub schema: Option<PathBuf>,

    /// Validate every .json file in this directory
    #[arg(short, long, value_name = "DIR", requires = "schema", conflicts_with = "file")]
    pub dir: Option<PathBuf>,

    /// Validate a single document
    #[arg(short, long, value_name = "FILE", requires = "schema")]
    pub file: Option<PathBuf>,

    /// Run the jobs listed in a YAML job file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Validate the job file and exit
    #[arg(long, requires = "config")]
    pub validate_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the config to run, reading the job file if one was given.
    pub fn to_config(&self) -> Result<Config, String> {
        if let Some(path) = &self.config {
            return Config::from_file(path);
        }

        let schema = self
            .schema
            .clone()
            .ok_or_else(|| "either --config or --schema is required".to_string())?;

        Ok(Config::single(Job {
            schema,
            dir: self.dir.clone(),
            file: self.file.clone(),
            fail_on_invalid: None,
        }))
    }
}
