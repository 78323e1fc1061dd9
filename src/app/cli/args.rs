//! Command-line arguments
//!
//! Global flags configure the connection and logging; the subcommands carry
//! their own inputs. `upload` mirrors the scan workflow (positional scan
//! files plus override/patch flags), `create-fields` provisions field
//! definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::artifact::api::IdentifierOverride;

#[derive(Parser, Debug, Clone)]
#[command(name = "scansync")]
#[command(about = "Upload offline scans and custom field values to an SCA server")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(
        short = 'C',
        long = "config-file",
        value_name = "FILE",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Server base URL (overrides the config file)
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", global = true, value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Force color output
    #[arg(long = "color", global = true, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable color output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Upload offline or dry-run scans, then apply custom field values to
    /// the mapped project-version
    Upload(UploadArgs),
    /// Create custom field definitions on the server
    CreateFields(CreateFieldsArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct UploadArgs {
    /// Scan files to upload (.json signature scans, .jsonld BOMs)
    #[arg(value_name = "SCAN_FILES", required = true)]
    pub scan_files: Vec<PathBuf>,

    /// JSON file with custom field values that go with the scan data
    #[arg(short = 'c', long = "custom-field-file", value_name = "FILE")]
    pub custom_field_file: Option<PathBuf>,

    /// Override the project name the scans are mapped to
    #[arg(short = 'p', long = "project", value_name = "NAME")]
    pub project: Option<String>,

    /// Override the version name the scans are mapped to
    #[arg(short = 'v', long = "version-name", value_name = "NAME")]
    pub version: Option<String>,

    /// Keep any temporary file(s) created - useful for debug
    #[arg(short = 'k', long = "keep-temp-files")]
    pub keep_temp_files: bool,

    /// Maximum project-version lookup attempts before giving up
    #[arg(long = "retry-attempts", value_name = "COUNT", value_parser = crate::core::validation::validate_positive_int)]
    pub retry_attempts: Option<usize>,

    /// Seconds to wait between lookup attempts
    #[arg(long = "retry-delay", value_name = "SECONDS")]
    pub retry_delay: Option<u64>,
}

impl UploadArgs {
    /// The identifier replacements requested on the command line
    pub fn identifier_override(&self) -> IdentifierOverride {
        IdentifierOverride::new(self.project.clone(), self.version.clone())
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct CreateFieldsArgs {
    /// JSON file with field definitions; the built-in set is used when omitted
    #[arg(short = 'd', long = "definitions-file", value_name = "FILE")]
    pub definitions_file: Option<PathBuf>,
}
