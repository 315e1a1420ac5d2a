//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::record::Field;

/// Field values shared by `add` and `edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// First name
    #[arg(short = 'f', long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(short = 'l', long)]
    pub last_name: Option<String>,

    /// Phone number
    #[arg(short = 'p', long)]
    pub phone: Option<String>,
}

impl FieldArgs {
    /// The fields that were given on the command line.
    #[must_use]
    pub fn provided(&self) -> Vec<(Field, &str)> {
        [
            (Field::FirstName, self.first_name.as_deref()),
            (Field::LastName, self.last_name.as_deref()),
            (Field::Phone, self.phone.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Field values to set
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Listing position (1-based) or record id
    pub target: String,

    /// Resolve the position against this search instead of the full list
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field values to set
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Listing position (1-based) or record id
    pub target: String,

    /// Resolve the position against this search instead of the full list
    #[arg(short, long)]
    pub search: Option<String>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show records whose first or last name contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short = 'o', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
