//! Command-line interface for contactbook.
//!
//! This module provides the CLI structure for the `cbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, FieldArgs, ListCommand, OutputFormat,
    StatusCommand,
};

/// cbook - Keep a small list of contacts
///
/// Add, edit, search and delete contact records (first name, last name,
/// phone). The list is saved after every change.
#[derive(Debug, Parser)]
#[command(name = "cbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new contact
    Add(AddCommand),

    /// Change fields of an existing contact
    Edit(EditCommand),

    /// Delete a contact
    Delete(DeleteCommand),

    /// List contacts, optionally filtered by name
    List(ListCommand),

    /// Fill in the contact form interactively
    Shell,

    /// Show storage status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
