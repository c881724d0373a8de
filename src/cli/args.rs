//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Collect translation keys from source and append new ones to locale files
//! - `init`: Initialize toolkit configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::locale::MergeMode;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Project root directory, defaults to the current directory
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Locale files directory (overrides config file)
    #[arg(long)]
    pub lang_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locale to update next to the primary locale (overrides config file)
    #[arg(short = 'L', long = "lang")]
    pub lang: Option<String>,

    /// How default values are derived for every locale
    /// (default: humanize for the primary locale, verbatim for the others)
    #[arg(long, value_enum)]
    pub mode: Option<MergeMode>,

    /// Report new keys without writing locale files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation keys from source files into locale files
    Extract(ExtractCommand),
    /// Initialize a new .toolkitrc.json configuration file
    Init,
}
