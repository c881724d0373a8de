use crate::{error::Error, issues::Warning, pipeline::LocaleReport};

use super::super::exit_status::ExitStatus;

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub keys_found: usize,
    pub missing_roots: Vec<String>,
    pub locales: Vec<LocaleReport>,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running toolkit commands
#[derive(Debug)]
pub struct CommandResult {
    /// `None` when the run stopped on `failure`.
    pub summary: Option<CommandSummary>,
    pub warnings: Vec<Warning>,
    /// Source diagnostic that aborted the run before anything was written.
    pub failure: Option<Error>,
}

impl CommandResult {
    pub fn completed(summary: CommandSummary, warnings: Vec<Warning>) -> Self {
        Self {
            summary: Some(summary),
            warnings,
            failure: None,
        }
    }

    pub fn failed(failure: Error, warnings: Vec<Warning>) -> Self {
        Self {
            summary: None,
            warnings,
            failure: Some(failure),
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        match (&self.failure, &self.summary) {
            (Some(_), _) => ExitStatus::Failure,
            (None, Some(CommandSummary::Init(InitSummary { created: false }))) => {
                ExitStatus::Failure
            }
            _ => ExitStatus::Success,
        }
    }
}
