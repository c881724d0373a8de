use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, possibly with warnings
/// - `Failure` (1): A source file or the project state prevented the command, nothing was written
/// - `Error` (2): Command failed due to internal error (I/O, config, invalid locale file)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
