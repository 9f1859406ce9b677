use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): command completed without warnings
/// - `Failure` (1): command completed, but the engine reported warnings
/// - `Error` (2): command failed (unreadable file, invalid config, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_warning_count(count: usize) -> Self {
        if count == 0 {
            Self::Success
        } else {
            Self::Failure
        }
    }
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
