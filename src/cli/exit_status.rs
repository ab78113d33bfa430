use std::process::ExitCode;

/// Exit status of a resxgen run.
///
/// - `Success` (0): every requested step completed
/// - `Failure` (1): the command declined part of its work, e.g. `init` over an
///   existing config or a wizard step that failed
/// - `Error` (2): the command aborted (invalid config, invalid source data, I/O)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` if any recoverable step failed.
    pub fn from_failed_steps(count: usize) -> Self {
        if count == 0 { Self::Success } else { Self::Failure }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        })
    }
}
