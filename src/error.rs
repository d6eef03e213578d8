//! Exit codes.

/// Process outcomes and the status each one exits with.
///
/// - 0: success, including a clean ticker shutdown
/// - 1: anything that failed, each with its own code prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Completed normally.
    Success,
    /// An unexpected error occurred.
    GeneralError,
    /// The deletion confirmation could not be read.
    ConfirmationFailed,
    /// The ticker did not acknowledge shutdown in time.
    ShutdownTimedOut,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::GeneralError | Self::ConfirmationFailed | Self::ShutdownTimedOut => 1,
        }
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::ConfirmationFailed => "DS002",
            Self::ShutdownTimedOut => "DS003",
        }
    }
}
