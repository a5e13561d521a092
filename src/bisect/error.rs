use thiserror::Error;

use crate::shell::ShellError;

/// Exit code when neither endpoint override nor git query yields a commit
pub const EXIT_UNRESOLVED: u8 = 2;
/// Exit code when `git bisect start` fails
pub const EXIT_START_FAILED: u8 = 3;
/// Exit code after a Ctrl-C during the driven run
pub const EXIT_INTERRUPTED: u8 = 130;

/// Errors that end a bisect run before a report is produced
#[derive(Debug, Error)]
pub enum BisectError {
    /// No good or no bad commit could be determined
    #[error("GOOD_HASH or BAD_HASH could not be determined.")]
    UnresolvedEndpoints,
    /// `git bisect start` exited nonzero
    #[error("git bisect start failed with code {code}")]
    StartFailed { code: i32 },
    /// The driven run was interrupted by the user
    #[error("Interrupted while running git bisect")]
    Interrupted,
    /// A checked git command failed or could not be spawned
    #[error(transparent)]
    Shell(#[from] ShellError),
}

impl BisectError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BisectError::UnresolvedEndpoints => EXIT_UNRESOLVED,
            BisectError::StartFailed { .. } => EXIT_START_FAILED,
            BisectError::Interrupted => EXIT_INTERRUPTED,
            BisectError::Shell(e) => e.exit_code(),
        }
    }

    /// Print the error for the user on stderr.
    pub fn report(&self) {
        match self {
            BisectError::Shell(e) => e.report(),
            other => eprintln!("{}", other),
        }
    }
}

/// Result type for bisect operations
pub type BisectResult<T> = std::result::Result<T, BisectError>;
