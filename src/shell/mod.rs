//! Shell command execution.
//!
//! Every git invocation goes through the [`Shell`] trait as a plain command
//! line, the same text that is echoed to the user. Two flavours exist:
//! - `run`: echo the command, stream its output, hand back the exit code
//! - `output`: run quietly, capture stdout, treat a nonzero exit as an error
//!
//! [`ShellRunner`] is the real implementation; tests substitute a scripted one.

mod runner;

use std::process::ExitStatus;

use thiserror::Error;

pub use runner::ShellRunner;

/// Errors raised while executing a shell command
#[derive(Debug, Error)]
pub enum ShellError {
    /// The shell itself could not be started
    #[error("Failed to spawn command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// A checked command exited with a nonzero code
    #[error("Command failed with code {code}: {command}")]
    Failed {
        command: String,
        code: i32,
        output: String,
    },
}

impl ShellError {
    /// Process exit code to use when this error ends the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            ShellError::Spawn { .. } => 127,
            ShellError::Failed { code, .. } => clamp_exit_code(*code),
        }
    }

    /// Print the captured output and the failure line for the user.
    pub fn report(&self) {
        if let ShellError::Failed { output, .. } = self {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        eprintln!("{}", self);
    }
}

/// Result type for shell operations
pub type ShellResult<T> = std::result::Result<T, ShellError>;

/// Command execution seam used by the bisect orchestrator.
#[allow(async_fn_in_trait)]
pub trait Shell {
    /// Echo `command`, run it with inherited stdio and return its exit code.
    ///
    /// A nonzero exit is not an error here; only a failure to spawn is.
    async fn run(&self, command: &str) -> ShellResult<i32>;

    /// Run `command` and return its stdout with surrounding whitespace trimmed.
    ///
    /// A nonzero exit becomes [`ShellError::Failed`] carrying the captured output.
    async fn output(&self, command: &str) -> ShellResult<String>;
}

/// Exit code of a finished process; signal deaths map to `128 + signal`.
pub(crate) fn status_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}

/// Squeeze an arbitrary exit code into a nonzero process exit code.
pub fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
}
