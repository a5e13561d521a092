use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::{status_code, Shell, ShellError, ShellResult};

/// Runs command lines through the platform shell inside a fixed directory.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    workdir: PathBuf,
}

impl ShellRunner {
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn command(&self, command: &str) -> Command {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        };

        // A dropped future (Ctrl-C) must not leave the child running
        cmd.current_dir(&self.workdir).kill_on_drop(true);
        cmd
    }

    fn spawn_error(command: &str, source: std::io::Error) -> ShellError {
        ShellError::Spawn {
            command: command.to_string(),
            source,
        }
    }
}

impl Shell for ShellRunner {
    async fn run(&self, command: &str) -> ShellResult<i32> {
        println!("+ {}", command);
        let _ = std::io::stdout().flush();

        let status = self
            .command(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Self::spawn_error(command, e))?;

        let code = status_code(&status);
        debug!("`{}` exited with code {}", command, code);
        Ok(code)
    }

    async fn output(&self, command: &str) -> ShellResult<String> {
        let output = self
            .command(command)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Self::spawn_error(command, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let combined = [stdout.as_str(), stderr.trim()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("\n");
            return Err(ShellError::Failed {
                command: command.to_string(),
                code: status_code(&output.status),
                output: combined,
            });
        }

        debug!("`{}` -> {:?}", command, stdout);
        Ok(stdout)
    }
}
