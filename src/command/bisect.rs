use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, info};

use crate::bisect::Bisector;
use crate::cli::{self, Cli};
use crate::config::BisectConfig;
use crate::shell::ShellRunner;

/// Run one automated bisect session and map its outcome to an exit code.
pub async fn run_bisect(cli: &Cli) -> Result<ExitCode> {
    let repo_root = cli::resolve_repo_root(cli.repo.clone())?;
    let config = BisectConfig::from_cli(cli, repo_root);

    let shell = ShellRunner::new(&config.repo_root);
    debug!("Bisecting in {}", shell.workdir().display());
    debug!("Test command: {}", config.test_cmd);

    let bisector = Bisector::new(shell, config);

    let outcome = bisector.run().await;
    debug_assert!(!bisector.state().is_active());

    match outcome {
        Ok(report) => {
            info!(
                "Bisect of {} finished: run exit code {}, first bad commit {}",
                report.endpoints,
                report.run_exit_code,
                report
                    .first_bad
                    .as_ref()
                    .map(|c| c.hash.as_str())
                    .unwrap_or("unknown")
            );
            Ok(ExitCode::from(report.exit_code()))
        }
        Err(e) => {
            e.report();
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
