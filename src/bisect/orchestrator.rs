use std::cell::Cell;

use tracing::{debug, info, warn};

use super::endpoints::Endpoints;
use super::error::{BisectError, BisectResult};
use super::session::{with_session, SessionState};
use super::{run_command, FETCH_CMD, HEAD_CMD, LOG_CMD, ONELINE_CMD};
use crate::config::BisectConfig;
use crate::shell::Shell;

/// Commit that git left checked out after the driven run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstBadCommit {
    pub hash: String,
    /// `git log -1 --oneline` for the commit
    pub summary: String,
}

/// Outcome of a completed bisect session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BisectReport {
    pub endpoints: Endpoints,
    /// Exit code of `git bisect run`
    pub run_exit_code: i32,
    /// Best-effort capture; `None` when the lookup failed
    pub first_bad: Option<FirstBadCommit>,
}

impl BisectReport {
    pub fn succeeded(&self) -> bool {
        self.run_exit_code == 0
    }

    /// Process exit code: 0 when the driven run succeeded, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}

/// Sequences one automated bisect run over a [`Shell`].
///
/// # Example
/// ```ignore
/// let bisector = Bisector::new(ShellRunner::new(&repo), config);
/// let report = bisector.run().await?;
/// std::process::exit(report.exit_code().into());
/// ```
pub struct Bisector<S: Shell> {
    shell: S,
    config: BisectConfig,
    state: Cell<SessionState>,
}

impl<S: Shell> Bisector<S> {
    pub fn new(shell: S, config: BisectConfig) -> Self {
        Self {
            shell,
            config,
            state: Cell::new(SessionState::NotStarted),
        }
    }

    #[cfg(test)]
    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Current session lifecycle state
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Fetch all remotes and tags; the result never stops the run.
    async fn refresh_history(&self) {
        match self.shell.run(FETCH_CMD).await {
            Ok(0) => debug!("History refreshed"),
            Ok(code) => warn!("{} exited with code {}, continuing", FETCH_CMD, code),
            Err(e) => warn!("{}, continuing", e),
        }
    }

    /// Resolve the good and bad commits, honouring configured overrides.
    pub async fn resolve_endpoints(&self) -> BisectResult<Endpoints> {
        Endpoints::resolve(
            &self.shell,
            self.config.bad.as_deref(),
            self.config.good.as_deref(),
        )
        .await
    }

    /// Let git drive the search with the test command; returns its exit code.
    ///
    /// Ctrl-C abandons the run (the child is killed) so the reset can still
    /// happen.
    async fn drive(&self) -> BisectResult<i32> {
        self.state.set(SessionState::Driving);
        let command = run_command(&self.config.test_cmd);

        tokio::select! {
            code = self.shell.run(&command) => {
                let code = code?;
                info!("git bisect run exited with code {}", code);
                Ok(code)
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                warn!("Interrupted, abandoning git bisect run");
                Err(BisectError::Interrupted)
            }
        }
    }

    /// Read the commit at HEAD. Failures are reported and swallowed.
    async fn capture_first_bad(&self) -> Option<FirstBadCommit> {
        let captured = async {
            let hash = self.shell.output(HEAD_CMD).await?;
            let summary = self.shell.output(ONELINE_CMD).await?;
            Ok::<_, crate::shell::ShellError>(FirstBadCommit { hash, summary })
        }
        .await;

        match captured {
            Ok(commit) => {
                println!("First bad commit: {}", commit.hash);
                println!("First bad commit (oneline): {}", commit.summary);
                Some(commit)
            }
            Err(e) => {
                e.report();
                debug!("First bad commit unavailable");
                None
            }
        }
    }

    /// Print the path the bisection took; diagnostic only.
    async fn show_log(&self) {
        match self.shell.run(LOG_CMD).await {
            Ok(0) => {}
            Ok(code) => debug!("{} exited with code {}", LOG_CMD, code),
            Err(e) => warn!("{}", e),
        }
    }

    /// Run the whole flow: refresh, resolve, start, drive, report, reset.
    pub async fn run(&self) -> BisectResult<BisectReport> {
        if self.config.fetch {
            self.refresh_history().await;
        } else {
            debug!("Skipping history refresh");
        }

        let endpoints = self.resolve_endpoints().await?;
        println!("Using {}", endpoints);

        let this = self;
        let (run_exit_code, first_bad) =
            with_session(&self.shell, &endpoints, &self.state, move || async move {
                let code = this.drive().await?;
                this.state.set(SessionState::Concluded);
                let first_bad = this.capture_first_bad().await;
                this.show_log().await;
                Ok((code, first_bad))
            })
            .await?;

        Ok(BisectReport {
            endpoints,
            run_exit_code,
            first_bad,
        })
    }
}
