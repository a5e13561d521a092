use std::cell::Cell;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::{debug, info, warn};

use super::endpoints::Endpoints;
use super::error::{BisectError, BisectResult};
use super::{start_command, RESET_CMD};
use crate::shell::Shell;

/// Lifecycle of the git bisect state owned by one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotStarted,
    Started,
    Driving,
    Concluded,
    Reset,
}

impl SessionState {
    /// Whether git may hold bisect state that still needs a reset.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionState::Started | SessionState::Driving | SessionState::Concluded
        )
    }
}

/// Start a bisect session between `endpoints`, run `body` inside it, and
/// reset the session afterwards.
///
/// The reset runs exactly once whenever the start was attempted: after
/// `body` succeeds, after it returns an error, after it panics (the panic is
/// resumed once the reset is done), and after a failed start. `body` only
/// runs if the start succeeded; a start that cannot even be spawned counts
/// as a failed start.
pub async fn with_session<S, F, Fut, T>(
    shell: &S,
    endpoints: &Endpoints,
    state: &Cell<SessionState>,
    body: F,
) -> BisectResult<T>
where
    S: Shell,
    F: FnOnce() -> Fut,
    Fut: Future<Output = BisectResult<T>>,
{
    state.set(SessionState::Started);

    let outcome = match shell.run(&start_command(endpoints)).await {
        Ok(0) => {
            debug!("Bisect session started");
            AssertUnwindSafe(body()).catch_unwind().await
        }
        Ok(code) => Ok(Err(BisectError::StartFailed { code })),
        Err(e) => {
            warn!("{}", e);
            Ok(Err(BisectError::StartFailed {
                code: e.exit_code().into(),
            }))
        }
    };

    reset(shell).await;
    state.set(SessionState::Reset);

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Clear git's bisect state; failures are logged, never propagated.
async fn reset<S: Shell>(shell: &S) {
    match shell.run(RESET_CMD).await {
        Ok(0) => info!("Bisect state reset"),
        Ok(code) => warn!("git bisect reset exited with code {}", code),
        Err(e) => warn!("Failed to reset bisect state: {}", e),
    }
}
