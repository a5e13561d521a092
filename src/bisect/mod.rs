//! Automated `git bisect` sessions.
//!
//! The flow mirrors what a person would type by hand:
//! ```text
//! git fetch --all --tags --prune           // refresh history (unchecked)
//! git rev-parse HEAD                       // bad, unless BAD_HASH is set
//! git rev-list --max-parents=0 HEAD        // good, unless GOOD_HASH is set
//! git bisect start <bad> <good>
//! git bisect run <test command>
//! git rev-parse HEAD / git log -1 --oneline // best-effort report
//! git bisect log
//! git bisect reset                         // always, once started
//! ```
//!
//! The search itself belongs to git. This module only sequences the commands,
//! checks exit codes and guarantees the reset.

mod endpoints;
mod error;
mod orchestrator;
mod session;

use endpoints::Endpoints;

pub use orchestrator::Bisector;

pub(crate) const FETCH_CMD: &str = "git fetch --all --tags --prune";
pub(crate) const HEAD_CMD: &str = "git rev-parse HEAD";
pub(crate) const ROOTS_CMD: &str = "git rev-list --max-parents=0 HEAD";
pub(crate) const ONELINE_CMD: &str = "git log -1 --oneline";
pub(crate) const LOG_CMD: &str = "git bisect log";
pub(crate) const RESET_CMD: &str = "git bisect reset";

/// `git bisect start` command line for the given endpoints.
pub(crate) fn start_command(endpoints: &Endpoints) -> String {
    format!("git bisect start {} {}", endpoints.bad, endpoints.good)
}

/// `git bisect run` command line; the test command is spliced in verbatim so
/// the shell splits it into words.
pub(crate) fn run_command(test_cmd: &str) -> String {
    format!("git bisect run {}", test_cmd)
}
