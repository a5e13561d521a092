use std::fmt;

use tracing::debug;

use super::error::{BisectError, BisectResult};
use super::{HEAD_CMD, ROOTS_CMD};
use crate::shell::Shell;

/// The commit pair a bisect session runs between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub good: String,
    pub bad: String,
}

impl Endpoints {
    /// Build endpoints, rejecting empty or whitespace-only references.
    pub fn new(good: impl Into<String>, bad: impl Into<String>) -> BisectResult<Self> {
        let good = good.into().trim().to_string();
        let bad = bad.into().trim().to_string();
        if good.is_empty() || bad.is_empty() {
            return Err(BisectError::UnresolvedEndpoints);
        }
        Ok(Self { good, bad })
    }

    /// Resolve both endpoints, querying git only for the ones not overridden.
    pub async fn resolve<S: Shell>(
        shell: &S,
        bad_override: Option<&str>,
        good_override: Option<&str>,
    ) -> BisectResult<Self> {
        let bad = match bad_override {
            Some(bad) => bad.to_string(),
            None => shell.output(HEAD_CMD).await?,
        };

        let good = match good_override {
            Some(good) => good.to_string(),
            None => {
                let roots = shell.output(ROOTS_CMD).await?;
                // Repositories with merged histories have several roots
                roots
                    .lines()
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .unwrap_or_default()
                    .to_string()
            }
        };

        debug!("Resolved endpoints: good={:?} bad={:?}", good, bad);
        Self::new(good, bad)
    }
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "good={} and bad={}", self.good, self.bad)
    }
}
