use clap::Parser;

use crate::config::{BAD_HASH_ENV, GOOD_HASH_ENV, TEST_CMD_ENV};

/// Autobisect - run a whole git bisect session with a test command
#[derive(Parser, Debug)]
#[command(name = "autobisect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Known-bad commit (defaults to HEAD)
    #[arg(long, env = BAD_HASH_ENV)]
    pub bad: Option<String>,

    /// Known-good commit (defaults to the first root commit)
    #[arg(long, env = GOOD_HASH_ENV)]
    pub good: Option<String>,

    /// Shell command run on each visited commit (exit 0 = good)
    #[arg(long = "test-cmd", env = TEST_CMD_ENV)]
    pub test_cmd: Option<String>,

    /// Repository to bisect (auto-detects git root if absent)
    #[arg(short = 'C', long)]
    pub repo: Option<String>,

    /// Skip fetching remotes before resolving endpoints
    #[arg(long)]
    pub no_fetch: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
