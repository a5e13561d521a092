mod args;
mod paths;

pub use args::Cli;
pub use paths::resolve_repo_root;
