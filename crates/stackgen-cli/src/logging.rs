//! Diagnostics on stderr.
//!
//! The binary owns the one `tracing` subscriber; `stackgen-core` and
//! `stackgen-adapters` only emit events. `RUST_LOG` wins when it is set.
//! Otherwise our crates log at WARN, each `-v` raises them one level and
//! `--quiet` keeps errors only. Dependencies stay silent.

use std::io::IsTerminal as _;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::{LevelFilter, ParseError};

use crate::cli::GlobalArgs;

/// Targets raised by `-v`.
const OWN_TARGETS: [&str; 3] = ["stackgen", "stackgen_core", "stackgen_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => own_targets_at(level_for(args.verbose, args.quiet))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(args.verbose >= 3)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

fn own_targets_at(level: LevelFilter) -> Result<EnvFilter, ParseError> {
    let directives = OWN_TARGETS.map(|target| format!("{target}={level}"));
    EnvFilter::try_new(directives.join(","))
}
