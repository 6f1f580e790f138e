//! cstatus - Powerline statusline for Claude Code sessions

use clap::Parser;
use cstatus::cli::{Cli, Command};
use cstatus::{Result, install, statusline};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str =
    "cstatus=debug,cstatus_core=debug,cstatus_transcript=debug,cstatus_terminal=debug";

/// Logs go to stderr; stdout carries only the statusline
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_env("CSTATUS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        None | Some(Command::Render) => statusline::run(&cli).await,
        Some(Command::Install(args)) => install::run(args),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
