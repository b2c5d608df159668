//! infinidat-tools - Infinidat host tools lifecycle agent
//!
//! Installs the Infinidat host power tools from an APT repository, runs the
//! vendor settings check and keeps multipath.conf and lvm.conf patched. Runs
//! as a Juju charm through `dispatch`, or by hand with the console runtime.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cli;
mod commands;
mod config;
mod error;
mod hooks;
mod host;
mod patch;
mod progress;
mod provision;
mod runtime;
mod tools;

use cli::{Cli, Commands};
use commands::Context;
use commands::hook::Event;
use error::Result;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout is reserved for command output
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let event = match &cli.command {
        Commands::Completions(args) => return commands::completions::run(args),
        Commands::Version => return commands::version::run(),
        Commands::Dispatch => return commands::dispatch::run(&mut Context::from_cli(cli)?),
        Commands::RunSettingsCheck(args) => {
            return commands::action::run_settings_check(
                &mut Context::from_cli(cli)?,
                args.auto_fix,
            );
        }
        Commands::Install => Event::Install,
        Commands::Start => Event::Start,
        Commands::ConfigChanged => Event::ConfigChanged,
        Commands::UpdateStatus => Event::UpdateStatus,
    };

    commands::hook::run(&mut Context::from_cli(cli)?, event)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
