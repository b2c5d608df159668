//! CLI definitions using clap derive API
//!
//! One subcommand per lifecycle event, plus `dispatch` which picks the event
//! from `JUJU_DISPATCH_PATH` the way a charm's `dispatch` script is invoked.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::runtime::RuntimeKind;

pub mod completions;
pub mod settings_check;

pub use completions::CompletionsArgs;
pub use settings_check::SettingsCheckArgs;

/// Infinidat host tools lifecycle agent
#[derive(Parser, Debug)]
#[command(
    name = "infinidat-tools",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Prepare a host for Infinidat storage",
    long_about = "Installs the Infinidat host power tools, runs 'infinihost settings check' \
                  and keeps multipath.conf and lvm.conf in the shape the storage array needs. \
                  Runs as a Juju charm or by hand.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  infinidat-tools dispatch                          \x1b[90m# Handle the hook named by JUJU_DISPATCH_PATH\x1b[0m\n   \
                  infinidat-tools --settings host.yaml install      \x1b[90m# Run the install sequence by hand\x1b[0m\n   \
                  infinidat-tools config-changed                    \x1b[90m# Re-apply the lvm.conf filter\x1b[0m\n   \
                  infinidat-tools run-settings-check --auto-fix     \x1b[90m# Check and fix host settings\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Settings file (host paths, tool commands, console options)
    #[arg(long, short = 's', global = true, env = "INFINIDAT_TOOLS_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Where options come from and status goes to
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "auto",
        env = "INFINIDAT_TOOLS_RUNTIME"
    )]
    pub runtime: RuntimeKind,

    /// Unit name used in action results
    #[arg(
        long,
        global = true,
        env = "JUJU_UNIT_NAME",
        default_value = "infinidat-tools/0"
    )]
    pub unit_name: String,

    /// Model name used in action results
    #[arg(long, global = true, env = "JUJU_MODEL_NAME", default_value = "default")]
    pub model_name: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle the hook or action named by JUJU_DISPATCH_PATH
    Dispatch,

    /// Install packages and prepare the host
    Install,

    /// Report the unit status
    Start,

    /// Re-apply the lvm.conf global_filter
    ConfigChanged,

    /// Check mandatory options
    UpdateStatus,

    /// Run 'infinihost settings check' and keep its output
    RunSettingsCheck(SettingsCheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    #[command(hide = true)]
    Version,
}
