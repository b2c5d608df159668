use clap::Parser;

/// Arguments for the settings check action
#[derive(Parser, Debug, Default)]
pub struct SettingsCheckArgs {
    /// Let infinihost fix what it can and re-apply the multipath overrides
    ///
    /// Inside a Juju action the `auto-fix` action parameter is used as well.
    #[arg(long)]
    pub auto_fix: bool,
}
