//! External tool invocation
//!
//! Every external command is run synchronously to completion; there are no
//! timeouts and no cancellation.

pub mod infinihost;
pub mod system;

use std::path::Path;
use std::process::ExitStatus;

pub use infinihost::{OutputSink, SettingsCheck};

/// Exit code of `status`, or `-N` when the process was killed by signal `N`
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

/// Program and arguments joined for log lines
pub fn display_command(program: &Path, args: &[&str]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().map(|a| (*a).to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}
