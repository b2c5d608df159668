//! `devices/global_filter` edit for lvm.conf
//!
//! The stock lvm.conf documents the option with a commented example:
//!
//! ```text
//! 	# global_filter = [ "a|.*|" ]
//! ```
//!
//! That line is the anchor. Our directive is kept on the line right after
//! it and tagged with [`SENTINEL`], so a later run can tell its own edit
//! apart from anything the administrator wrote:
//!
//! ```text
//! 	# global_filter = [ "a|.*|" ]
//! global_filter = [ "a|^/dev/sd.*|", "r|.*|" ] # __infinidat_tools__
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{self, Result};

/// Trailing comment marking a line as managed by this agent
pub const SENTINEL: &str = "__infinidat_tools__";

/// Pattern of the commented example directive used as anchor
pub const ANCHOR_PATTERN: &str = r"# global_filter = \[[^\n]*\n";

#[allow(clippy::expect_used)]
static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANCHOR_PATTERN).expect("anchor regex should be valid"));

/// lvm.conf split around the first anchor line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LvmConf<'a> {
    /// Everything up to and including the anchor line
    head: &'a str,
    /// Our marked line following the anchor, without its newline
    marked: Option<&'a str>,
    /// Everything after the anchor (and after the marked line, if any)
    rest: &'a str,
}

impl<'a> LvmConf<'a> {
    /// Split `contents` at the first anchor line; `None` when there is none
    pub fn parse(contents: &'a str) -> Option<Self> {
        let anchor = ANCHOR.find(contents)?;
        let (head, tail) = contents.split_at(anchor.end());

        let (first_line, after) = match tail.split_once('\n') {
            Some((line, after)) => (line, after),
            None => (tail, ""),
        };

        if first_line.contains(SENTINEL) {
            Some(Self {
                head,
                marked: Some(first_line),
                rest: after,
            })
        } else {
            Some(Self {
                head,
                marked: None,
                rest: tail,
            })
        }
    }

    /// The marked line currently in the file, if any
    pub fn marked_line(&self) -> Option<&'a str> {
        self.marked
    }

    /// Filter value of the marked line, if it has the shape we write
    pub fn marked_value(&self) -> Option<&'a str> {
        self.marked_line()?
            .strip_prefix("global_filter = ")?
            .strip_suffix(&format!(" # {SENTINEL}"))
    }

    /// Render the file with `value` as the managed filter
    ///
    /// An empty `value` drops the marked line instead of writing an empty
    /// directive.
    pub fn render(&self, value: &str) -> String {
        let mut out = String::with_capacity(self.head.len() + self.rest.len() + value.len() + 40);
        out.push_str(self.head);
        if !value.is_empty() {
            out.push_str(&directive(value));
            out.push('\n');
        }
        out.push_str(self.rest);
        out
    }
}

/// The managed directive line for `value`, without newline
pub fn directive(value: &str) -> String {
    format!("global_filter = {value} # {SENTINEL}")
}

/// Apply `new_value` as the managed global filter of `contents`
///
/// Re-running with the same value leaves the output unchanged, a different
/// value replaces the previous marked line, and an empty value removes it.
/// Fails with `PatternNotFound` when the anchor line is missing.
pub fn set_global_filter(new_value: &str, contents: &str) -> Result<String> {
    let conf = LvmConf::parse(contents)
        .ok_or_else(|| error::patch::pattern_not_found("lvm.conf", ANCHOR_PATTERN))?;
    match conf.marked_value() {
        Some(old) if old == new_value => debug!("global_filter already set"),
        Some(old) => debug!("Replacing global_filter {}", old),
        None if conf.marked_line().is_some() => debug!("Replacing unrecognized managed line"),
        None => {}
    }
    Ok(conf.render(new_value))
}
