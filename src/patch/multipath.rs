//! Attribute overrides for multipath.conf

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Attributes forced to a fixed value, in application order
///
/// `skip_kpartx no` causes volumes to fail detaching.
pub const MULTIPATH_OVERRIDES: &[(&str, &str)] =
    &[("skip_kpartx", "yes"), ("user_friendly_names", "no")];

#[allow(clippy::expect_used)]
static OVERRIDE_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    MULTIPATH_OVERRIDES
        .iter()
        .map(|(name, value)| {
            let pattern = format!(r"(?m)({}[ \t]+).*$", regex::escape(name));
            let re = Regex::new(&pattern).expect("override regex should be valid");
            (re, *value)
        })
        .collect()
});

/// Force every known attribute in `contents` to its desired quoted value
///
/// Indentation and the attribute name are kept; other lines are untouched.
pub fn rewrite_attributes(contents: &str) -> String {
    let mut data = contents.to_string();
    for (re, value) in OVERRIDE_PATTERNS.iter() {
        data = re
            .replace_all(&data, |caps: &Captures| format!("{}\"{}\"", &caps[1], value))
            .into_owned();
    }
    data
}
