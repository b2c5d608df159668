//! Scoped read-transform-write of a config file

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{self, AgentError, Result};

/// Rewrite `path` with the output of `transform`
///
/// The file is read fully and transformed in memory. A failing transform
/// leaves the file untouched. Symlinks are followed, so the real file is
/// updated and the link stays in place. The new content goes to a temporary
/// file next to the real file which is then renamed over it with the
/// original permissions and owner, so readers see either the old or the new
/// content.
///
/// Returns whether the content changed; unchanged files are not rewritten.
pub fn patch_file<F>(path: &Path, transform: F) -> Result<bool>
where
    F: FnOnce(&str) -> Result<String>,
{
    let shown = path.display().to_string();
    let original = fs::read_to_string(path)
        .map_err(|e| error::fs::read_failed(shown.clone(), e.to_string()))?;

    let updated = transform(&original).map_err(|e| match e {
        AgentError::PatternNotFound { pattern, .. } => {
            error::patch::pattern_not_found(shown.clone(), pattern)
        }
        other => other,
    })?;

    if updated == original {
        debug!("{} already up to date", path.display());
        return Ok(false);
    }

    write_replace(path, updated.as_bytes())
        .map_err(|e| error::fs::write_failed(shown, e.to_string()))?;
    Ok(true)
}

fn write_replace(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let target = fs::canonicalize(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let metadata = fs::metadata(&target)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), metadata.permissions())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;

        let created = tmp.as_file().metadata()?;
        if (created.uid(), created.gid()) != (metadata.uid(), metadata.gid()) {
            std::os::unix::fs::fchown(tmp.as_file(), Some(metadata.uid()), Some(metadata.gid()))?;
        }
    }

    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
