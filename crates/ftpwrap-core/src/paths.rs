//! Default file names for `put` / `get` when the other side is omitted.

use crate::error::{XferError, XferResult};
use std::path::{Path, PathBuf};

/// Remote name for an upload of `local`: its base name.
pub fn default_remote_name(local: &Path) -> XferResult<String> {
    local
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            XferError::invalid_argument(format!(
                "cannot derive a remote name from '{}'",
                local.display()
            ))
        })
}

/// Local path for a download of `remote`: its base name, relative to the
/// process working directory.  Remote paths always use `/`.
pub fn default_local_name(remote: &str) -> XferResult<PathBuf> {
    match remote.trim_end_matches('/').rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(PathBuf::from(name)),
        _ => Err(XferError::invalid_argument(format!(
            "cannot derive a local name from '{}'",
            remote
        ))),
    }
}
