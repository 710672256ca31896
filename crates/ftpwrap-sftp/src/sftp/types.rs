// ── Types ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes of a remote file, as far as the server reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStat {
    pub size: Option<u64>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub perm: Option<u32>,
    pub atime: Option<u64>,
    pub mtime: Option<u64>,
}

const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFREG: u32 = 0o100000;
const S_IFLNK: u32 = 0o120000;

impl RemoteStat {
    pub fn is_dir(&self) -> bool {
        self.perm.map_or(false, |p| p & S_IFMT == S_IFDIR)
    }

    pub fn is_file(&self) -> bool {
        self.perm.map_or(false, |p| p & S_IFMT == S_IFREG)
    }

    pub fn is_symlink(&self) -> bool {
        self.perm.map_or(false, |p| p & S_IFMT == S_IFLNK)
    }
}

impl From<ssh2::FileStat> for RemoteStat {
    fn from(stat: ssh2::FileStat) -> Self {
        Self {
            size: stat.size,
            uid: stat.uid,
            gid: stat.gid,
            perm: stat.perm,
            atime: stat.atime,
            mtime: stat.mtime,
        }
    }
}

/// Extras for `put_with` / `get_with`.
///
/// `progress` is called after every chunk with the cumulative byte count.
/// `confirm` (default on) stats the remote file afterwards and fails the
/// transfer when its size differs from the bytes moved.
pub struct TransferOptions<'a> {
    pub progress: Option<&'a mut dyn FnMut(u64)>,
    pub confirm: bool,
}

impl<'a> TransferOptions<'a> {
    pub fn new() -> Self {
        Self {
            progress: None,
            confirm: true,
        }
    }

    pub fn progress(mut self, callback: &'a mut dyn FnMut(u64)) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }
}

impl Default for TransferOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransferOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferOptions")
            .field("progress", &self.progress.is_some())
            .field("confirm", &self.confirm)
            .finish()
    }
}
