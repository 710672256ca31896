// ── Chunked copy with cumulative progress ────────────────────────────────────

use ftpwrap_core::{XferError, XferResult};
use std::io::{self, Read, Write};

pub(crate) const CHUNK_SIZE: usize = 32 * 1024;

/// Which side of a copy failed; uploads and downloads map these differently.
#[derive(Debug)]
pub(crate) enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

impl CopyError {
    /// Local read / remote write failure during an upload.
    pub(crate) fn into_upload_error(self, remote: &str) -> XferError {
        match self {
            CopyError::Read(e) => e.into(),
            CopyError::Write(e) => {
                XferError::operation_failed(format!("write to {} failed: {}", remote, e))
            }
        }
    }

    /// Remote read / local write failure during a download.
    pub(crate) fn into_download_error(self, remote: &str) -> XferError {
        match self {
            CopyError::Read(e) => {
                XferError::operation_failed(format!("read from {} failed: {}", remote, e))
            }
            CopyError::Write(e) => e.into(),
        }
    }
}

/// Copy until EOF, reporting the running total after every chunk.
pub(crate) fn copy_with_progress(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    mut progress: Option<&mut dyn FnMut(u64)>,
) -> Result<u64, CopyError> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut transferred: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer.write_all(&buf[..n]).map_err(CopyError::Write)?;
        transferred += n as u64;

        if let Some(cb) = progress.as_deref_mut() {
            cb(transferred);
        }
    }

    writer.flush().map_err(CopyError::Write)?;
    Ok(transferred)
}

/// Fail when the size the server reports differs from what was moved.
pub(crate) fn confirm_size(
    direction: &str,
    expected: u64,
    reported: Option<u64>,
) -> XferResult<()> {
    match reported {
        Some(size) if size == expected => Ok(()),
        Some(size) => Err(XferError::operation_failed(format!(
            "size mismatch in {}! {} != {}",
            direction, size, expected
        ))),
        None => Err(XferError::operation_failed(format!(
            "size mismatch in {}! server reported no size, expected {}",
            direction, expected
        ))),
    }
}
