// ── SftpSession – secure transfer facade ─────────────────────────────────────

use super::listing::long_line;
use super::transfer::{confirm_size, copy_with_progress};
use super::transport::{self, resolve_remote, SftpTransport, Ssh2Transport};
use super::types::{RemoteStat, TransferOptions};
use chrono::Utc;
use ftpwrap_core::oplog::emit;
use ftpwrap_core::{
    default_local_name, default_remote_name, Credentials, SessionConfig, SharedLog, XferError,
    XferResult,
};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// An authenticated SFTP channel to one host.
///
/// The working directory is tracked here, not on the server: `cd` resolves
/// and checks the target, and later relative paths are joined onto it.
pub struct SftpSession<T: SftpTransport = Ssh2Transport> {
    pub(crate) host: String,
    pub(crate) credentials: Credentials,
    pub(crate) transport: Option<T>,
    pub(crate) logger: Option<SharedLog>,
    pub(crate) cwd: Option<String>,
}

impl SftpSession<Ssh2Transport> {
    /// Resolve credentials, then connect and authenticate over `ssh2`.
    pub fn connect(config: &SessionConfig, logger: Option<SharedLog>) -> XferResult<Self> {
        Self::connect_with(config, logger, transport::open)
    }
}

impl<T: SftpTransport> SftpSession<T> {
    /// Like [`SftpSession::connect`] with a caller-supplied connector.  The
    /// connector only runs once both user and password are known.
    pub fn connect_with<F>(
        config: &SessionConfig,
        logger: Option<SharedLog>,
        open: F,
    ) -> XferResult<Self>
    where
        F: FnOnce(&SessionConfig, &Credentials) -> XferResult<T>,
    {
        let credentials = ftpwrap_netrc::resolve_credentials(
            &config.host,
            config.user.as_deref(),
            config.password.as_deref(),
            config.netrc_path.as_deref(),
        )?;
        if !credentials.is_complete() {
            return Err(XferError::missing_credentials(&config.host));
        }

        let transport = open(config, &credentials)?;
        Ok(Self::from_transport(&config.host, credentials, transport, logger))
    }

    /// Wrap an already authenticated transport.
    pub fn from_transport(
        host: &str,
        credentials: Credentials,
        transport: T,
        logger: Option<SharedLog>,
    ) -> Self {
        let session = Self {
            host: host.to_string(),
            credentials,
            transport: Some(transport),
            logger,
            cwd: None,
        };
        session.log(format_args!(
            "log in to {} as {}",
            session.host,
            session.credentials.display_user()
        ));
        session
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user(&self) -> Option<&str> {
        self.credentials.user.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Directory set by the last successful `cd`, if any.
    pub fn cwd(&self) -> Option<&str> {
        self.cwd.as_deref()
    }

    pub fn transport_mut(&mut self) -> XferResult<&mut T> {
        let host = self.host.as_str();
        self.transport
            .as_mut()
            .ok_or_else(|| XferError::disconnected(host))
    }

    /// Detach the connection without closing it; drop becomes a no-op.
    pub fn take_transport(&mut self) -> Option<T> {
        self.transport.take()
    }

    pub(crate) fn log(&self, args: std::fmt::Arguments<'_>) {
        emit(self.logger.as_ref(), args);
    }

    pub(crate) fn remote_path(&self, path: &str) -> String {
        resolve_remote(self.cwd.as_deref(), path)
    }

    // ── Directory operations ─────────────────────────────────────────────────

    /// Change the tracked working directory.  The target must exist and be
    /// a directory; on failure the previous directory is kept.
    pub fn cd(&mut self, dir: &str) -> XferResult<()> {
        self.log(format_args!("cd {}", dir));
        let target = self.remote_path(dir);
        let transport = self.transport_mut()?;
        let resolved = transport.realpath(&target)?;
        if !transport.stat(&resolved)?.is_dir() {
            return Err(XferError::operation_failed(format!(
                "{}: not a directory",
                resolved
            )));
        }
        self.cwd = Some(resolved);
        Ok(())
    }

    /// Names in `dir`; `""` lists the working directory.
    pub fn ls(&mut self, dir: &str) -> XferResult<Vec<String>> {
        self.log(format_args!("ls {}", dir));
        let target = self.remote_path(dir);
        let entries = self.transport_mut()?.readdir(&target)?;
        Ok(entries.into_iter().map(|(name, _)| name).collect())
    }

    /// One `ls -l` style line per entry of `dir`.
    pub fn ls_full(&mut self, dir: &str) -> XferResult<Vec<String>> {
        self.log(format_args!("ls_full {}", dir));
        let target = self.remote_path(dir);
        let entries = self.transport_mut()?.readdir(&target)?;
        let now = Utc::now();
        Ok(entries
            .iter()
            .map(|(name, stat)| long_line(name, stat, now))
            .collect())
    }

    pub fn mkdir(&mut self, dir: &str) -> XferResult<()> {
        self.log(format_args!("mkdir {}", dir));
        let target = self.remote_path(dir);
        self.transport_mut()?.mkdir(&target)
    }

    pub fn rmdir(&mut self, dir: &str) -> XferResult<()> {
        self.log(format_args!("rmdir {}", dir));
        let target = self.remote_path(dir);
        self.transport_mut()?.rmdir(&target)
    }

    pub fn rename(&mut self, old: &str, new: &str) -> XferResult<()> {
        self.log(format_args!("rename {} {}", old, new));
        let (from, to) = (self.remote_path(old), self.remote_path(new));
        self.transport_mut()?.rename(&from, &to)
    }

    pub fn delete(&mut self, path: &str) -> XferResult<()> {
        self.log(format_args!("delete {}", path));
        let target = self.remote_path(path);
        self.transport_mut()?.unlink(&target)
    }

    // ── Attribute and link operations ────────────────────────────────────────

    pub fn stat(&mut self, path: &str) -> XferResult<RemoteStat> {
        self.log(format_args!("stat {}", path));
        let target = self.remote_path(path);
        self.transport_mut()?.stat(&target)
    }

    pub fn lstat(&mut self, path: &str) -> XferResult<RemoteStat> {
        self.log(format_args!("lstat {}", path));
        let target = self.remote_path(path);
        self.transport_mut()?.lstat(&target)
    }

    pub fn realpath(&mut self, path: &str) -> XferResult<String> {
        self.log(format_args!("realpath {}", path));
        let target = self.remote_path(path);
        self.transport_mut()?.realpath(&target)
    }

    pub fn readlink(&mut self, path: &str) -> XferResult<String> {
        self.log(format_args!("readlink {}", path));
        let target = self.remote_path(path);
        self.transport_mut()?.readlink(&target)
    }

    /// Create `link` pointing at `target`.  `target` is stored as given.
    pub fn symlink(&mut self, target: &str, link: &str) -> XferResult<()> {
        self.log(format_args!("symlink {} {}", target, link));
        let link = self.remote_path(link);
        self.transport_mut()?.symlink(target, &link)
    }

    pub fn chmod(&mut self, path: &str, mode: u32) -> XferResult<()> {
        self.log(format_args!("chmod {} {:o}", path, mode));
        let target = self.remote_path(path);
        self.transport_mut()?.chmod(&target, mode)
    }

    // ── Transfers ────────────────────────────────────────────────────────────

    /// Upload `local` as `remote` (default: the local base name).
    pub fn put(&mut self, local: impl AsRef<Path>, remote: Option<&str>) -> XferResult<u64> {
        self.put_with(local, remote, TransferOptions::default())
    }

    /// [`put`](Self::put) with a progress callback and size confirmation.
    pub fn put_with(
        &mut self,
        local: impl AsRef<Path>,
        remote: Option<&str>,
        options: TransferOptions<'_>,
    ) -> XferResult<u64> {
        let local = local.as_ref();
        let remote = match remote {
            Some(r) => r.to_string(),
            None => default_remote_name(local)?,
        };
        self.log(format_args!("put {} as {}", local.display(), remote));

        let target = self.remote_path(&remote);
        let transport = self.transport_mut()?;
        let mut reader = BufReader::new(File::open(local)?);
        let mut writer = transport.open_write(&target)?;
        let sent = copy_with_progress(&mut reader, &mut writer, options.progress)
            .map_err(|e| e.into_upload_error(&target))?;
        drop(writer);

        if options.confirm {
            let reported = transport.stat(&target)?.size;
            confirm_size("put", sent, reported)?;
        }
        debug!("SFTP stored {} bytes to {}", sent, target);
        Ok(sent)
    }

    /// Download `remote` to `local` (default: the remote base name in the
    /// current local directory).
    pub fn get(&mut self, remote: &str, local: Option<&Path>) -> XferResult<u64> {
        self.get_with(remote, local, TransferOptions::default())
    }

    /// [`get`](Self::get) with a progress callback and size confirmation.
    pub fn get_with(
        &mut self,
        remote: &str,
        local: Option<&Path>,
        options: TransferOptions<'_>,
    ) -> XferResult<u64> {
        let local = match local {
            Some(l) => l.to_path_buf(),
            None => default_local_name(remote)?,
        };
        self.log(format_args!("get {} as {}", remote, local.display()));

        let source = self.remote_path(remote);
        let transport = self.transport_mut()?;
        let mut writer = BufWriter::new(File::create(&local)?);
        let mut reader = transport.open_read(&source)?;
        let received = copy_with_progress(&mut reader, &mut writer, options.progress)
            .map_err(|e| e.into_download_error(&source))?;
        drop(reader);

        if options.confirm {
            let reported = transport.stat(&source)?.size;
            confirm_size("get", received, reported)?;
        }
        debug!("SFTP retrieved {} bytes from {}", received, source);
        Ok(received)
    }

    // ── Close ────────────────────────────────────────────────────────────────

    /// Shut the channel down.  Later calls fail with `Disconnected`.
    pub fn close(&mut self) -> XferResult<()> {
        let Some(mut transport) = self.transport.take() else {
            return Err(XferError::disconnected(&self.host));
        };
        self.log(format_args!("close"));
        transport.close()?;
        info!("SFTP session to {} closed", self.host);
        Ok(())
    }
}

impl<T: SftpTransport> Drop for SftpSession<T> {
    fn drop(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport.close() {
                debug!("ignoring SFTP close failure for {}: {}", self.host, e);
            }
        }
    }
}
