// ── FtpSession – plaintext transfer facade ──────────────────────────────────

use super::transport::{self, FtpTransport};
use ftpwrap_core::oplog::emit;
use ftpwrap_core::{
    default_local_name, default_remote_name, Credentials, SessionConfig, SharedLog, XferError,
    XferResult,
};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use suppaftp::FtpStream;

/// An authenticated FTP connection to one host.
///
/// Every call logs `ftpwrap: <op> <args>` to the optional sink and then
/// delegates to the transport.  Dropping the session sends QUIT on a best
/// effort basis.
pub struct FtpSession<T: FtpTransport = FtpStream> {
    host: String,
    credentials: Credentials,
    transport: Option<T>,
    logger: Option<SharedLog>,
}

impl FtpSession<FtpStream> {
    /// Resolve credentials, connect and log in over `suppaftp`.
    pub fn connect(config: &SessionConfig, logger: Option<SharedLog>) -> XferResult<Self> {
        Self::connect_with(config, logger, transport::open)
    }
}

impl<T: FtpTransport> FtpSession<T> {
    /// Like [`FtpSession::connect`] but with a caller-supplied connector that
    /// receives the resolved credentials.
    pub fn connect_with<F>(
        config: &SessionConfig,
        logger: Option<SharedLog>,
        open: F,
    ) -> XferResult<Self>
    where
        F: FnOnce(&SessionConfig, &Credentials) -> XferResult<T>,
    {
        let mut credentials = ftpwrap_netrc::resolve_credentials(
            &config.host,
            config.user.as_deref(),
            config.password.as_deref(),
            config.netrc_path.as_deref(),
        )?;
        // a password only means something together with a user
        if credentials.user.is_none() {
            credentials.password = None;
        }

        let transport = open(config, &credentials)?;
        Ok(Self::from_transport(&config.host, credentials, transport, logger))
    }

    /// Wrap an already connected transport.
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

    /// Raw access to the underlying client for anything this facade does not wrap.
    pub fn transport_mut(&mut self) -> XferResult<&mut T> {
        let host = self.host.as_str();
        self.transport
            .as_mut()
            .ok_or_else(|| XferError::disconnected(host))
    }

    /// Detach the connection without closing it.
    pub fn take_transport(&mut self) -> Option<T> {
        self.transport.take()
    }

    fn log(&self, args: std::fmt::Arguments<'_>) {
        emit(self.logger.as_ref(), args);
    }

    // ── Directory operations ─────────────────────────────────────────────────

    /// Change the working directory.
    pub fn cd(&mut self, dir: &str) -> XferResult<()> {
        self.log(format_args!("cd {}", dir));
        self.transport_mut()?.cwd(dir)
    }

    pub fn pwd(&mut self) -> XferResult<String> {
        self.log(format_args!("pwd"));
        self.transport_mut()?.pwd()
    }

    /// Names in `dir` (NLST); `""` lists the working directory.
    pub fn ls(&mut self, dir: &str) -> XferResult<Vec<String>> {
        self.log(format_args!("ls {}", dir));
        self.transport_mut()?.nlst(non_empty(dir))
    }

    /// Raw LIST output for `dir`, one line per entry.
    pub fn ls_full(&mut self, dir: &str) -> XferResult<Vec<String>> {
        self.log(format_args!("ls_full {}", dir));
        self.transport_mut()?.list(non_empty(dir))
    }

    pub fn mkdir(&mut self, dir: &str) -> XferResult<()> {
        self.log(format_args!("mkdir {}", dir));
        self.transport_mut()?.mkdir(dir)
    }

    pub fn rmdir(&mut self, dir: &str) -> XferResult<()> {
        self.log(format_args!("rmdir {}", dir));
        self.transport_mut()?.rmdir(dir)
    }

    pub fn rename(&mut self, old: &str, new: &str) -> XferResult<()> {
        self.log(format_args!("rename {} {}", old, new));
        self.transport_mut()?.rename(old, new)
    }

    pub fn delete(&mut self, path: &str) -> XferResult<()> {
        self.log(format_args!("delete {}", path));
        self.transport_mut()?.delete(path)
    }

    pub fn size(&mut self, path: &str) -> XferResult<u64> {
        self.log(format_args!("size {}", path));
        self.transport_mut()?.size(path)
    }

    // ── Transfers ────────────────────────────────────────────────────────────

    /// Upload `local` as `remote` (default: the local base name).
    pub fn put(&mut self, local: impl AsRef<Path>, remote: Option<&str>) -> XferResult<u64> {
        let local = local.as_ref();
        let remote = match remote {
            Some(r) => r.to_string(),
            None => default_remote_name(local)?,
        };
        self.log(format_args!("put {} as {}", local.display(), remote));

        let transport = self.transport_mut()?;
        let mut reader = BufReader::new(File::open(local)?);
        let sent = transport.store(&remote, &mut reader)?;
        debug!("FTP stored {} bytes to {}", sent, remote);
        Ok(sent)
    }

    /// Download `remote` to `local` (default: the remote base name in the
    /// current directory).
    pub fn get(&mut self, remote: &str, local: Option<&Path>) -> XferResult<u64> {
        let local = match local {
            Some(l) => l.to_path_buf(),
            None => default_local_name(remote)?,
        };
        self.log(format_args!("get {} as {}", remote, local.display()));

        let transport = self.transport_mut()?;
        let mut writer = BufWriter::new(File::create(&local)?);
        let received = transport.retrieve(remote, &mut writer)?;
        writer.flush()?;
        debug!("FTP retrieved {} bytes from {}", received, remote);
        Ok(received)
    }

    // ── Close ────────────────────────────────────────────────────────────────

    /// Send QUIT and drop the connection.  Later calls fail with
    /// `Disconnected`.
    pub fn close(&mut self) -> XferResult<()> {
        let Some(mut transport) = self.transport.take() else {
            return Err(XferError::disconnected(&self.host));
        };
        self.log(format_args!("close"));
        transport.quit()?;
        info!("FTP session to {} closed", self.host);
        Ok(())
    }
}

impl<T: FtpTransport> Drop for FtpSession<T> {
    fn drop(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            if let Err(e) = transport.quit() {
                debug!("ignoring QUIT failure for {}: {}", self.host, e);
            }
        }
    }
}

fn non_empty(dir: &str) -> Option<&str> {
    if dir.is_empty() {
        None
    } else {
        Some(dir)
    }
}
