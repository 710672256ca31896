// ── SFTP transport – capability set and the ssh2 implementation ─────────────

use super::types::RemoteStat;
use ftpwrap_core::{Credentials, SessionConfig, XferError, XferResult};
use log::{debug, info};
use ssh2::{FileStat, Session, Sftp};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;

pub const SFTP_PORT: u16 = 22;

const DEFAULT_DIR_MODE: i32 = 0o755;

/// Operations of an authenticated SFTP channel.  Paths are passed through
/// as given; the session resolves them against its working directory first.
pub trait SftpTransport {
    fn realpath(&mut self, path: &str) -> XferResult<String>;
    fn stat(&mut self, path: &str) -> XferResult<RemoteStat>;
    fn lstat(&mut self, path: &str) -> XferResult<RemoteStat>;
    /// Entries of `dir` as `(name, attributes)`, without `.` and `..`.
    fn readdir(&mut self, dir: &str) -> XferResult<Vec<(String, RemoteStat)>>;
    fn open_read(&mut self, path: &str) -> XferResult<Box<dyn Read>>;
    /// Create or truncate `path` for writing.
    fn open_write(&mut self, path: &str) -> XferResult<Box<dyn Write>>;
    fn mkdir(&mut self, dir: &str) -> XferResult<()>;
    fn rmdir(&mut self, dir: &str) -> XferResult<()>;
    fn unlink(&mut self, path: &str) -> XferResult<()>;
    fn rename(&mut self, from: &str, to: &str) -> XferResult<()>;
    fn readlink(&mut self, path: &str) -> XferResult<String>;
    /// Create `link` pointing at `target`.
    fn symlink(&mut self, target: &str, link: &str) -> XferResult<()>;
    fn chmod(&mut self, path: &str, mode: u32) -> XferResult<()>;
    fn close(&mut self) -> XferResult<()>;
}

/// An `ssh2` session with its SFTP subsystem open.
pub struct Ssh2Transport {
    session: Session,
    sftp: Sftp,
    _tcp: TcpStream,
}

impl Ssh2Transport {
    /// The underlying SFTP channel, for operations the trait does not cover.
    pub fn sftp(&self) -> &Sftp {
        &self.sftp
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

fn op_err(e: ssh2::Error) -> XferError {
    XferError::operation_failed(e.to_string())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl SftpTransport for Ssh2Transport {
    fn realpath(&mut self, path: &str) -> XferResult<String> {
        self.sftp
            .realpath(Path::new(path))
            .map(|p| path_string(&p))
            .map_err(op_err)
    }

    fn stat(&mut self, path: &str) -> XferResult<RemoteStat> {
        self.sftp.stat(Path::new(path)).map(Into::into).map_err(op_err)
    }

    fn lstat(&mut self, path: &str) -> XferResult<RemoteStat> {
        self.sftp.lstat(Path::new(path)).map(Into::into).map_err(op_err)
    }

    fn readdir(&mut self, dir: &str) -> XferResult<Vec<(String, RemoteStat)>> {
        let entries = self.sftp.readdir(Path::new(dir)).map_err(op_err)?;
        Ok(entries
            .into_iter()
            .filter_map(|(path, stat)| {
                let name = path.file_name()?.to_string_lossy().into_owned();
                (name != "." && name != "..").then(|| (name, stat.into()))
            })
            .collect())
    }

    fn open_read(&mut self, path: &str) -> XferResult<Box<dyn Read>> {
        let file = self.sftp.open(Path::new(path)).map_err(op_err)?;
        Ok(Box::new(file))
    }

    fn open_write(&mut self, path: &str) -> XferResult<Box<dyn Write>> {
        let file = self.sftp.create(Path::new(path)).map_err(op_err)?;
        Ok(Box::new(file))
    }

    fn mkdir(&mut self, dir: &str) -> XferResult<()> {
        self.sftp.mkdir(Path::new(dir), DEFAULT_DIR_MODE).map_err(op_err)
    }

    fn rmdir(&mut self, dir: &str) -> XferResult<()> {
        self.sftp.rmdir(Path::new(dir)).map_err(op_err)
    }

    fn unlink(&mut self, path: &str) -> XferResult<()> {
        self.sftp.unlink(Path::new(path)).map_err(op_err)
    }

    fn rename(&mut self, from: &str, to: &str) -> XferResult<()> {
        self.sftp
            .rename(Path::new(from), Path::new(to), None)
            .map_err(op_err)
    }

    fn readlink(&mut self, path: &str) -> XferResult<String> {
        self.sftp
            .readlink(Path::new(path))
            .map(|p| path_string(&p))
            .map_err(op_err)
    }

    fn symlink(&mut self, target: &str, link: &str) -> XferResult<()> {
        self.sftp
            .symlink(Path::new(link), Path::new(target))
            .map_err(op_err)
    }

    fn chmod(&mut self, path: &str, mode: u32) -> XferResult<()> {
        let stat = FileStat {
            size: None,
            uid: None,
            gid: None,
            perm: Some(mode),
            atime: None,
            mtime: None,
        };
        self.sftp.setstat(Path::new(path), stat).map_err(op_err)
    }

    fn close(&mut self) -> XferResult<()> {
        self.session
            .disconnect(None, "Client disconnecting", None)
            .map_err(op_err)
    }
}

/// Open TCP, run the SSH handshake and authenticate with a password.
///
/// `creds` must be complete; the session checks that before calling here.
pub fn open(config: &SessionConfig, creds: &Credentials) -> XferResult<Ssh2Transport> {
    let (Some(user), Some(password)) = (creds.user.as_deref(), creds.password.as_deref()) else {
        return Err(XferError::missing_credentials(&config.host));
    };

    let addr = config.socket_addr(SFTP_PORT)?;
    info!("SFTP connecting to {}", addr);

    let conn_err =
        |msg: String| XferError::connection_failed(msg).with_host(config.host.as_str());

    let tcp = TcpStream::connect_timeout(&addr, config.timeout())
        .map_err(|e| conn_err(format!("TCP connection to {} failed: {}", addr, e)))?;
    tcp.set_nonblocking(false)
        .map_err(|e| conn_err(format!("Failed to set blocking mode: {}", e)))?;

    let mut session =
        Session::new().map_err(|e| conn_err(format!("Failed to create SSH session: {}", e)))?;
    session.set_tcp_stream(tcp.try_clone().map_err(|e| conn_err(e.to_string()))?);
    session
        .handshake()
        .map_err(|e| conn_err(format!("SSH handshake failed: {}", e)))?;

    session.userauth_password(user, password).map_err(|e| {
        XferError::auth_failed(format!("Authentication failed: {}", e))
            .with_host(config.host.as_str())
    })?;
    if !session.authenticated() {
        return Err(XferError::auth_failed(
            "Authentication failed – not authenticated after auth attempt",
        )
        .with_host(config.host.as_str()));
    }
    info!("SFTP authenticated to {} as {}", addr, user);

    let sftp = session
        .sftp()
        .map_err(|e| conn_err(format!("Failed to open SFTP channel: {}", e)))?;
    debug!("SFTP subsystem open on {}", addr);

    Ok(Ssh2Transport {
        session,
        sftp,
        _tcp: tcp,
    })
}

/// Join `path` onto the tracked working directory.  Absolute paths, and any
/// path while no directory is tracked, pass through unchanged.
pub(crate) fn resolve_remote(cwd: Option<&str>, path: &str) -> String {
    match cwd {
        _ if path.starts_with('/') => path.to_string(),
        None if path.is_empty() => ".".to_string(),
        None => path.to_string(),
        Some(cwd) if path.is_empty() || path == "." => cwd.to_string(),
        Some(cwd) => format!("{}/{}", cwd.trim_end_matches('/'), path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sftp::SftpSession;

    /// Raw `ssh2` handles are reachable from a session for anything the
    /// facade does not wrap.
    fn raw_home_listing(session: &mut SftpSession) -> XferResult<(bool, usize)> {
        let transport = session.transport_mut()?;
        let authenticated = transport.session().authenticated();
        let entries = transport.sftp().readdir(Path::new(".")).map_err(op_err)?;
        Ok((authenticated, entries.len()))
    }

    #[test]
    fn raw_client_is_reachable_through_transport_mut() {
        let reach: fn(&mut SftpSession) -> XferResult<(bool, usize)> = raw_home_listing;
        let _ = reach;
    }

    #[test]
    fn absolute_paths_ignore_cwd() {
        assert_eq!(resolve_remote(Some("/home/u"), "/etc/x"), "/etc/x");
        assert_eq!(resolve_remote(None, "/etc/x"), "/etc/x");
    }

    #[test]
    fn relative_paths_join_cwd() {
        assert_eq!(resolve_remote(Some("/home/u"), "a.txt"), "/home/u/a.txt");
        assert_eq!(resolve_remote(Some("/"), "a.txt"), "/a.txt");
        assert_eq!(resolve_remote(Some("/home/u"), "."), "/home/u");
        assert_eq!(resolve_remote(Some("/home/u"), ""), "/home/u");
    }

    #[test]
    fn untracked_cwd_leaves_paths_to_the_server() {
        assert_eq!(resolve_remote(None, "a.txt"), "a.txt");
        assert_eq!(resolve_remote(None, ""), ".");
    }
}
