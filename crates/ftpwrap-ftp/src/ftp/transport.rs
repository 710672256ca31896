//! FTP capabilities used by [`FtpSession`](super::FtpSession).

use ftpwrap_core::{Credentials, SessionConfig, XferError, XferResult};
use log::info;
use std::io::{Read, Write};
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};

pub const FTP_PORT: u16 = 21;

const ANONYMOUS_USER: &str = "anonymous";
const ANONYMOUS_PASSWORD: &str = "anonymous@";

/// Operations of an open, logged-in FTP control connection.
///
/// Errors carry the transport's own message unchanged.
pub trait FtpTransport {
    fn cwd(&mut self, dir: &str) -> XferResult<()>;
    fn pwd(&mut self) -> XferResult<String>;
    /// NLST: bare names.
    fn nlst(&mut self, dir: Option<&str>) -> XferResult<Vec<String>>;
    /// LIST: one raw server line per entry.
    fn list(&mut self, dir: Option<&str>) -> XferResult<Vec<String>>;
    /// STOR `remote` from `reader`; returns bytes sent.
    fn store(&mut self, remote: &str, reader: &mut dyn Read) -> XferResult<u64>;
    /// RETR `remote` into `writer`; returns bytes received.
    fn retrieve(&mut self, remote: &str, writer: &mut dyn Write) -> XferResult<u64>;
    fn size(&mut self, path: &str) -> XferResult<u64>;
    fn delete(&mut self, path: &str) -> XferResult<()>;
    fn rename(&mut self, from: &str, to: &str) -> XferResult<()>;
    fn mkdir(&mut self, dir: &str) -> XferResult<()>;
    fn rmdir(&mut self, dir: &str) -> XferResult<()>;
    fn quit(&mut self) -> XferResult<()>;
}

fn op_err(e: FtpError) -> XferError {
    XferError::operation_failed(e.to_string())
}

impl FtpTransport for FtpStream {
    fn cwd(&mut self, dir: &str) -> XferResult<()> {
        FtpStream::cwd(self, dir).map_err(op_err)
    }

    fn pwd(&mut self) -> XferResult<String> {
        FtpStream::pwd(self).map_err(op_err)
    }

    fn nlst(&mut self, dir: Option<&str>) -> XferResult<Vec<String>> {
        FtpStream::nlst(self, dir).map_err(op_err)
    }

    fn list(&mut self, dir: Option<&str>) -> XferResult<Vec<String>> {
        FtpStream::list(self, dir).map_err(op_err)
    }

    fn store(&mut self, remote: &str, mut reader: &mut dyn Read) -> XferResult<u64> {
        self.put_file(remote, &mut reader).map_err(op_err)
    }

    fn retrieve(&mut self, remote: &str, writer: &mut dyn Write) -> XferResult<u64> {
        self.retr(remote, |stream| {
            std::io::copy(stream, &mut *writer).map_err(FtpError::ConnectionError)
        })
        .map_err(op_err)
    }

    fn size(&mut self, path: &str) -> XferResult<u64> {
        FtpStream::size(self, path).map(|n| n as u64).map_err(op_err)
    }

    fn delete(&mut self, path: &str) -> XferResult<()> {
        self.rm(path).map_err(op_err)
    }

    fn rename(&mut self, from: &str, to: &str) -> XferResult<()> {
        FtpStream::rename(self, from, to).map_err(op_err)
    }

    fn mkdir(&mut self, dir: &str) -> XferResult<()> {
        FtpStream::mkdir(self, dir).map_err(op_err)
    }

    fn rmdir(&mut self, dir: &str) -> XferResult<()> {
        FtpStream::rmdir(self, dir).map_err(op_err)
    }

    fn quit(&mut self) -> XferResult<()> {
        FtpStream::quit(self).map_err(op_err)
    }
}

/// USER / PASS pair sent at login.  A missing user logs in anonymously; a
/// missing password is empty, or `anonymous@` for the anonymous user.
pub(crate) fn login_pair(creds: &Credentials) -> (String, String) {
    let user = creds.user.as_deref().unwrap_or(ANONYMOUS_USER);
    let password = match creds.password.as_deref() {
        Some(p) => p,
        None if user == ANONYMOUS_USER => ANONYMOUS_PASSWORD,
        None => "",
    };
    (user.to_string(), password.to_string())
}

/// Connect the control channel, log in, and switch to binary transfers.
pub fn open(config: &SessionConfig, creds: &Credentials) -> XferResult<FtpStream> {
    let addr = config.socket_addr(FTP_PORT)?;
    info!("FTP connecting to {}", addr);

    let mut stream = FtpStream::connect(addr).map_err(|e| {
        XferError::connection_failed(format!("FTP connection to {} failed: {}", addr, e))
            .with_host(config.host.as_str())
    })?;

    let (user, password) = login_pair(creds);
    stream.login(user.as_str(), password.as_str()).map_err(|e| {
        XferError::auth_failed(format!("FTP login to {} as {} failed: {}", config.host, user, e))
            .with_host(config.host.as_str())
    })?;

    stream
        .transfer_type(FileType::Binary)
        .map_err(|e| XferError::connection_failed(e.to_string()).with_host(config.host.as_str()))?;

    info!("FTP logged in to {} as {}", config.host, user);
    Ok(stream)
}
