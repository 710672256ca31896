//! Name-based pass-through to SFTP client operations the session does not
//! wrap under its own name.

use super::session::SftpSession;
use super::transport::SftpTransport;
use super::types::RemoteStat;
use ftpwrap_core::{XferError, XferResult};

/// Session fields that are never reachable by name.
pub const RESERVED_NAMES: [&str; 2] = ["transport", "logger"];

/// Names [`SftpSession::forward`] accepts.
pub const FORWARDED_NAMES: [&str; 11] = [
    "stat", "lstat", "realpath", "normalize", "readlink", "symlink", "chmod", "remove", "unlink",
    "listdir", "getcwd",
];

/// Result of a forwarded call.
#[derive(Debug, Clone, PartialEq)]
pub enum Forwarded {
    Unit,
    Text(String),
    Names(Vec<String>),
    Stat(RemoteStat),
    /// `getcwd` before any `cd`.
    NoDirectory,
}

fn arity(name: &str, args: &[&str], expected: usize) -> XferError {
    XferError::invalid_argument(format!(
        "'{}' takes {} argument(s), got {}",
        name,
        expected,
        args.len()
    ))
}

fn parse_mode(raw: &str) -> XferResult<u32> {
    let digits = raw.strip_prefix("0o").unwrap_or(raw);
    u32::from_str_radix(digits, 8)
        .map_err(|e| XferError::invalid_argument(format!("bad mode '{}': {}", raw, e)))
}

impl<T: SftpTransport> SftpSession<T> {
    /// Invoke an SFTP client operation by name with string arguments.
    ///
    /// `transport` and `logger` fail with `AttributeNotAvailable`; names
    /// outside [`FORWARDED_NAMES`] fail with `UnsupportedOperation`.
    /// `chmod` takes its mode in octal (`"644"` or `"0o644"`).
    pub fn forward(&mut self, name: &str, args: &[&str]) -> XferResult<Forwarded> {
        if RESERVED_NAMES.contains(&name) {
            return Err(XferError::attribute_not_available(name));
        }
        if !FORWARDED_NAMES.contains(&name) {
            return Err(XferError::unsupported(name));
        }

        match (name, args) {
            ("stat", [path]) => self.stat(path).map(Forwarded::Stat),
            ("lstat", [path]) => self.lstat(path).map(Forwarded::Stat),
            ("realpath" | "normalize", [path]) => self.realpath(path).map(Forwarded::Text),
            ("readlink", [path]) => self.readlink(path).map(Forwarded::Text),
            ("symlink", [target, link]) => self.symlink(target, link).map(|_| Forwarded::Unit),
            ("chmod", [path, mode]) => {
                let mode = parse_mode(mode)?;
                self.chmod(path, mode).map(|_| Forwarded::Unit)
            }
            ("remove" | "unlink", [path]) => self.delete(path).map(|_| Forwarded::Unit),
            ("listdir", []) => self.ls("").map(Forwarded::Names),
            ("listdir", [dir]) => self.ls(dir).map(Forwarded::Names),
            ("getcwd", []) => {
                self.log(format_args!("getcwd"));
                Ok(match &self.cwd {
                    Some(cwd) => Forwarded::Text(cwd.clone()),
                    None => Forwarded::NoDirectory,
                })
            }
            ("symlink" | "chmod", _) => Err(arity(name, args, 2)),
            ("getcwd", _) => Err(arity(name, args, 0)),
            _ => Err(arity(name, args, 1)),
        }
    }
}
