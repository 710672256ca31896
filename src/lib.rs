//! # ftpwrap
//!
//! Uniform `cd` / `ls` / `put` / `get` sessions over plaintext FTP and SFTP,
//! with login defaults taken from a netrc credentials file.
//!
//! - [`FtpSession`] — plaintext FTP over `suppaftp`; anonymous when no user
//!   is known.
//! - [`SftpSession`] — SFTP over `ssh2`; requires both user and password.
//! - [`resolve_credentials`] / [`parse_netrc`] — the credentials file.
//!
//! Every session optionally reports one line per operation to an
//! [`OperationLog`]; [`LogSink`] forwards those lines to the `log` facade.

pub use ftpwrap_core::{
    default_local_name, default_remote_name, Credentials, LogSink, OperationLog, SessionConfig,
    SharedLog, XferError, XferErrorKind, XferResult, LOG_PREFIX,
};
pub use ftpwrap_ftp::{FtpSession, FtpTransport, FTP_PORT};
pub use ftpwrap_netrc::{
    default_netrc_path, parse_netrc, parse_netrc_str, resolve_credentials, NetrcEntry, NetrcFile,
};
pub use ftpwrap_sftp::{
    Forwarded, RemoteStat, SftpSession, SftpTransport, Ssh2Transport, TransferOptions,
    FORWARDED_NAMES, RESERVED_NAMES, SFTP_PORT,
};
