//! # ftpwrap-sftp — secure transfer session
//!
//! A thin facade over an `ssh2` SFTP channel.  Logs in with a user and
//! password (explicit or from `~/.netrc`), tracks the working directory
//! client side, and exposes `cd`, `ls`, `ls_full`, `put`, `get`, `mkdir`,
//! `rename`, `delete` and `rmdir`, plus a name-based pass-through to the
//! rest of the SFTP client.

pub mod sftp;

pub use sftp::{
    Forwarded, RemoteStat, SftpSession, SftpTransport, Ssh2Transport, TransferOptions,
    FORWARDED_NAMES, RESERVED_NAMES, SFTP_PORT,
};
