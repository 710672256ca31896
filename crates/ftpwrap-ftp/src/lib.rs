//! # ftpwrap-ftp — plaintext FTP session
//!
//! A thin facade over `suppaftp::FtpStream`: resolves the login from
//! explicit values or `~/.netrc`, connects, and exposes `cd`, `ls`,
//! `ls_full`, `put`, `get` and friends with an optional per-operation log.

pub mod ftp;

pub use ftp::{FtpSession, FtpTransport, FTP_PORT};
