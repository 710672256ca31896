//! # ftpwrap-netrc
//!
//! Reads a netrc-format credentials file (`machine` / `login` / `password` /
//! `account`) into a host-keyed mapping and uses it to fill in the login
//! fields a caller did not pass explicitly.

pub mod netrc;

pub use netrc::{
    default_netrc_path, parse_netrc, parse_netrc_str, resolve_credentials, NetrcEntry, NetrcFile,
};
