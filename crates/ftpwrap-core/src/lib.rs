//! # ftpwrap-core
//!
//! Types shared by the plaintext and secure transfer sessions:
//! - `error` — categorised transfer error
//! - `config` — connection settings and resolved credentials
//! - `oplog` — per-operation logging sink
//! - `paths` — default local/remote file-name derivation

pub mod config;
pub mod error;
pub mod oplog;
pub mod paths;

pub use config::{Credentials, SessionConfig};
pub use error::{XferError, XferErrorKind, XferResult};
pub use oplog::{LogSink, OperationLog, SharedLog};
pub use paths::{default_local_name, default_remote_name};

/// Prefix every operation-log line starts with.
pub const LOG_PREFIX: &str = "ftpwrap";
