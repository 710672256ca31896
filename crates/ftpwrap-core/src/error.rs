//! Transfer-session error type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorised transfer error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XferError {
    pub kind: XferErrorKind,
    pub message: String,
    /// Remote host the failing session targets, if any.
    pub host: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum XferErrorKind {
    /// An explicitly requested credentials file could not be read.
    CredentialsFileNotFound,
    /// The secure variant could not resolve both user and password.
    MissingCredentials,
    /// TCP / DNS / handshake failure while connecting.
    ConnectionFailed,
    /// Login rejected by the server.
    AuthFailed,
    /// The transport rejected an operation on an open session.
    OperationFailed,
    /// Local file I/O failure.
    Io,
    /// A reserved facade name was requested through the pass-through path.
    AttributeNotAvailable,
    /// The pass-through path does not know the requested operation.
    UnsupportedOperation,
    /// Bad argument count, or a file name could not be derived.
    InvalidArgument,
    /// The session was already closed.
    Disconnected,
}

pub type XferResult<T> = Result<T, XferError>;

// ── Construction helpers ─────────────────────────────────────────────

impl XferError {
    pub fn new(kind: XferErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            host: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn is(&self, kind: XferErrorKind) -> bool {
        self.kind == kind
    }

    // ── Convenience constructors ─────────────────────────────────

    pub fn credentials_file_not_found(path: &str, cause: impl fmt::Display) -> Self {
        Self::new(
            XferErrorKind::CredentialsFileNotFound,
            format!("cannot read credentials file '{}': {}", path, cause),
        )
    }

    pub fn missing_credentials(host: &str) -> Self {
        Self::new(
            XferErrorKind::MissingCredentials,
            format!(
                "must provide both user and password (either directly or via .netrc) for host {}",
                host
            ),
        )
        .with_host(host)
    }

    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::new(XferErrorKind::ConnectionFailed, msg)
    }

    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::new(XferErrorKind::AuthFailed, msg)
    }

    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::new(XferErrorKind::OperationFailed, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(XferErrorKind::Io, msg)
    }

    pub fn attribute_not_available(name: &str) -> Self {
        Self::new(
            XferErrorKind::AttributeNotAvailable,
            format!("'{}' attr missing from ftpwrap session", name),
        )
    }

    pub fn unsupported(name: &str) -> Self {
        Self::new(
            XferErrorKind::UnsupportedOperation,
            format!("'{}' is not an operation of the underlying client", name),
        )
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(XferErrorKind::InvalidArgument, msg)
    }

    pub fn disconnected(host: &str) -> Self {
        Self::new(
            XferErrorKind::Disconnected,
            format!("session to {} is closed", host),
        )
        .with_host(host)
    }
}

impl fmt::Display for XferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ftpwrap {:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for XferError {}

impl From<std::io::Error> for XferError {
    fn from(e: std::io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<XferError> for String {
    fn from(e: XferError) -> String {
        e.message
    }
}
