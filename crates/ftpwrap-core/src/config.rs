// ── Connection settings ───────────────────────────────────────────────────────

use crate::error::{XferError, XferResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

// ── Serde default helpers ────────────────────────────────────────────────────

fn default_timeout_secs() -> u64 {
    30
}

/// Where and as whom a transfer session connects.
///
/// `host` has no default: every session names its server explicitly.
/// `port` falls back to the protocol's well-known port when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Credentials file to consult instead of `~/.netrc`.
    #[serde(default)]
    pub netrc_path: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SessionConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            user: None,
            password: None,
            netrc_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn netrc_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.netrc_path = Some(path.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// `host:port`, using `default_port` when no port was configured.
    pub fn address(&self, default_port: u16) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(default_port))
    }

    /// Resolve the host (IPv4 or IPv6) and return the first address.
    pub fn socket_addr(&self, default_port: u16) -> XferResult<SocketAddr> {
        let addr = self.address(default_port);
        addr.to_socket_addrs()
            .map_err(|e| XferError::connection_failed(format!("cannot resolve {}: {}", addr, e)))?
            .next()
            .ok_or_else(|| {
                XferError::connection_failed(format!("DNS returned no addresses for {}", addr))
            })
            .map_err(|e| e.with_host(self.host.as_str()))
    }

    /// Connect timeout; a zero setting is raised to one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Login fields after explicit values and the credentials file were merged.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(user: Option<String>, password: Option<String>) -> Self {
        Self { user, password }
    }

    pub fn is_complete(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    /// Name used in log lines; `None` when logging in anonymously.
    pub fn display_user(&self) -> &str {
        self.user.as_deref().unwrap_or("None")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .finish()
    }
}
