// ── ftpwrap-sftp / sftp module ────────────────────────────────────────────────
//
//   • types     — RemoteStat, TransferOptions
//   • transport — SftpTransport capability set, ssh2 implementation, connect
//   • listing   — permission strings and `ls -l` style lines
//   • transfer  — chunked copy with cumulative progress
//   • session   — SftpSession facade
//   • forward   — name-based pass-through to the underlying client

pub mod forward;
pub mod listing;
pub mod session;
pub mod transfer;
pub mod transport;
pub mod types;

pub use forward::{Forwarded, FORWARDED_NAMES, RESERVED_NAMES};
pub use session::SftpSession;
pub use transport::{SftpTransport, Ssh2Transport, SFTP_PORT};
pub use types::{RemoteStat, TransferOptions};
