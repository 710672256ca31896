//! Plaintext transfer session.
//!
//! - `transport` — the capability set a session drives, implemented for
//!   `suppaftp::FtpStream`, plus connect + login
//! - `session` — `FtpSession`, the logged facade

pub mod session;
pub mod transport;

pub use session::FtpSession;
pub use transport::{FtpTransport, FTP_PORT};
