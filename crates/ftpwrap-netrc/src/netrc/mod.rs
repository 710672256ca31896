// ── ftpwrap-netrc / netrc module ─────────────────────────────────────────────
//
//   • types    — NetrcEntry / NetrcFile
//   • parser   — line-oriented token parser
//   • resolver — file location, loading, and login resolution

pub mod parser;
pub mod resolver;
pub mod types;

pub use parser::parse_netrc_str;
pub use resolver::{default_netrc_path, parse_netrc, resolve_credentials};
pub use types::{NetrcEntry, NetrcFile};
