//! netrc parser.
//!
//! Lines are split on whitespace and read as `key value` pairs, so both the
//! one-pair-per-line layout and `machine h login u password p` on a single
//! line are accepted.  `machine <name>` opens a fresh entry for that host,
//! replacing any earlier block for it.  Lines that cannot be read as pairs
//! (a bare `default`, for example) are skipped; the current block stays open.

use super::types::{NetrcEntry, NetrcFile};
use std::collections::HashMap;

/// Parse netrc content.  Never fails: unreadable lines are dropped.
pub fn parse_netrc_str(content: &str) -> NetrcFile {
    let mut hosts: HashMap<String, NetrcEntry> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            continue;
        }

        for pair in tokens.chunks_exact(2) {
            let (key, val) = (pair[0], pair[1]);

            if key == "machine" {
                hosts.insert(val.to_string(), NetrcEntry::default());
                current = Some(val.to_string());
                continue;
            }

            let Some(entry) = current.as_ref().and_then(|h| hosts.get_mut(h)) else {
                continue;
            };

            match key {
                "login" => entry.login = Some(val.to_string()),
                "password" => entry.password = Some(val.to_string()),
                "account" => entry.account = Some(val.to_string()),
                _ => {}
            }
        }
    }

    NetrcFile::from_hosts(hosts)
}
