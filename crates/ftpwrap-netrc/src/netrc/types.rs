// ── Types ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Login fields defined for one `machine` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetrcEntry {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
}

/// Host name → entry.  Immutable once parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetrcFile {
    hosts: HashMap<String, NetrcEntry>,
}

impl NetrcFile {
    pub(crate) fn from_hosts(hosts: HashMap<String, NetrcEntry>) -> Self {
        Self { hosts }
    }

    pub fn get(&self, host: &str) -> Option<&NetrcEntry> {
        self.hosts.get(host)
    }

    pub fn contains_host(&self, host: &str) -> bool {
        self.hosts.contains_key(host)
    }

    /// Host names, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hosts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetrcEntry)> {
        self.hosts.iter().map(|(h, e)| (h.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, NetrcEntry> {
        self.hosts
    }
}
