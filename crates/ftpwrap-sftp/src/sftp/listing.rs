// ── Long listing lines (`ls -l` style) ───────────────────────────────────────

use super::types::RemoteStat;
use chrono::{DateTime, TimeZone, Utc};

/// Entries older (or newer) than this show a year instead of a time.
const RECENT_SECS: i64 = 15_552_000;

/// Compute a human-readable permissions string like "drwxr-xr-x".
pub fn format_permissions(mode: u32) -> String {
    let mut s = String::with_capacity(10);

    s.push(match mode & 0o170000 {
        0o040000 => 'd',
        0o120000 => 'l',
        0o010000 => 'p',
        0o140000 => 's',
        0o060000 => 'b',
        0o020000 => 'c',
        _ => '-',
    });

    let triplet = |s: &mut String, r: u32, w: u32, x: u32, special: u32, set: char| {
        s.push(if mode & r != 0 { 'r' } else { '-' });
        s.push(if mode & w != 0 { 'w' } else { '-' });
        s.push(match (mode & special != 0, mode & x != 0) {
            (true, true) => set,
            (true, false) => set.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    };
    triplet(&mut s, 0o400, 0o200, 0o100, 0o4000, 's');
    triplet(&mut s, 0o040, 0o020, 0o010, 0o2000, 's');
    triplet(&mut s, 0o004, 0o002, 0o001, 0o1000, 't');

    s
}

fn format_mtime(mtime: Option<u64>, now: DateTime<Utc>) -> String {
    let Some(when) = mtime.and_then(|t| Utc.timestamp_opt(t as i64, 0).single()) else {
        return "(unknown date)".to_string();
    };
    if (now.timestamp() - when.timestamp()).abs() > RECENT_SECS {
        when.format("%d %b %Y").to_string()
    } else {
        when.format("%d %b %H:%M").to_string()
    }
}

/// One `ls -l` style line for `name`, relative to `now` for the date column.
pub fn long_line(name: &str, stat: &RemoteStat, now: DateTime<Utc>) -> String {
    let perms = match stat.perm {
        Some(mode) => format_permissions(mode),
        None => "?---------".to_string(),
    };
    format!(
        "{}   1 {:<8} {:<8} {:>8} {:<12} {}",
        perms,
        stat.uid.unwrap_or(0),
        stat.gid.unwrap_or(0),
        stat.size.unwrap_or(0),
        format_mtime(stat.mtime, now),
        name
    )
}
