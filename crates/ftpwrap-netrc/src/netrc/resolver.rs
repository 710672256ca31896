// ── Credentials-file loading and login resolution ───────────────────────────

use super::parser::parse_netrc_str;
use super::types::NetrcFile;
use ftpwrap_core::{Credentials, XferError, XferResult};
use log::debug;
use std::path::{Path, PathBuf};

/// `~/.netrc`, or `None` when no home directory can be determined.
pub fn default_netrc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".netrc"))
}

/// Load and parse a credentials file.
///
/// With `Some(path)` the file must be readable, otherwise this fails with
/// `CredentialsFileNotFound`.  With `None` the default `~/.netrc` is used and
/// an absent or unreadable file yields an empty mapping.
pub fn parse_netrc(path: Option<&Path>) -> XferResult<NetrcFile> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                XferError::credentials_file_not_found(&path.display().to_string(), e)
            })?;
            Ok(parse_netrc_str(&content))
        }
        None => {
            let Some(path) = default_netrc_path() else {
                debug!("no home directory, skipping default netrc");
                return Ok(NetrcFile::default());
            };
            match std::fs::read_to_string(&path) {
                Ok(content) => Ok(parse_netrc_str(&content)),
                Err(e) => {
                    debug!("default netrc {} not used: {}", path.display(), e);
                    Ok(NetrcFile::default())
                }
            }
        }
    }
}

/// Fill in whichever of `user` / `password` was not given from the `host`
/// entry of the credentials file.  The file is only read when something is
/// missing; explicit values always win.
pub fn resolve_credentials(
    host: &str,
    user: Option<&str>,
    password: Option<&str>,
    netrc_path: Option<&Path>,
) -> XferResult<Credentials> {
    let mut creds = Credentials::new(user.map(str::to_string), password.map(str::to_string));
    if creds.is_complete() {
        return Ok(creds);
    }

    let netrc = parse_netrc(netrc_path)?;
    if let Some(entry) = netrc.get(host) {
        debug!("using netrc credentials for {}", host);
        if creds.user.is_none() {
            creds.user = entry.login.clone();
        }
        if creds.password.is_none() {
            creds.password = entry.password.clone();
        }
    }

    Ok(creds)
}
