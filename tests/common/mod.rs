// Shared fakes for the session integration tests: an in-memory remote file
// system behind both transport traits, and recording / mock log sinks.

#![allow(dead_code)]

use ftpwrap::{
    FtpTransport, OperationLog, RemoteStat, SftpTransport, SharedLog, XferError, XferResult,
};
use mockall::mock;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read, Write};
use std::sync::{Arc, Mutex};

pub const HOME: &str = "/home/user";

mock! {
    pub Log {}
    impl OperationLog for Log {
        fn info(&self, line: &str);
    }
}

/// Sink that keeps every line for later assertions.
pub fn recording_log() -> (SharedLog, Arc<Mutex<Vec<String>>>) {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = lines.clone();
    let log: SharedLog = Arc::new(move |line: &str| sink.lock().unwrap().push(line.to_string()));
    (log, lines)
}

// ── Remote file system ───────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeFs {
    pub files: BTreeMap<String, Vec<u8>>,
    pub dirs: BTreeSet<String>,
    pub links: BTreeMap<String, String>,
    pub modes: BTreeMap<String, u32>,
    /// Added to every reported file size, to provoke size mismatches.
    pub size_skew: u64,
    pub fail_close: bool,
    pub closes: usize,
}

pub type SharedFs = Arc<Mutex<FakeFs>>;

pub fn new_fs() -> SharedFs {
    let mut fs = FakeFs::default();
    fs.dirs.insert("/".into());
    fs.dirs.insert("/home".into());
    fs.dirs.insert(HOME.into());
    Arc::new(Mutex::new(fs))
}

fn missing(path: &str) -> XferError {
    XferError::operation_failed(format!("550 {}: No such file or directory", path))
}

pub fn parent_of(path: &str) -> String {
    match path.rsplit_once('/') {
        Some(("", _)) | None => "/".to_string(),
        Some((parent, _)) => parent.to_string(),
    }
}

pub fn abs(cwd: &str, path: &str) -> String {
    let joined = if path.starts_with('/') {
        path.to_string()
    } else if path.is_empty() || path == "." {
        cwd.to_string()
    } else {
        format!("{}/{}", cwd.trim_end_matches('/'), path)
    };
    let mut parts: Vec<&str> = Vec::new();
    for part in joined.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            p => parts.push(p),
        }
    }
    format!("/{}", parts.join("/"))
}

impl FakeFs {
    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path) || self.links.contains_key(path)
    }

    pub fn names_in(&self, dir: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .chain(self.links.keys())
            .filter(|p| p.as_str() != "/" && parent_of(p) == dir)
            .map(|p| p.rsplit('/').next().unwrap_or_default().to_string())
            .collect();
        names.sort();
        names
    }

    fn stat_of(&self, path: &str) -> XferResult<RemoteStat> {
        let (perm, size) = if let Some(data) = self.files.get(path) {
            (0o100644, data.len() as u64 + self.size_skew)
        } else if self.dirs.contains(path) {
            (0o040755, 4096)
        } else {
            return Err(missing(path));
        };
        let perm = match self.modes.get(path) {
            Some(mode) => (perm & 0o170000) | mode,
            None => perm,
        };
        Ok(RemoteStat {
            size: Some(size),
            uid: Some(1000),
            gid: Some(1000),
            perm: Some(perm),
            atime: Some(1_700_000_000),
            mtime: Some(1_700_000_000),
        })
    }

    fn mkdir(&mut self, path: &str) -> XferResult<()> {
        if self.exists(path) || !self.dirs.contains(&parent_of(path)) {
            return Err(XferError::operation_failed(format!("550 {}: cannot create", path)));
        }
        self.dirs.insert(path.to_string());
        Ok(())
    }

    fn rmdir(&mut self, path: &str) -> XferResult<()> {
        if !self.dirs.contains(path) {
            return Err(missing(path));
        }
        if !self.names_in(path).is_empty() {
            return Err(XferError::operation_failed(format!("550 {}: directory not empty", path)));
        }
        self.dirs.remove(path);
        Ok(())
    }

    fn unlink(&mut self, path: &str) -> XferResult<()> {
        if self.files.remove(path).is_some() || self.links.remove(path).is_some() {
            Ok(())
        } else {
            Err(missing(path))
        }
    }

    fn rename(&mut self, from: &str, to: &str) -> XferResult<()> {
        if let Some(data) = self.files.remove(from) {
            self.files.insert(to.to_string(), data);
            Ok(())
        } else if self.dirs.remove(from) {
            self.dirs.insert(to.to_string());
            Ok(())
        } else {
            Err(missing(from))
        }
    }

    fn close(&mut self) -> XferResult<()> {
        self.closes += 1;
        if self.fail_close {
            Err(XferError::operation_failed("connection reset by peer"))
        } else {
            Ok(())
        }
    }
}

/// Appends into the shared file system as it is written.
struct FakeWriter {
    fs: SharedFs,
    path: String,
}

impl Write for FakeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut fs = self.fs.lock().unwrap();
        fs.files.entry(self.path.clone()).or_default().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// ── Plaintext transport ──────────────────────────────────────────────────────

pub struct FakeFtp {
    pub fs: SharedFs,
    cwd: String,
}

impl FakeFtp {
    pub fn new(fs: SharedFs) -> Self {
        Self {
            fs,
            cwd: HOME.to_string(),
        }
    }

    fn path(&self, path: &str) -> String {
        abs(&self.cwd, path)
    }
}

impl FtpTransport for FakeFtp {
    fn cwd(&mut self, dir: &str) -> XferResult<()> {
        let target = self.path(dir);
        if !self.fs.lock().unwrap().dirs.contains(&target) {
            return Err(missing(&target));
        }
        self.cwd = target;
        Ok(())
    }

    fn pwd(&mut self) -> XferResult<String> {
        Ok(self.cwd.clone())
    }

    fn nlst(&mut self, dir: Option<&str>) -> XferResult<Vec<String>> {
        let target = self.path(dir.unwrap_or("."));
        let fs = self.fs.lock().unwrap();
        if !fs.dirs.contains(&target) {
            return Err(missing(&target));
        }
        Ok(fs.names_in(&target))
    }

    fn list(&mut self, dir: Option<&str>) -> XferResult<Vec<String>> {
        let target = self.path(dir.unwrap_or("."));
        let names = self.nlst(Some(&target))?;
        let fs = self.fs.lock().unwrap();
        Ok(names
            .into_iter()
            .map(|name| {
                let full = abs(&target, &name);
                match fs.files.get(&full) {
                    Some(data) => {
                        format!("-rw-r--r-- 1 user user {} Jan 01 00:00 {}", data.len(), name)
                    }
                    None => format!("drwxr-xr-x 2 user user 4096 Jan 01 00:00 {}", name),
                }
            })
            .collect())
    }

    fn store(&mut self, remote: &str, reader: &mut dyn Read) -> XferResult<u64> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let n = data.len() as u64;
        self.fs.lock().unwrap().files.insert(self.path(remote), data);
        Ok(n)
    }

    fn retrieve(&mut self, remote: &str, writer: &mut dyn Write) -> XferResult<u64> {
        let target = self.path(remote);
        let data = self
            .fs
            .lock()
            .unwrap()
            .files
            .get(&target)
            .cloned()
            .ok_or_else(|| missing(&target))?;
        writer.write_all(&data)?;
        Ok(data.len() as u64)
    }

    fn size(&mut self, path: &str) -> XferResult<u64> {
        let target = self.path(path);
        let fs = self.fs.lock().unwrap();
        fs.files.get(&target).map(|d| d.len() as u64).ok_or_else(|| missing(&target))
    }

    fn delete(&mut self, path: &str) -> XferResult<()> {
        let target = self.path(path);
        let mut fs = self.fs.lock().unwrap();
        fs.files.remove(&target).map(|_| ()).ok_or_else(|| missing(&target))
    }

    fn rename(&mut self, from: &str, to: &str) -> XferResult<()> {
        let (from, to) = (self.path(from), self.path(to));
        self.fs.lock().unwrap().rename(&from, &to)
    }

    fn mkdir(&mut self, dir: &str) -> XferResult<()> {
        let target = self.path(dir);
        self.fs.lock().unwrap().mkdir(&target)
    }

    fn rmdir(&mut self, dir: &str) -> XferResult<()> {
        let target = self.path(dir);
        self.fs.lock().unwrap().rmdir(&target)
    }

    fn quit(&mut self) -> XferResult<()> {
        self.fs.lock().unwrap().close()
    }
}

// ── Secure transport ─────────────────────────────────────────────────────────

/// Relative paths resolve against the login directory, as on a real server.
pub struct FakeSftp {
    pub fs: SharedFs,
}

impl FakeSftp {
    pub fn new(fs: SharedFs) -> Self {
        Self { fs }
    }
}

impl SftpTransport for FakeSftp {
    fn realpath(&mut self, path: &str) -> XferResult<String> {
        let target = abs(HOME, path);
        let fs = self.fs.lock().unwrap();
        match fs.links.get(&target) {
            Some(dest) => Ok(abs(&parent_of(&target), dest)),
            None if fs.exists(&target) => Ok(target),
            None => Err(missing(&target)),
        }
    }

    fn stat(&mut self, path: &str) -> XferResult<RemoteStat> {
        let target = self.realpath(path)?;
        self.fs.lock().unwrap().stat_of(&target)
    }

    fn lstat(&mut self, path: &str) -> XferResult<RemoteStat> {
        let target = abs(HOME, path);
        let fs = self.fs.lock().unwrap();
        if fs.links.contains_key(&target) {
            return Ok(RemoteStat {
                perm: Some(0o120777),
                size: Some(0),
                ..Default::default()
            });
        }
        fs.stat_of(&target)
    }

    fn readdir(&mut self, dir: &str) -> XferResult<Vec<(String, RemoteStat)>> {
        let target = abs(HOME, dir);
        let fs = self.fs.lock().unwrap();
        if !fs.dirs.contains(&target) {
            return Err(missing(&target));
        }
        fs.names_in(&target)
            .into_iter()
            .map(|name| {
                let full = abs(&target, &name);
                let stat = fs.stat_of(&full).unwrap_or_default();
                Ok((name, stat))
            })
            .collect()
    }

    fn open_read(&mut self, path: &str) -> XferResult<Box<dyn Read>> {
        let target = abs(HOME, path);
        let data = self
            .fs
            .lock()
            .unwrap()
            .files
            .get(&target)
            .cloned()
            .ok_or_else(|| missing(&target))?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn open_write(&mut self, path: &str) -> XferResult<Box<dyn Write>> {
        let target = abs(HOME, path);
        {
            let mut fs = self.fs.lock().unwrap();
            if !fs.dirs.contains(&parent_of(&target)) {
                return Err(missing(&target));
            }
            fs.files.insert(target.clone(), Vec::new());
        }
        Ok(Box::new(FakeWriter {
            fs: self.fs.clone(),
            path: target,
        }))
    }

    fn mkdir(&mut self, dir: &str) -> XferResult<()> {
        self.fs.lock().unwrap().mkdir(&abs(HOME, dir))
    }

    fn rmdir(&mut self, dir: &str) -> XferResult<()> {
        self.fs.lock().unwrap().rmdir(&abs(HOME, dir))
    }

    fn unlink(&mut self, path: &str) -> XferResult<()> {
        self.fs.lock().unwrap().unlink(&abs(HOME, path))
    }

    fn rename(&mut self, from: &str, to: &str) -> XferResult<()> {
        self.fs.lock().unwrap().rename(&abs(HOME, from), &abs(HOME, to))
    }

    fn readlink(&mut self, path: &str) -> XferResult<String> {
        let target = abs(HOME, path);
        self.fs.lock().unwrap().links.get(&target).cloned().ok_or_else(|| missing(&target))
    }

    fn symlink(&mut self, target: &str, link: &str) -> XferResult<()> {
        let link = abs(HOME, link);
        let mut fs = self.fs.lock().unwrap();
        if fs.exists(&link) {
            return Err(XferError::operation_failed(format!("{}: file exists", link)));
        }
        fs.links.insert(link, target.to_string());
        Ok(())
    }

    fn chmod(&mut self, path: &str, mode: u32) -> XferResult<()> {
        let target = abs(HOME, path);
        let mut fs = self.fs.lock().unwrap();
        if !fs.exists(&target) {
            return Err(missing(&target));
        }
        fs.modes.insert(target, mode);
        Ok(())
    }

    fn close(&mut self) -> XferResult<()> {
        self.fs.lock().unwrap().close()
    }
}
