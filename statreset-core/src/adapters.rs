//! Default port implementations.

use crate::ports::RecordStore;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use statreset_edit::{RecordError, RecordResult};
use statreset_types::WriteMode;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use tracing::{debug, warn};

/// Userfiles stored as regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct FsRecordStore {
    dir: Utf8PathBuf,
    write_mode: WriteMode,
}

impl FsRecordStore {
    pub fn new(dir: Utf8PathBuf, write_mode: WriteMode) -> Self {
        Self { dir, write_mode }
    }
}

impl RecordStore for FsRecordStore {
    fn location(&self) -> &Utf8Path {
        &self.dir
    }

    fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    fn list_records(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir).with_context(|| format!("list {}", self.dir))? {
            let entry = entry.with_context(|| format!("list {}", self.dir))?;
            let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            // Follows symlinks, so a link to a regular file counts.
            if !path.is_file() {
                debug!(%path, "skipping non-regular entry");
                continue;
            }
            out.push(path);
        }
        out.sort();
        Ok(out)
    }

    fn read_record(&self, path: &Utf8Path) -> RecordResult<String> {
        statreset_edit::read_record(path)
    }

    fn write_record(&self, path: &Utf8Path, contents: &str) -> RecordResult<()> {
        statreset_edit::write_record(path, contents, self.write_mode)
    }
}

/// In-memory record store for embedding and testing.
///
/// Individual records can be marked unreadable or unwritable to exercise the
/// per-record failure path.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    dir: Utf8PathBuf,
    present: bool,
    records: RefCell<BTreeMap<Utf8PathBuf, String>>,
    unreadable: BTreeSet<Utf8PathBuf>,
    unwritable: BTreeSet<Utf8PathBuf>,
    writes: RefCell<Vec<Utf8PathBuf>>,
}

impl InMemoryRecordStore {
    pub fn new<I, N, C>(dir: impl Into<Utf8PathBuf>, records: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: Into<String>,
    {
        let dir = dir.into();
        let records = records
            .into_iter()
            .map(|(name, contents)| (dir.join(name.as_ref()), contents.into()))
            .collect();
        Self {
            dir,
            present: true,
            records: RefCell::new(records),
            ..Default::default()
        }
    }

    /// A store whose directory does not exist.
    pub fn missing(dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            present: false,
            ..Default::default()
        }
    }

    pub fn with_unreadable(mut self, name: &str) -> Self {
        self.unreadable.insert(self.dir.join(name));
        self
    }

    pub fn with_unwritable(mut self, name: &str) -> Self {
        self.unwritable.insert(self.dir.join(name));
        self
    }

    pub fn contents(&self, name: &str) -> Option<String> {
        self.records.borrow().get(&self.dir.join(name)).cloned()
    }

    /// Paths written so far, in write order.
    pub fn writes(&self) -> Vec<Utf8PathBuf> {
        self.writes.borrow().clone()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn location(&self) -> &Utf8Path {
        &self.dir
    }

    fn exists(&self) -> bool {
        self.present
    }

    fn list_records(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        Ok(self.records.borrow().keys().cloned().collect())
    }

    fn read_record(&self, path: &Utf8Path) -> RecordResult<String> {
        if self.unreadable.contains(path) {
            return Err(RecordError::Read(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {path}"),
            )));
        }
        self.records
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| RecordError::Read(io::Error::new(io::ErrorKind::NotFound, path.as_str())))
    }

    fn write_record(&self, path: &Utf8Path, contents: &str) -> RecordResult<()> {
        if self.unwritable.contains(path) {
            return Err(RecordError::Write(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {path}"),
            )));
        }
        self.records
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
