//! Edit engine for userfile records.
//!
//! Responsibilities:
//! - Read a record fully into memory.
//! - Write a rewritten record back, in place or via an atomic rename.
//! - Render a unified diff preview and sha256 fingerprints for reports.

mod error;

pub use error::{RecordError, RecordResult};

use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use statreset_types::WriteMode;
use std::io::{self, Write};
use tracing::debug;

/// Read a whole record as UTF-8 text.
pub fn read_record(path: &Utf8Path) -> RecordResult<String> {
    let bytes = fs::read(path).map_err(RecordError::Read)?;
    String::from_utf8(bytes).map_err(|e| RecordError::Decode {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Replace the contents of an existing record.
pub fn write_record(path: &Utf8Path, contents: &str, mode: WriteMode) -> RecordResult<()> {
    match mode {
        WriteMode::InPlace => {
            fs::write(path, contents).map_err(RecordError::Write)?;
        }
        WriteMode::Atomic => write_atomic(path, contents)?,
    }
    debug!(%path, ?mode, bytes = contents.len(), "wrote record");
    Ok(())
}

fn write_atomic(path: &Utf8Path, contents: &str) -> RecordResult<()> {
    // Rename over the link target, never over a symlink in the users dir.
    let target = fs::canonicalize(path).map_err(RecordError::Write)?;
    let target = Utf8PathBuf::from_path_buf(target).map_err(|p| {
        RecordError::Write(io::Error::other(format!(
            "{path} resolves to non UTF-8 path {}",
            p.display()
        )))
    })?;
    let dir = target.parent().unwrap_or(Utf8Path::new("/"));
    let permissions = fs::metadata(&target)
        .map_err(RecordError::Write)?
        .permissions();

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(RecordError::Write)?;
    tmp.write_all(contents.as_bytes())
        .map_err(RecordError::Write)?;
    tmp.as_file().sync_all().map_err(RecordError::Write)?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(RecordError::Write)?;
    tmp.persist(&target).map_err(|e| RecordError::Write(e.error))?;
    Ok(())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Unified diff of one record, empty when nothing changed.
pub fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatter = PatchFormatter::new();
    let body = formatter.fmt_patch(&patch).to_string();
    // Skip diffy's own `--- original`/`+++ modified` header.
    for line in body.split_inclusive('\n').skip_while(|l| !l.starts_with("@@")) {
        out.push_str(line);
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
