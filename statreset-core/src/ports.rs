//! Port traits abstracting record access away from the pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use statreset_edit::RecordResult;

/// A directory of userfile records.
pub trait RecordStore {
    /// Directory the records live in, used for reporting.
    fn location(&self) -> &Utf8Path;

    fn exists(&self) -> bool;

    /// Every candidate record, in processing order.
    fn list_records(&self) -> anyhow::Result<Vec<Utf8PathBuf>>;

    fn read_record(&self, path: &Utf8Path) -> RecordResult<String>;

    fn write_record(&self, path: &Utf8Path, contents: &str) -> RecordResult<()>;
}
