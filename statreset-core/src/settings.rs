//! Clap-free settings for the batch pipeline.

use camino::Utf8PathBuf;
use statreset_types::{ResetSelector, Trigger, WriteMode};

/// Everything one batch run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub users_dir: Utf8PathBuf,

    pub selector: ResetSelector,
    /// Calendar triggers that produced `selector`, echoed into the report.
    pub triggers: Vec<Trigger>,

    pub dry_run: bool,
    pub write_mode: WriteMode,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            users_dir: Utf8PathBuf::from("/glftpd/ftp-data/users"),
            selector: ResetSelector::NONE,
            triggers: Vec::new(),
            dry_run: false,
            write_mode: WriteMode::default(),
        }
    }
}
