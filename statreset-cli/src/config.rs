//! Configuration file loading for statreset.
//!
//! Discovers and loads `statreset.toml` from the glFTPD root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use statreset_types::{WeekStart, WriteMode};
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "statreset.toml";

/// glFTPD root used when no `-r` config path is given.
pub const DEFAULT_GLFTPD_ROOT: &str = "/glftpd";

/// Userfile directory relative to the glFTPD root.
pub const DEFAULT_USERS_DIR: &str = "ftp-data/users";

/// Top-level configuration from statreset.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatresetConfig {
    pub paths: PathsConfig,
    pub schedule: ScheduleConfig,
    pub write: WriteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Userfile directory; relative paths are resolved against the glFTPD root.
    pub users_dir: Utf8PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            users_dir: Utf8PathBuf::from(DEFAULT_USERS_DIR),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub week_start: WeekStart,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WriteConfig {
    pub mode: WriteMode,
}

/// The glFTPD root: the directory holding the glFTPD config file.
pub fn glftpd_root(config_file: Option<&Utf8Path>) -> Utf8PathBuf {
    match config_file {
        Some(path) => match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        },
        None => Utf8PathBuf::from(DEFAULT_GLFTPD_ROOT),
    }
}

/// Discover the statreset.toml config file in the glFTPD root.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a statreset.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<StatresetConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<StatresetConfig> {
    let config: StatresetConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load an explicitly named config, else one found in `root`, else defaults.
pub fn load_or_default(
    root: &Utf8Path,
    explicit: Option<&Utf8Path>,
) -> anyhow::Result<StatresetConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(StatresetConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub users_dir: Utf8PathBuf,
    pub week_start: WeekStart,
    pub write_mode: WriteMode,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: StatresetConfig,
}

impl ConfigMerger {
    pub fn new(config: StatresetConfig) -> Self {
        Self { config }
    }

    /// `--users-dir` replaces the configured directory; `--monday` forces a Monday week.
    pub fn merge(
        self,
        root: &Utf8Path,
        cli_users_dir: Option<&Utf8Path>,
        cli_monday: bool,
    ) -> MergedConfig {
        let users_dir = match cli_users_dir {
            Some(dir) => dir.to_path_buf(),
            None => root.join(&self.config.paths.users_dir),
        };
        let week_start = if cli_monday {
            WeekStart::Monday
        } else {
            self.config.schedule.week_start
        };

        MergedConfig {
            users_dir,
            week_start,
            write_mode: self.config.write.mode,
        }
    }
}
