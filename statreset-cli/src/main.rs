mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser};
use config::ConfigMerger;
use statreset_core::adapters::FsRecordStore;
use statreset_core::ports::RecordStore;
use statreset_core::{BatchError, BatchOutcome, BatchSettings, resolve_selector, run_batch};
use statreset_types::report::ToolInfo;
use statreset_types::ResetSelector;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "statreset",
    version,
    about = "Reset glFTPD userfile day/week/month/alltime transfer statistics.",
    disable_help_flag = true
)]
struct Cli {
    /// Use an alternate glFTPD config file; its directory is the glFTPD root.
    #[arg(short = 'r', long = "config", value_name = "PATH")]
    config: Option<Utf8PathBuf>,

    /// Userfile directory (default: <root>/ftp-data/users).
    #[arg(long)]
    users_dir: Option<Utf8PathBuf>,

    /// statreset.toml to load (default: <root>/statreset.toml when present).
    #[arg(long, value_name = "PATH")]
    settings: Option<Utf8PathBuf>,

    /// Reset on Monday versus Sunday.
    #[arg(short = 'e', long, default_value_t = false)]
    monday: bool,

    /// Reset today's stats only.
    #[arg(short = 'd', long, default_value_t = false)]
    day: bool,

    /// Reset week stats only.
    #[arg(short = 'w', long, default_value_t = false)]
    week: bool,

    /// Reset month stats only.
    #[arg(short = 'm', long, default_value_t = false)]
    month: bool,

    /// Reset alltime stats only.
    #[arg(short = 'a', long, default_value_t = false)]
    alltime: bool,

    /// Evaluate weekly/monthly triggers as of this date (YYYY-MM-DD) instead of today.
    #[arg(long, env = "STATRESET_DATE", value_name = "DATE")]
    date: Option<NaiveDate>,

    /// Show what would change without writing any userfile.
    #[arg(short = 'n', long, default_value_t = false)]
    dry_run: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// This help screen.
    #[arg(short = 'h', long, short_alias = '?', action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn explicit_selector(&self) -> ResetSelector {
        ResetSelector {
            day: self.day,
            week: self.week,
            month: self.month,
            all_time: self.alltime,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let root = config::glftpd_root(cli.config.as_deref());
    let file_config = config::load_or_default(&root, cli.settings.as_deref())
        .context("load statreset.toml config")?;
    let merged =
        ConfigMerger::new(file_config).merge(&root, cli.users_dir.as_deref(), cli.monday);

    debug!(
        "merged config: users_dir={}, week_start={:?}, write_mode={:?}",
        merged.users_dir, merged.week_start, merged.write_mode
    );

    let today = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let resolution = resolve_selector(cli.explicit_selector(), today, merged.week_start);

    let store = FsRecordStore::new(merged.users_dir.clone(), merged.write_mode);
    if !store.exists() {
        return Err(missing_directory(BatchError::MissingDirectory {
            path: merged.users_dir,
        }));
    }

    if cli.format == OutputFormat::Text {
        for trigger in &resolution.triggers {
            println!("{}", trigger.message());
        }
    }

    let settings = BatchSettings {
        users_dir: merged.users_dir,
        selector: resolution.selector,
        triggers: resolution.triggers,
        dry_run: cli.dry_run,
        write_mode: merged.write_mode,
    };

    let outcome = match run_batch(&settings, &store, tool_info()) {
        Ok(outcome) => outcome,
        Err(err @ BatchError::MissingDirectory { .. }) => return Err(missing_directory(err)),
        Err(err) => return Err(err.into()),
    };

    match cli.format {
        OutputFormat::Text => print_text(&outcome),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.report)?);
        }
    }
    Ok(())
}

fn missing_directory(err: BatchError) -> anyhow::Error {
    anyhow::anyhow!("{err}\nPlease specify the correct path with -r option")
}

fn print_text(outcome: &BatchOutcome) {
    let report = &outcome.report;

    println!("Processing {} userfiles...", report.summary.total);
    for (path, message) in report.failures() {
        println!("Error processing {path}: {message}");
    }

    if report.dry_run {
        print!("{}", outcome.patch);
        println!(
            "Dry run: would reset stats in {} userfiles",
            outcome.success_count()
        );
    } else {
        println!(
            "Successfully reset stats in {} userfiles",
            outcome.success_count()
        );
    }

    if !report.selector.is_empty() {
        println!("Reset: {} statistics", report.selector);
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "statreset".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
