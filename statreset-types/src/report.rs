use crate::counter::{CounterTag, Direction, Period};
use crate::selector::{ResetSelector, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Result of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub schema: String,
    pub run_id: String,
    pub tool: ToolInfo,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    pub users_dir: String,
    pub dry_run: bool,
    pub selector: ResetSelector,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,

    #[serde(default)]
    pub records: Vec<RecordReport>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(tool: ToolInfo, users_dir: String, selector: ResetSelector) -> Self {
        Self {
            schema: crate::schema::STATRESET_REPORT_V1.to_string(),
            run_id: uuid::Uuid::new_v4().to_string(),
            tool,
            started_at: Utc::now(),
            ended_at: None,
            users_dir,
            dry_run: false,
            selector,
            triggers: vec![],
            records: vec![],
            summary: BatchSummary::default(),
        }
    }

    /// Append a record result and keep the summary in step.
    pub fn push(&mut self, record: RecordReport) {
        self.summary.total += 1;
        match record.outcome {
            RecordOutcome::Reset { .. } => self.summary.reset += 1,
            RecordOutcome::Unchanged => self.summary.unchanged += 1,
            RecordOutcome::Failed { .. } => self.summary.failed += 1,
        }
        self.records.push(record);
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().filter_map(|r| match &r.outcome {
            RecordOutcome::Failed { message } => Some((r.path.as_str(), message.as_str())),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReport {
    pub path: String,
    pub outcome: RecordOutcome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// At least one counter line was zeroed (or would be, in a dry run).
    Reset { lines: Vec<ResetLine> },
    Unchanged,
    Failed { message: String },
}

/// A single zeroed counter line, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetLine {
    pub line: usize,
    pub tag: CounterTag,
    pub period: Period,
    pub direction: Direction,
}

impl ResetLine {
    pub fn new(line: usize, tag: CounterTag) -> Self {
        Self {
            line,
            tag,
            period: tag.period(),
            direction: tag.direction(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: u64,
    pub reset: u64,
    pub unchanged: u64,
    pub failed: u64,
}
