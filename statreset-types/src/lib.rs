//! Shared DTOs for the statreset workspace.
//!
//! # Design constraints
//! - Report types are serialized to stdout as JSON and may be archived by cron wrappers.
//! - Prefer adding optional fields over changing semantics.

pub mod counter;
pub mod report;
pub mod selector;

pub use counter::{CounterTag, Direction, Period};
pub use selector::{ResetSelector, Trigger, WeekStart, WriteMode};

/// Schema identifiers.
pub mod schema {
    pub const STATRESET_REPORT_V1: &str = "statreset.report.v1";
}
