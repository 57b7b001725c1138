//! Reset selection and run-wide knobs shared by the domain, core and CLI crates.

use crate::counter::{CounterTag, Period};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which counter windows a run zeroes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSelector {
    pub day: bool,
    pub week: bool,
    pub month: bool,
    pub all_time: bool,
}

impl ResetSelector {
    pub const NONE: ResetSelector = ResetSelector {
        day: false,
        week: false,
        month: false,
        all_time: false,
    };

    pub fn only(period: Period) -> Self {
        Self::NONE.with(period)
    }

    pub fn with(mut self, period: Period) -> Self {
        match period {
            Period::Day => self.day = true,
            Period::Week => self.week = true,
            Period::Month => self.month = true,
            Period::AllTime => self.all_time = true,
        }
        self
    }

    pub fn includes(&self, period: Period) -> bool {
        match period {
            Period::Day => self.day,
            Period::Week => self.week,
            Period::Month => self.month,
            Period::AllTime => self.all_time,
        }
    }

    /// Whether lines carrying `tag` are eligible for reset.
    pub fn selects(&self, tag: CounterTag) -> bool {
        self.includes(tag.period())
    }

    pub fn is_empty(&self) -> bool {
        !(self.day || self.week || self.month || self.all_time)
    }

    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        Period::ALL.into_iter().filter(|p| self.includes(*p))
    }
}

impl fmt::Display for ResetSelector {
    /// Comma separated labels, e.g. `Day, Week`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.periods().map(Period::label).collect();
        f.write_str(&labels.join(", "))
    }
}

/// First day of the accounting week. The weekly reset runs on the day the week starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn reset_weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// A reset implied by the calendar rather than by an explicit flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Weekly,
    Monthly,
}

impl Trigger {
    pub fn message(self) -> &'static str {
        match self {
            Trigger::Weekly => "Weekly reset triggered",
            Trigger::Monthly => "Monthly reset triggered",
        }
    }
}

/// How modified records are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// Truncate and rewrite the existing file; owner and mode are untouched.
    #[default]
    InPlace,
    /// Write a sibling temp file and rename it over the record.
    Atomic,
}
