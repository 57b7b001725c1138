use chrono::{Datelike, NaiveDate};
use statreset_types::{Period, ResetSelector, Trigger, WeekStart};
use tracing::debug;

/// The selector a run applies, plus any calendar triggers that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub selector: ResetSelector,
    pub triggers: Vec<Trigger>,
}

/// Resolve the run's selector.
///
/// Explicit flags win outright. With none set, the day window is always reset, the
/// week window on the configured week-start day and the month window on the 1st.
pub fn resolve_selector(
    explicit: ResetSelector,
    today: NaiveDate,
    week_start: WeekStart,
) -> Resolution {
    if !explicit.is_empty() {
        debug!(selector = %explicit, "using explicit reset flags");
        return Resolution {
            selector: explicit,
            triggers: vec![],
        };
    }

    let mut selector = ResetSelector::only(Period::Day);
    let mut triggers = Vec::new();

    if today.weekday() == week_start.reset_weekday() {
        selector = selector.with(Period::Week);
        triggers.push(Trigger::Weekly);
    }
    if today.day() == 1 {
        selector = selector.with(Period::Month);
        triggers.push(Trigger::Monthly);
    }

    debug!(%today, ?week_start, selector = %selector, "derived reset flags from date");
    Resolution { selector, triggers }
}
