//! Counter tags as they appear at the start of userfile stat lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window a counter accumulates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day,
    Week,
    Month,
    AllTime,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::AllTime];

    /// Human label used in console summaries.
    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "Day",
            Period::Week => "Week",
            Period::Month => "Month",
            Period::AllTime => "Alltime",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// One of the eight fixed counter line prefixes.
///
/// Declaration order is the dispatch order used when matching lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CounterTag {
    DayUp,
    DayDn,
    WkUp,
    WkDn,
    MonthUp,
    MonthDn,
    AllUp,
    AllDn,
}

impl CounterTag {
    pub const ALL: [CounterTag; 8] = [
        CounterTag::DayUp,
        CounterTag::DayDn,
        CounterTag::WkUp,
        CounterTag::WkDn,
        CounterTag::MonthUp,
        CounterTag::MonthDn,
        CounterTag::AllUp,
        CounterTag::AllDn,
    ];

    /// The literal token written in userfiles.
    pub fn as_str(self) -> &'static str {
        match self {
            CounterTag::DayUp => "DAYUP",
            CounterTag::DayDn => "DAYDN",
            CounterTag::WkUp => "WKUP",
            CounterTag::WkDn => "WKDN",
            CounterTag::MonthUp => "MONTHUP",
            CounterTag::MonthDn => "MONTHDN",
            CounterTag::AllUp => "ALLUP",
            CounterTag::AllDn => "ALLDN",
        }
    }

    pub fn period(self) -> Period {
        match self {
            CounterTag::DayUp | CounterTag::DayDn => Period::Day,
            CounterTag::WkUp | CounterTag::WkDn => Period::Week,
            CounterTag::MonthUp | CounterTag::MonthDn => Period::Month,
            CounterTag::AllUp | CounterTag::AllDn => Period::AllTime,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            CounterTag::DayUp | CounterTag::WkUp | CounterTag::MonthUp | CounterTag::AllUp => {
                Direction::Up
            }
            CounterTag::DayDn | CounterTag::WkDn | CounterTag::MonthDn | CounterTag::AllDn => {
                Direction::Down
            }
        }
    }

    /// Exact, case-sensitive lookup of a token.
    pub fn from_token(token: &str) -> Option<CounterTag> {
        CounterTag::ALL.into_iter().find(|t| t.as_str() == token)
    }
}

impl fmt::Display for CounterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_period_owns_one_up_and_one_down_tag() {
        for period in Period::ALL {
            let tags: Vec<_> = CounterTag::ALL
                .into_iter()
                .filter(|t| t.period() == period)
                .collect();
            assert_eq!(tags.len(), 2);
            assert_eq!(tags[0].direction(), Direction::Up);
            assert_eq!(tags[1].direction(), Direction::Down);
        }
    }

    #[test]
    fn from_token_is_case_sensitive() {
        assert_eq!(CounterTag::from_token("MONTHDN"), Some(CounterTag::MonthDn));
        assert_eq!(CounterTag::from_token("monthdn"), None);
        assert_eq!(CounterTag::from_token("MONTH"), None);
    }

    #[test]
    fn tags_are_never_prefixes_of_each_other_with_a_space() {
        for a in CounterTag::ALL {
            for b in CounterTag::ALL {
                if a != b {
                    let line = format!("{} 1 2 3", a.as_str());
                    assert!(!line.starts_with(&format!("{} ", b.as_str())));
                }
            }
        }
    }
}
