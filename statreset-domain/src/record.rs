use crate::line::reset_counter_line;
use statreset_types::report::ResetLine;
use statreset_types::{CounterTag, ResetSelector};
use std::borrow::Cow;
use tracing::debug;

pub const SECTION_START: &str = "[SECTION]";
pub const SECTION_END: &str = "[ENDSECTION]";

/// Where the scanner is relative to the `[SECTION]` region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionState {
    #[default]
    Outside,
    Inside,
}

impl SectionState {
    /// The state a boundary marker line switches to, or `None` for any other line.
    pub fn transition(line: &str) -> Option<SectionState> {
        if line.contains(SECTION_START) {
            Some(SectionState::Inside)
        } else if line.contains(SECTION_END) {
            Some(SectionState::Outside)
        } else {
            None
        }
    }
}

/// Output of one pass over a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRewrite<'a> {
    /// One entry per input line, in input order.
    pub lines: Vec<Cow<'a, str>>,
    /// Lines whose text actually changed.
    pub resets: Vec<ResetLine>,
}

impl RecordRewrite<'_> {
    pub fn modified(&self) -> bool {
        !self.resets.is_empty()
    }

    pub fn contents(&self) -> String {
        self.lines.concat()
    }
}

/// Scan `lines` once, zeroing selected counters that sit inside a section region.
///
/// Marker lines are emitted unchanged and never dispatched. A later
/// `[SECTION]`/`[ENDSECTION]` pair is handled exactly like the first one.
pub fn process_record<'a, I>(lines: I, selector: ResetSelector) -> RecordRewrite<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = SectionState::Outside;
    let mut out = Vec::new();
    let mut resets = Vec::new();

    for (idx, line) in lines.into_iter().enumerate() {
        if let Some(next) = SectionState::transition(line) {
            state = next;
            out.push(Cow::Borrowed(line));
            continue;
        }

        if state == SectionState::Outside {
            out.push(Cow::Borrowed(line));
            continue;
        }

        let Some(tag) = dispatch_tag(line, selector) else {
            out.push(Cow::Borrowed(line));
            continue;
        };

        let new = reset_counter_line(line, tag);
        if new != line {
            debug!(line = idx + 1, tag = tag.as_str(), "zeroed counter");
            resets.push(ResetLine::new(idx + 1, tag));
        } else {
            debug!(line = idx + 1, tag = tag.as_str(), "malformed counter left as is");
        }
        out.push(new);
    }

    RecordRewrite { lines: out, resets }
}

/// Run [`process_record`] over a whole record, keeping line terminators attached.
pub fn rewrite_record(contents: &str, selector: ResetSelector) -> RecordRewrite<'_> {
    process_record(contents.split_inclusive('\n'), selector)
}

/// First selected tag whose text plus a single space prefixes the line.
fn dispatch_tag(line: &str, selector: ResetSelector) -> Option<CounterTag> {
    CounterTag::ALL.into_iter().find(|tag| {
        selector.selects(*tag)
            && line
                .strip_prefix(tag.as_str())
                .is_some_and(|rest| rest.starts_with(' '))
    })
}
