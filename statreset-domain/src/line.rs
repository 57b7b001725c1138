use statreset_types::CounterTag;
use std::borrow::Cow;

/// Tag plus files, bytes and seconds.
const MIN_FIELDS: usize = 4;

/// Zero the counter fields of `line` if it carries `tag`.
///
/// A line is eligible when it contains the tag text anywhere and splits into at least
/// four whitespace separated tokens. The replacement keeps the first token exactly as
/// written and always ends in a single `\n`. Ineligible lines come back borrowed and
/// byte-for-byte identical, terminator included.
pub fn reset_counter_line(line: &str, tag: CounterTag) -> Cow<'_, str> {
    // Substring match on purpose: callers may not have gated on the exact prefix.
    if !line.contains(tag.as_str()) {
        return Cow::Borrowed(line);
    }

    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Cow::Borrowed(line);
    };
    if tokens.take(MIN_FIELDS - 1).count() < MIN_FIELDS - 1 {
        return Cow::Borrowed(line);
    }

    Cow::Owned(format!("{first} 0 0 0\n"))
}
