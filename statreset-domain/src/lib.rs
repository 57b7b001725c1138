//! Domain logic: decide which userfile lines to zero and produce the rewritten record.
//!
//! This crate is pure. It owns *what* changes in a record; reading and writing files is
//! `statreset-edit`, batching is `statreset-core`.

mod line;
mod record;
mod schedule;

pub use line::reset_counter_line;
pub use record::{
    RecordRewrite, SECTION_END, SECTION_START, SectionState, process_record, rewrite_record,
};
pub use schedule::{Resolution, resolve_selector};
