use tracing::debug;

use crate::models::{Classification, EntryState, Record};

/// Groups classified lines into records.
///
/// The assembler owns exactly one working record. It is a value threaded through a
/// fold: each [`EntryAssembler::step`] consumes the assembler and returns the next
/// one, and [`EntryAssembler::finish`] flushes whatever is left.
#[derive(Debug, Clone, Default)]
pub struct EntryAssembler {
    records: Vec<Record>,
    working: Record,
    state: EntryState,
}

impl EntryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulation state
    pub fn state(&self) -> EntryState {
        self.state
    }

    /// The in-progress record
    pub fn working(&self) -> &Record {
        &self.working
    }

    /// Records flushed so far
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Advance the state machine by one classified line
    pub fn step(mut self, line: &str, classification: Classification) -> Self {
        match classification {
            Classification::Name => {
                if self.state == EntryState::HasBoth {
                    self.flush();
                }
                let (first_name, last_name) = split_name(line);
                self.working.first_name = first_name;
                self.working.last_name = last_name;
                self.state = if self.working.has_complete_name() {
                    EntryState::HasBoth
                } else {
                    EntryState::HasNameOnly
                };
            }
            Classification::Company => {
                self.working.company = line.to_string();
                self.state = if self.working.has_complete_name() {
                    EntryState::HasBoth
                } else {
                    EntryState::HasCompanyOnly
                };
            }
            Classification::Ignored => {}
        }
        self
    }

    /// Flush any partial record and return the ordered output
    pub fn finish(mut self) -> Vec<Record> {
        if !self.working.is_empty() {
            self.flush();
        }
        self.records
    }

    fn flush(&mut self) {
        let record = std::mem::take(&mut self.working);
        debug!(
            "Flushing record: {} {} / {}",
            record.first_name, record.last_name, record.company
        );
        self.records.push(record);
        self.state = EntryState::Empty;
    }
}

/// Split a name line into (first_name, last_name)
///
/// The first whitespace token is the first name and the rest, joined by single
/// spaces, is the last name. A single token leaves the last name empty.
pub fn split_name(line: &str) -> (String, String) {
    let mut parts = line.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

/// Perform Stage 2: fold classified lines into records
pub fn assemble_records<'a, I>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = (&'a str, Classification)>,
{
    lines
        .into_iter()
        .fold(EntryAssembler::new(), |assembler, (line, class)| {
            assembler.step(line, class)
        })
        .finish()
}
