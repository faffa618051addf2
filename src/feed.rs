//! Feeder reading newline-delimited JSON records and yielding one item per record.
//!
//! Each line is expected to hold a JSON object; the string value of the configured
//! field becomes the item. Lines that cannot provide an item are skipped and counted
//! instead of failing the whole stream, so a few corrupt records in a large access log
//! do not abort the count, and that includes lines which are not valid UTF-8.
//! Only I/O errors of the underlying reader are returned.

use std::io::{self, BufRead};

use serde_json::Value;
use tracing::{debug, trace};

/// Counters of records seen by `FieldFeed`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    /// Lines read, including skipped ones
    pub records: usize,
    /// Items yielded
    pub items: usize,
    /// Lines skipped
    pub skipped: usize,
}

/// Iterator over the selected field of newline-delimited JSON records
pub struct FieldFeed<R> {
    reader: R,
    field: String,
    line: Vec<u8>,
    stats: FeedStats,
}

impl<R: BufRead> FieldFeed<R> {
    /// Creates new feeder extracting `field` from every record of `reader`
    pub fn new(reader: R, field: impl Into<String>) -> Self {
        Self {
            reader,
            field: field.into(),
            line: Vec::new(),
            stats: FeedStats::default(),
        }
    }

    /// Return counters of records read so far
    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Extract item from a single record or return the reason it was skipped
    fn extract(&self, record: &[u8]) -> Result<String, &'static str> {
        let record = std::str::from_utf8(record)
            .map_err(|_| "invalid utf-8")?
            .trim();
        if record.is_empty() {
            return Err("blank line");
        }
        let value: Value = serde_json::from_str(record).map_err(|_| "invalid json")?;
        let object = value.as_object().ok_or("not an object")?;
        match object.get(&self.field) {
            None | Some(Value::Null) => Err("missing field"),
            Some(Value::String(s)) if s.is_empty() => Err("empty field"),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err("field is not a string"),
        }
    }
}

impl<R: BufRead> Iterator for FieldFeed<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.stats.records += 1;

            match self.extract(&self.line) {
                Ok(item) => {
                    self.stats.items += 1;
                    trace!(line = self.stats.records, item = %item, "record");
                    return Some(Ok(item));
                }
                Err(reason) => {
                    self.stats.skipped += 1;
                    debug!(line = self.stats.records, reason, "skipping record");
                }
            }
        }
    }
}
