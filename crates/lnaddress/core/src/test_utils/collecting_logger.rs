use std::sync::Mutex;

use crate::logger::{LogEntry, Logger};

/// Keeps every entry in memory so tests can assert on what was logged.
#[derive(Default)]
pub struct CollectingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl CollectingLogger {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .any(|entry| entry.line.contains(needle))
    }
}

impl Logger for CollectingLogger {
    fn log(&self, entry: LogEntry) {
        self.entries.lock().unwrap().push(entry);
    }
}
