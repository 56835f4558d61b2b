//! The document trace log.
//!
//! Every entry goes to the `log` facade under the `quire::trace` target and is
//! also kept in memory, so a caller can inspect what happened during a pass
//! (warnings from lax conformance in particular) without installing a logger.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

const LOG_TARGET: &str = "quire::trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TraceLevel {
    Debug,
    Verbose,
    Message,
    Warning,
    Error,
    Failure,
}

impl TraceLevel {
    fn log_level(self) -> log::Level {
        match self {
            TraceLevel::Debug => log::Level::Trace,
            TraceLevel::Verbose => log::Level::Debug,
            TraceLevel::Message => log::Level::Info,
            TraceLevel::Warning => log::Level::Warn,
            TraceLevel::Error | TraceLevel::Failure => log::Level::Error,
        }
    }
}

/// Lowest level a log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraceRecordLevel {
    All,
    Verbose,
    #[default]
    Messages,
    Warnings,
    Errors,
    Off,
}

impl TraceRecordLevel {
    fn threshold(self) -> Option<TraceLevel> {
        match self {
            TraceRecordLevel::All => Some(TraceLevel::Debug),
            TraceRecordLevel::Verbose => Some(TraceLevel::Verbose),
            TraceRecordLevel::Messages => Some(TraceLevel::Message),
            TraceRecordLevel::Warnings => Some(TraceLevel::Warning),
            TraceRecordLevel::Errors => Some(TraceLevel::Error),
            TraceRecordLevel::Off => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub level: TraceLevel,
    pub category: String,
    pub message: String,
    /// Time since the log was created
    pub offset: Duration,
    pub depth: usize,
}

#[derive(Debug)]
pub struct TraceLog {
    record_level: Cell<TraceRecordLevel>,
    started: Instant,
    depth: Cell<usize>,
    entries: RefCell<Vec<TraceEntry>>,
}

impl Default for TraceLog {
    fn default() -> Self {
        Self::new(TraceRecordLevel::default())
    }
}

impl TraceLog {
    pub fn new(record_level: TraceRecordLevel) -> Self {
        Self {
            record_level: Cell::new(record_level),
            started: Instant::now(),
            depth: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn record_level(&self) -> TraceRecordLevel {
        self.record_level.get()
    }

    pub fn set_record_level(&self, level: TraceRecordLevel) {
        self.record_level.set(level);
    }

    pub fn should_log(&self, level: TraceLevel) -> bool {
        self.record_level
            .get()
            .threshold()
            .is_some_and(|threshold| level >= threshold)
    }

    pub fn add(&self, level: TraceLevel, category: &str, message: &str) {
        if !self.should_log(level) {
            return;
        }
        let depth = self.depth.get();
        log::log!(
            target: LOG_TARGET,
            level.log_level(),
            "{:indent$}[{}] {}",
            "",
            category,
            message,
            indent = depth * 2
        );
        self.entries.borrow_mut().push(TraceEntry {
            level,
            category: category.to_string(),
            message: message.to_string(),
            offset: self.started.elapsed(),
            depth,
        });
    }

    /// Records an error with its full source chain.
    pub fn add_error(&self, level: TraceLevel, category: &str, error: &dyn std::error::Error) {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        self.add(level, category, &message);
    }

    /// Opens a nested section. Pair with [`TraceLog::end`].
    pub fn begin(&self, level: TraceLevel, category: &str, message: &str) {
        self.add(level, category, message);
        self.depth.set(self.depth.get() + 1);
    }

    pub fn end(&self, level: TraceLevel, category: &str, message: &str) {
        self.depth.set(self.depth.get().saturating_sub(1));
        self.add(level, category, message);
    }

    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    pub fn entries(&self) -> Vec<TraceEntry> {
        self.entries.borrow().clone()
    }

    /// Entries at or above `level`
    pub fn entries_at_least(&self, level: TraceLevel) -> Vec<TraceEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.level >= level)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.depth.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_level_filters_entries() {
        let log = TraceLog::new(TraceRecordLevel::Warnings);
        log.add(TraceLevel::Message, "Doc", "ignored");
        log.add(TraceLevel::Error, "Doc", "kept");

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
        assert!(!log.should_log(TraceLevel::Verbose));
    }

    #[test]
    fn test_off_records_nothing() {
        let log = TraceLog::new(TraceRecordLevel::Off);
        log.add(TraceLevel::Failure, "Doc", "still ignored");
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_begin_end_tracks_depth() {
        let log = TraceLog::new(TraceRecordLevel::All);
        log.begin(TraceLevel::Debug, "Init", "outer");
        log.add(TraceLevel::Debug, "Init", "inner");
        log.end(TraceLevel::Debug, "Init", "outer done");

        let depths: Vec<usize> = log.entries().iter().map(|e| e.depth).collect();
        assert_eq!(depths, vec![0, 1, 0]);
        assert_eq!(log.depth(), 0);
    }

    #[test]
    fn test_add_error_includes_sources() {
        let log = TraceLog::new(TraceRecordLevel::All);
        let io = std::io::Error::other("disk gone");
        log.add_error(TraceLevel::Error, "Load", &io);
        assert!(log.entries_at_least(TraceLevel::Error)[0].message.contains("disk gone"));
    }
}
