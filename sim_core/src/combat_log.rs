//! CombatLog - Append-only, timestamped combat log sink

use serde::{Deserialize, Serialize};

/// One line of the combat log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Simulated time in seconds
    pub time: f64,
    pub message: String,
}

/// Combat log owned by one actor
///
/// Disabled logs skip message formatting entirely, which keeps batch runs
/// cheap. The engine writes to it and never reads it back.
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    enabled: bool,
    now: f64,
    entries: Vec<LogEntry>,
}

impl CombatLog {
    pub fn new(enabled: bool) -> Self {
        CombatLog {
            enabled,
            now: 0.0,
            entries: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set the timestamp used for subsequent entries
    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    /// Append a line, building the message only when recording
    pub fn record(&mut self, message: impl FnOnce() -> String) {
        if self.enabled {
            self.entries.push(LogEntry {
                time: self.now,
                message: message(),
            });
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Move the recorded lines out, leaving the log empty
    pub fn take_entries(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Count lines containing the given text
    pub fn count_containing(&self, needle: &str) -> usize {
        self.entries.iter().filter(|e| e.message.contains(needle)).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.now = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_log_records_nothing() {
        let mut log = CombatLog::new(false);
        log.record(|| panic!("message should not be built"));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_entries_are_timestamped_in_order() {
        let mut log = CombatLog::new(true);
        log.record(|| "first".to_string());
        log.set_time(2.5);
        log.record(|| "second".to_string());

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].time, 0.0);
        assert_eq!(log.entries()[1].time, 2.5);
        assert_eq!(log.count_containing("sec"), 1);
    }
}
