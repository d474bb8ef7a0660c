//! User-visible activity log.
//!
//! Tool reports and load results are appended here for display. A message identical to
//! the previous one bumps that entry's repeat count instead of adding a line.

use std::fmt;
use std::time::{Duration, Instant};

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// Message text.
    pub message: String,
    /// How many consecutive times it was written.
    pub count: u32,
    /// Time since the log was created when the message was first written.
    pub elapsed: Duration,
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>8.2}s] {}", self.elapsed.as_secs_f32(), self.message)?;
        if self.count > 1 {
            write!(f, " (x{})", self.count)?;
        }
        Ok(())
    }
}

/// Append-only report list with consecutive-duplicate folding.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    started: Instant,
    entries: Vec<ActivityEntry>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLog {
    /// Creates an empty log; elapsed times count from now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            entries: Vec::new(),
        }
    }

    /// Appends `message`, folding it into the last entry if identical.
    pub fn write(&mut self, message: impl Into<String>) {
        let message = message.into();
        if let Some(last) = self.entries.last_mut()
            && last.message == message
        {
            last.count += 1;
            return;
        }
        self.entries.push(ActivityEntry {
            message,
            count: 1,
            elapsed: self.started.elapsed(),
        });
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }

    /// Number of entries (after folding).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_duplicates_fold() {
        let mut log = ActivityLog::new();
        log.write("a");
        log.write("a");
        log.write("b");
        log.write("a");

        let counts: Vec<_> = log.entries().iter().map(|e| (e.message.as_str(), e.count)).collect();
        assert_eq!(counts, vec![("a", 2), ("b", 1), ("a", 1)]);
    }

    #[test]
    fn test_display_shows_repeat_count() {
        let entry = ActivityEntry {
            message: "No base voxel found to place above.".into(),
            count: 3,
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(
            entry.to_string(),
            "[    1.50s] No base voxel found to place above. (x3)"
        );
    }

    #[test]
    fn test_clear() {
        let mut log = ActivityLog::new();
        log.write("x");
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
