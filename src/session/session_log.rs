//! Timestamped status messages for the front end.
//!
//! Entries render as UCI-style `info string` lines.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn render(&self) -> String {
        let tag = match self.level {
            LogLevel::Info => "",
            LogLevel::Warn => " warning:",
        };
        format!(
            "info string [{}]{} {}",
            self.at.format("%H:%M:%S"),
            tag,
            self.message
        )
    }
}

#[derive(Debug, Clone)]
pub struct SessionLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    /// Entries not yet handed out by `drain_new`.
    unread: usize,
}

impl SessionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            unread: 0,
        }
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.unread = self.unread.min(self.entries.len());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message.into());
    }

    fn push(&mut self, level: LogLevel, message: String) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            at: Local::now(),
            level,
            message,
        });
        self.unread = (self.unread + 1).min(self.entries.len());
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn last_message(&self) -> Option<&str> {
        self.entries.back().map(|e| e.message.as_str())
    }

    /// Rendered lines added since the previous call.
    pub fn drain_new(&mut self) -> Vec<String> {
        let start = self.entries.len() - self.unread;
        self.unread = 0;
        self.entries.iter().skip(start).map(LogEntry::render).collect()
    }
}
