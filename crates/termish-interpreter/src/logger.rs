//! User-visible session log

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub severity: Severity,
    pub message: String,
}

/// Append-only list of entries that a host renders. `clear` empties it and
/// bumps the epoch so that hosts can tell a clear from an unchanged log.
#[derive(Debug, Default)]
pub struct Logger {
    entries: Vec<Entry>,
    epoch: usize,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an informational entry, returning the entry count
    pub fn log(&mut self, message: impl Into<String>) -> usize {
        self.push(Severity::Info, message.into())
    }

    pub fn warn(&mut self, message: impl Into<String>) -> usize {
        self.push(Severity::Warning, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> usize {
        self.push(Severity::Error, message.into())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.epoch += 1;
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries appended after the first `cursor` ones
    #[must_use]
    pub fn since(&self, cursor: usize) -> &[Entry] {
        self.entries.get(cursor..).unwrap_or_default()
    }

    /// Number of times the log has been cleared
    #[must_use]
    pub const fn epoch(&self) -> usize {
        self.epoch
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages only, one per entry
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.message.as_str()).collect()
    }

    fn push(&mut self, severity: Severity, message: String) -> usize {
        self.entries.push(Entry { severity, message });
        self.entries.len()
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}
