//! Output abstraction layer
//!
//! Commands report through an [`OutputWriter`] so the same code can print
//! to the terminal or feed the browser's status bar.

use colored::Colorize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    /// Secondary, dimmed
    Info,
}

/// Sink for user-facing messages
///
/// # Examples
///
/// ```
/// use boxoffice::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.success("Category created successfully");
/// output.error("Failed to load events");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write one message at `level`
    fn emit(&self, level: MessageLevel, message: &str);

    /// Drop buffered messages, where there are any
    fn clear(&self) {}

    fn write(&self, message: &str) {
        self.emit(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }
}

/// CLI implementation - writes to stdout/stderr
///
/// With `quiet` set, success and info notes are dropped; results, warnings
/// and errors still print.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl OutputWriter for StdoutWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Error => eprintln!("{} {}", "❌".red(), message),
            MessageLevel::Warning => eprintln!("{} {}", "⚠️".yellow(), message),
            MessageLevel::Normal => println!("{message}"),
            _ if self.quiet => {}
            MessageLevel::Success => println!("{} {}", "✓".green(), message),
            MessageLevel::Info => println!("{}", message.dimmed()),
        }
    }
}

type Entry = (MessageLevel, String, Instant);

/// Buffered writer for the browser status bar
///
/// Messages expire after a TTL so transient notes such as "No more pages"
/// fade without user action.
#[derive(Debug, Clone)]
pub struct StatusBarWriter {
    messages: Arc<Mutex<Vec<Entry>>>,
    ttl: Duration,
}

impl StatusBarWriter {
    /// Status bar writer with a 5 second TTL
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(5))
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    fn live(&self, now: Instant) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, _, at)| now.duration_since(*at) < self.ttl)
            .map(|(level, message, _)| (*level, message.clone()))
            .collect()
    }

    /// Messages that have not expired, oldest first
    #[must_use]
    pub fn recent_messages(&self) -> Vec<(MessageLevel, String)> {
        self.live(Instant::now())
    }

    /// Newest live message
    #[must_use]
    pub fn latest_message(&self) -> Option<(MessageLevel, String)> {
        self.live(Instant::now()).pop()
    }
}

impl Default for StatusBarWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StatusBarWriter {
    fn emit(&self, level: MessageLevel, message: &str) {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        messages.push((level, message.to_string(), Instant::now()));
        if messages.len() > 50 {
            messages.drain(0..25);
        }
    }

    fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
