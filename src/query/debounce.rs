//! Quiet-period buffer for search input
//!
//! Keystrokes update the buffer immediately; the value is committed only
//! after no input has arrived for the configured delay. The clock is
//! passed in by the caller, so the buffer itself never sleeps or spawns.

use std::time::{Duration, Instant};

/// Quiet period used when none is configured
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Local search buffer with a resettable commit deadline
///
/// # Examples
///
/// ```
/// use boxoffice::query::DebouncedInputBuffer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut buffer = DebouncedInputBuffer::new(Duration::from_millis(300));
/// buffer.input("ja", start);
/// buffer.input("jazz", start + Duration::from_millis(100));
///
/// assert_eq!(buffer.poll(start + Duration::from_millis(350)), None);
/// assert_eq!(buffer.poll(start + Duration::from_millis(400)), Some("jazz".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct DebouncedInputBuffer {
    value: String,
    delay: Duration,
    /// Partial values shorter than this are held; 0 disables gating
    min_len: usize,
    deadline: Option<Instant>,
}

impl DebouncedInputBuffer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            value: String::new(),
            delay,
            min_len: 0,
            deadline: None,
        }
    }

    /// Hold values of `1..min_len` characters; commit an empty value at once
    #[must_use]
    pub const fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Buffered value, which may not be committed yet
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// When the pending commit fires, if one is scheduled
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record a new buffered value and restart the quiet period
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.value = value.into();
        let len = self.value.chars().count();

        self.deadline = if self.min_len == 0 || len >= self.min_len {
            Some(now + self.delay)
        } else if len == 0 {
            Some(now)
        } else {
            None
        };
    }

    /// Commit the buffered value once its deadline has passed
    ///
    /// Returns `Some` exactly once per quiet period.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.value.clone())
            }
            _ => None,
        }
    }

    /// Drop any pending commit
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Adopt an externally committed value without scheduling a commit
    pub fn sync_from(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.deadline = None;
    }
}

impl Default for DebouncedInputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
