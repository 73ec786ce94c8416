//! Navigation history for list locations

/// The navigation primitive the synchronizer writes through
pub trait Navigator {
    /// Current location
    fn current(&self) -> &str;

    /// Navigate to `location`, discarding any forward entries
    fn push(&mut self, location: String);

    /// Step back; returns `false` at the oldest entry
    fn back(&mut self) -> bool;

    /// Step forward; returns `false` at the newest entry
    fn forward(&mut self) -> bool;
}

/// In-memory back/forward stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    position: usize,
}

impl History {
    /// Start a history at `location`
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            entries: vec![location.into()],
            position: 0,
        }
    }

    /// Number of entries, including forward ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A history always holds its starting entry
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.position > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.position + 1 < self.entries.len()
    }
}

impl Navigator for History {
    fn current(&self) -> &str {
        &self.entries[self.position]
    }

    fn push(&mut self, location: String) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location);
        self.position = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.position += 1;
            true
        } else {
            false
        }
    }
}
