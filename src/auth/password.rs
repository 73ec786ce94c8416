//! Password strength meter
//!
//! Purely informational: the score never blocks a submission and has no
//! bearing on what the server accepts.

use std::fmt;

/// Labels indexed by score
const LABELS: [&str; 6] = ["Very Weak", "Weak", "Fair", "Good", "Strong", "Very Strong"];

/// Score in `0..=5` with its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    /// Score a password
    ///
    /// One point each for: length of at least 8, length of at least 12,
    /// mixed case, a digit, a non-alphanumeric character.
    #[must_use]
    pub fn of(password: &str) -> Self {
        let len = password.chars().count();
        let has_lower = password.chars().any(char::is_lowercase);
        let has_upper = password.chars().any(char::is_uppercase);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

        let score = [len >= 8, len >= 12, has_lower && has_upper, has_digit, has_symbol]
            .into_iter()
            .filter(|hit| *hit)
            .count();
        Self(u8::try_from(score.min(5)).unwrap_or(5))
    }

    #[must_use]
    pub const fn score(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        LABELS[self.0 as usize]
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/5)", self.label(), self.0)
    }
}
