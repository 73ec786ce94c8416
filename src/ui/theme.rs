//! Light/dark preference
//!
//! The preference is stored with the session and survives logout. `system`
//! follows the terminal's background as advertised in `COLORFGBG`.

use std::fmt;
use std::str::FromStr;

/// Stored theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// Concrete palette choice after resolving `system`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Resolve against the current environment
    #[must_use]
    pub fn resolve(self) -> Appearance {
        self.resolve_with(std::env::var("COLORFGBG").ok().as_deref())
    }

    /// Resolve against an explicit `COLORFGBG` value
    ///
    /// The last `;`-separated field is the background color index; 7 and
    /// 15 are light backgrounds. Anything else, or no value, is dark.
    #[must_use]
    pub fn resolve_with(self, colorfgbg: Option<&str>) -> Appearance {
        match self {
            Self::Light => Appearance::Light,
            Self::Dark => Appearance::Dark,
            Self::System => match colorfgbg
                .and_then(|value| value.rsplit(';').next())
                .and_then(|bg| bg.trim().parse::<u8>().ok())
            {
                Some(7 | 15) => Appearance::Light,
                _ => Appearance::Dark,
            },
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}
