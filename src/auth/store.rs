//! Durable session storage
//!
//! A small sled database holding the signed-in session and the theme
//! preference:
//!
//! - `token`: access token
//! - `refreshToken`: refresh token
//! - `user`: JSON profile subset
//! - `theme`: `light`, `dark` or `system`; survives logout

use super::error::StoreError;
use super::types::UserProfile;
use crate::ui::theme::ThemePreference;
use sled::Db;
use std::path::Path;

const TOKEN: &str = "token";
const REFRESH_TOKEN: &str = "refreshToken";
const USER: &str = "user";
const THEME: &str = "theme";

/// Everything needed to resume a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Session store backed by sled
pub struct SessionStore {
    db: Db,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Opens or creates the store at `path`
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Sled` if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    fn get_string(&self, key: &'static str) -> Result<Option<String>, StoreError> {
        self.db
            .get(key)?
            .map(|bytes| {
                String::from_utf8(bytes.to_vec()).map_err(|e| StoreError::Corrupt {
                    key,
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.db.insert(key, value.as_bytes())?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put_string(key, value)
    }

    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.get_string(TOKEN)
    }

    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    pub fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        self.get_string(REFRESH_TOKEN)
    }

    /// Stored profile
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` when the entry is not a valid profile.
    pub fn user(&self) -> Result<Option<UserProfile>, StoreError> {
        self.get_string(USER)?
            .map(|json| {
                serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
                    key: USER,
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// The stored session, if all three entries are present
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` for an undecodable entry.
    pub fn load_session(&self) -> Result<Option<StoredSession>, StoreError> {
        let (Some(token), Some(refresh_token)) = (self.token()?, self.refresh_token()?) else {
            return Ok(None);
        };
        Ok(self.user()?.map(|user| StoredSession {
            token,
            refresh_token,
            user,
        }))
    }

    /// Persist a full session
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage or encoding failure.
    pub fn save_session(&self, session: &StoredSession) -> Result<(), StoreError> {
        self.save_tokens(&session.token, &session.refresh_token)?;
        self.save_user(&session.user)
    }

    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    pub fn save_tokens(&self, token: &str, refresh_token: &str) -> Result<(), StoreError> {
        self.put_string(TOKEN, token)?;
        self.put_string(REFRESH_TOKEN, refresh_token)?;
        self.db.flush()?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError` on storage or encoding failure.
    pub fn save_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(user).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.put_string(USER, &json)?;
        self.db.flush()?;
        Ok(())
    }

    /// Remove the session entries; the theme stays
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    pub fn clear_session(&self) -> Result<(), StoreError> {
        for key in [TOKEN, REFRESH_TOKEN, USER] {
            self.db.remove(key)?;
        }
        self.db.flush()?;
        Ok(())
    }

    /// Stored theme; unknown values read as the default
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    pub fn theme(&self) -> Result<ThemePreference, StoreError> {
        Ok(self
            .get_string(THEME)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StoreError` on storage failure.
    pub fn set_theme(&self, theme: ThemePreference) -> Result<(), StoreError> {
        self.put_string(THEME, theme.as_str())?;
        self.db.flush()?;
        Ok(())
    }
}
