//! Configuration module for boxoffice
//!
//! Settings live in `~/.config/boxoffice/config.toml` and can be overridden
//! per key with `BOXOFFICE_*` environment variables, e.g.
//! `BOXOFFICE_API_URL=https://tickets.example.com`.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "BOXOFFICE";

/// Origin used until one is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Keys accepted by `config get` and `config set`
pub const KEYS: [&str; 6] = [
    "api_url",
    "page_size",
    "debounce_ms",
    "search_min_length",
    "session_path",
    "quiet",
];

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_page_size() -> u32 {
    crate::list::PAGE_SIZE
}

const fn default_debounce_ms() -> u64 {
    300
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BoxofficeConfig {
    /// Origin of the ticketing API; `/api` is appended by the client
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Rows per list page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period before a typed search is applied
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Searches shorter than this are held back; 0 applies every search
    #[serde(default)]
    pub search_min_length: usize,

    /// Where the session store lives; defaults to the data directory
    #[serde(default)]
    pub session_path: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for BoxofficeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            search_min_length: 0,
            session_path: None,
            quiet: false,
        }
    }
}

impl BoxofficeConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("boxoffice").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
        }

        Self::load_layered(&config_path, None)
    }

    /// Read `path` and apply environment overrides
    ///
    /// `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read or a value has the wrong type.
    pub fn load_layered(path: &Path, env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Same as [`Self::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Session store location, explicit or under the data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory is unknown.
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.session_path {
            return Ok(path.clone());
        }
        dirs::data_local_dir()
            .map(|dir| dir.join("boxoffice").join("session"))
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Value of `key` as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "api_url" => self.api_url.clone(),
            "page_size" => self.page_size.to_string(),
            "debounce_ms" => self.debounce_ms.to_string(),
            "search_min_length" => self.search_min_length.to_string(),
            "session_path" => self
                .session_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "quiet" => self.quiet.to_string(),
            other => return Err(ConfigError::NotFound(other.to_string())),
        })
    }

    /// Parse and assign `value` to `key`; does not save
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys and
    /// `ConfigError::Message` for values of the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        fn parse<V: std::str::FromStr>(key: &str, value: &str) -> Result<V, ConfigError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))
        }

        match key {
            "api_url" => {
                let url = value.trim().trim_end_matches('/');
                if url.is_empty() {
                    return Err(ConfigError::Message("api_url cannot be empty".to_string()));
                }
                self.api_url = url.to_string();
            }
            "page_size" => {
                let size: u32 = parse(key, value)?;
                if size == 0 {
                    return Err(ConfigError::Message("page_size must be at least 1".to_string()));
                }
                self.page_size = size;
            }
            "debounce_ms" => self.debounce_ms = parse(key, value)?,
            "search_min_length" => self.search_min_length = parse(key, value)?,
            "session_path" => {
                self.session_path = (!value.trim().is_empty()).then(|| PathBuf::from(value.trim()));
            }
            "quiet" => self.quiet = parse(key, value)?,
            other => return Err(ConfigError::NotFound(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoxofficeConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.search_min_length, 0);
        assert!(!config.quiet);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = BoxofficeConfig::default();
        config.api_url = "https://tickets.example.com".to_string();
        config.page_size = 25;
        config.save_to(&path).unwrap();

        let loaded = BoxofficeConfig::load_layered(&path, Some(HashMap::new())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = BoxofficeConfig::load_layered(&path, Some(HashMap::new())).unwrap();
        assert!(loaded.quiet);
        assert_eq!(loaded.api_url, DEFAULT_API_URL);
        assert_eq!(loaded.debounce_ms, 300);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://file\"\npage_size = 5\n").unwrap();

        let env = HashMap::from([
            ("BOXOFFICE_API_URL".to_string(), "http://env".to_string()),
            ("BOXOFFICE_SEARCH_MIN_LENGTH".to_string(), "3".to_string()),
        ]);
        let loaded = BoxofficeConfig::load_layered(&path, Some(env)).unwrap();
        assert_eq!(loaded.api_url, "http://env");
        assert_eq!(loaded.page_size, 5);
        assert_eq!(loaded.search_min_length, 3);
    }

    #[test]
    fn test_get_and_set() {
        let mut config = BoxofficeConfig::default();
        config.set("page_size", "20").unwrap();
        config.set("api_url", "https://tickets.example.com/").unwrap();
        config.set("quiet", "true").unwrap();

        assert_eq!(config.get("page_size").unwrap(), "20");
        assert_eq!(config.get("api_url").unwrap(), "https://tickets.example.com");
        assert_eq!(config.get("quiet").unwrap(), "true");
        assert_eq!(config.get("session_path").unwrap(), "");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = BoxofficeConfig::default();
        assert!(matches!(config.set("page_size", "0"), Err(ConfigError::Message(_))));
        assert!(matches!(config.set("debounce_ms", "soon"), Err(ConfigError::Message(_))));
        assert!(matches!(config.set("color", "red"), Err(ConfigError::NotFound(_))));
        assert!(matches!(config.get("color"), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_explicit_session_path() {
        let mut config = BoxofficeConfig::default();
        config.set("session_path", "/tmp/boxoffice-session").unwrap();
        assert_eq!(config.session_path().unwrap(), PathBuf::from("/tmp/boxoffice-session"));
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = BoxofficeConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_ok(), "{key}");
        }
    }
}
