//! Shell completion support for boxoffice
//!
//! Completion scripts are generated from the clap command tree; the
//! candidate lists here cover values clap cannot know, such as config keys.

use clap::Command;
use clap_complete::Shell;
use std::io::Write;

/// A completion suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The value to insert
    pub value: String,
    /// Optional help text shown alongside
    pub help: Option<String>,
}

impl Candidate {
    /// Create a new candidate with just a value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            help: None,
        }
    }

    /// Add help text to the candidate
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Known configuration keys for `config set/get`
#[must_use]
pub fn config_keys() -> Vec<Candidate> {
    vec![
        Candidate::new("api_url").with_help("Origin of the ticketing API"),
        Candidate::new("page_size").with_help("Rows per list page"),
        Candidate::new("debounce_ms").with_help("Quiet period before a typed search applies"),
        Candidate::new("search_min_length").with_help("Shortest search that is sent"),
        Candidate::new("session_path").with_help("Where the signed-in session is kept"),
        Candidate::new("quiet").with_help("Suppress informational output"),
    ]
}

/// Generate a completion script for `shell`
///
/// # Arguments
/// * `shell` - Target shell (bash, zsh, fish, powershell, elvish)
/// * `cmd` - The clap Command to generate completions for
pub fn generate_static<W: Write>(shell: Shell, cmd: &mut Command, buf: &mut W) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::KEYS;
    use clap::CommandFactory;

    #[test]
    fn test_config_keys_match_settings() {
        let values: Vec<String> = config_keys().into_iter().map(|c| c.value).collect();
        assert_eq!(values, KEYS);
        assert!(config_keys().iter().all(|c| c.help.is_some()));
    }

    #[test]
    fn test_bash_script_mentions_commands() {
        let mut buf = Vec::new();
        generate_static(Shell::Bash, &mut Cli::command(), &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("boxoffice"));
        assert!(script.contains("orders"));
        assert!(script.contains("forgot-password"));
    }
}
