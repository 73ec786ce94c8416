//! Theme command - show or change the stored light/dark preference

use super::Result;
use crate::auth::SessionStore;
use crate::ui::{Appearance, OutputWriter, ThemePreference};

/// Show the stored preference, or store `theme`
///
/// # Errors
/// Returns `StoreError` if the session store cannot be read or written
pub fn execute(store: &SessionStore, output: &dyn OutputWriter, theme: Option<ThemePreference>) -> Result<()> {
    match theme {
        Some(theme) => {
            store.set_theme(theme)?;
            output.success(&format!("Theme set to {theme}"));
        }
        None => {
            let theme = store.theme()?;
            let resolved = match theme.resolve() {
                Appearance::Light => "light",
                Appearance::Dark => "dark",
            };
            if theme == ThemePreference::System {
                output.write(&format!("{theme} ({resolved})"));
            } else {
                output.write(theme.as_str());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestStore;
    use crate::ui::{MessageLevel, StatusBarWriter};

    #[test]
    fn test_set_then_show() {
        let test_store = TestStore::new();
        let output = StatusBarWriter::new();

        execute(test_store.store(), &output, Some(ThemePreference::Light)).unwrap();
        execute(test_store.store(), &output, None).unwrap();

        let messages = output.recent_messages();
        assert_eq!(messages[0], (MessageLevel::Success, "Theme set to light".to_string()));
        assert_eq!(messages[1], (MessageLevel::Normal, "light".to_string()));
    }

    #[test]
    fn test_default_is_system() {
        let test_store = TestStore::new();
        let output = StatusBarWriter::new();

        execute(test_store.store(), &output, None).unwrap();

        let (_, text) = output.latest_message().unwrap();
        assert!(text.starts_with("system ("));
    }
}
