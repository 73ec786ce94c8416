//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "PgDn", "ctrl+d")
    pub key: String,
    /// Action description (e.g., "next page")
    pub action: String,
}

impl KeyHint {
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for a list; the status hint only where a filter applies
    #[must_use]
    pub fn default_hints(filters_by_status: bool) -> Vec<KeyHint> {
        let mut hints = vec![
            KeyHint::new("PgUp/PgDn", "page"),
            KeyHint::new("ctrl+d", "delete"),
            KeyHint::new("ctrl+r", "refresh"),
        ];
        if filters_by_status {
            hints.push(KeyHint::new("TAB", "status"));
        }
        hints.push(KeyHint::new("F1", "help"));
        hints.push(KeyHint::new("ESC", "quit"));
        hints
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_hint_only_for_filtered_lists() {
        let has_tab = |hints: &[KeyHint]| hints.iter().any(|h| h.key == "TAB");
        assert!(has_tab(&HelpBar::default_hints(true)));
        assert!(!has_tab(&HelpBar::default_hints(false)));
    }
}
