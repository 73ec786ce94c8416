//! Scripted user input for testing

use super::input::{Result, UserInput};
use crate::list::Confirmer;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    Select(usize),
    Cancel,
}

/// Input that replays predetermined answers in order
///
/// Useful for testing commands without user interaction. A prompt with no
/// answer left is treated as cancelled; a mismatched answer kind panics.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Shorthand for a script of text answers
    #[must_use]
    pub fn texts<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(answers.into_iter().map(|a| Answer::Text(a.to_string())))
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front()
    }
}

impl UserInput for ScriptedInput {
    fn prompt_text(&self, prompt: &str, default: Option<&str>, _allow_empty: bool) -> Result<Option<String>> {
        Ok(match self.next(prompt) {
            Some(Answer::Text(text)) if text.is_empty() => default.map(str::to_string).or(Some(text)),
            Some(Answer::Text(text)) => Some(text),
            Some(Answer::Cancel) | None => None,
            Some(other) => panic!("expected text answer for '{prompt}', got {other:?}"),
        })
    }

    fn prompt_password(&self, prompt: &str) -> Result<Option<String>> {
        self.prompt_text(prompt, None, false)
    }

    fn prompt_confirm(&self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        Ok(match self.next(prompt) {
            Some(Answer::Confirm(yes)) => Some(yes),
            Some(Answer::Cancel) | None => None,
            Some(other) => panic!("expected confirm answer for '{prompt}', got {other:?}"),
        })
    }

    fn prompt_select(&self, prompt: &str, _items: &[String], _default: Option<usize>) -> Result<Option<usize>> {
        Ok(match self.next(prompt) {
            Some(Answer::Select(index)) => Some(index),
            Some(Answer::Cancel) | None => None,
            Some(other) => panic!("expected select answer for '{prompt}', got {other:?}"),
        })
    }
}

impl Confirmer for ScriptedInput {
    fn confirm(&self, prompt: &str) -> bool {
        matches!(self.prompt_confirm(prompt, false), Ok(Some(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let input = ScriptedInput::new([Answer::Text("Jazz".into()), Answer::Confirm(true)]);
        assert_eq!(input.prompt_text("Name", None, false).unwrap().as_deref(), Some("Jazz"));
        assert!(input.confirm("Sure?"));
        assert_eq!(input.prompts(), vec!["Name", "Sure?"]);
    }

    #[test]
    fn test_empty_text_takes_default() {
        let input = ScriptedInput::texts([""]);
        assert_eq!(
            input.prompt_text("Name", Some("Rock"), true).unwrap().as_deref(),
            Some("Rock")
        );
    }

    #[test]
    fn test_exhausted_script_cancels() {
        let input = ScriptedInput::default();
        assert!(input.prompt_select("Pick", &[], None).unwrap().is_none());
        assert!(!input.confirm("Delete?"));
    }
}
