use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Prompter;

/// One scripted operator response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Select(String),
    Multi(Vec<String>),
    Confirm(bool),
    /// Accept the prompt's default (empty for prompts without one).
    #[default]
    UseDefault,
    /// Operator pressed Ctrl-C.
    Abort,
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }

    pub fn select(value: &str) -> Self {
        Answer::Select(value.to_string())
    }

    pub fn multi(values: &[&str]) -> Self {
        Answer::Multi(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn confirm(value: bool) -> Self {
        Answer::Confirm(value)
    }
}

/// Prompter that replays a fixed list of answers and records errors shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    labels: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        let prompter = Self::default();
        prompter.push_all(answers);
        prompter
    }

    pub fn push_all(&self, answers: impl IntoIterator<Item = Answer>) {
        self.answers.lock().unwrap().extend(answers);
    }

    /// Number of prompts shown so far.
    pub fn asked(&self) -> usize {
        self.labels.lock().unwrap().len()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.lock().unwrap().is_empty()
    }

    fn next(&self, label: &str) -> Answer {
        self.labels.lock().unwrap().push(label.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt '{label}'"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, label: &str, default: Option<&str>, _required: bool) -> Result<String, AppError> {
        match self.next(label) {
            Answer::Text(value) if value.is_empty() => Ok(default.unwrap_or_default().to_string()),
            Answer::Text(value) => Ok(value),
            Answer::UseDefault => Ok(default.unwrap_or_default().to_string()),
            Answer::Abort => Err(AppError::Aborted),
            other => panic!("prompt '{label}' expects text, got {other:?}"),
        }
    }

    fn password(&self, label: &str, _required: bool) -> Result<String, AppError> {
        match self.next(label) {
            Answer::Text(value) => Ok(value),
            Answer::UseDefault => Ok(String::new()),
            Answer::Abort => Err(AppError::Aborted),
            other => panic!("prompt '{label}' expects a password, got {other:?}"),
        }
    }

    fn select(&self, label: &str, options: &[String], default: usize) -> Result<String, AppError> {
        match self.next(label) {
            Answer::Select(value) => {
                assert!(options.contains(&value), "'{value}' is not an option of '{label}'");
                Ok(value)
            }
            Answer::UseDefault => Ok(options[default].clone()),
            Answer::Abort => Err(AppError::Aborted),
            other => panic!("prompt '{label}' expects a selection, got {other:?}"),
        }
    }

    fn multiselect(&self, label: &str, options: &[String]) -> Result<Vec<String>, AppError> {
        match self.next(label) {
            Answer::Multi(values) => {
                assert!(values.iter().all(|v| options.contains(v)), "unknown option for '{label}'");
                Ok(values)
            }
            Answer::UseDefault => Ok(Vec::new()),
            Answer::Abort => Err(AppError::Aborted),
            other => panic!("prompt '{label}' expects selections, got {other:?}"),
        }
    }

    fn multisearch(
        &self,
        label: &str,
        options: &[String],
        _placeholder: &str,
    ) -> Result<Vec<String>, AppError> {
        self.multiselect(label, options)
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool, AppError> {
        match self.next(label) {
            Answer::Confirm(value) => Ok(value),
            Answer::UseDefault => Ok(default),
            Answer::Abort => Err(AppError::Aborted),
            other => panic!("prompt '{label}' expects yes/no, got {other:?}"),
        }
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
