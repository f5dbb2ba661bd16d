use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input, MultiSelect, Password, Select};

use crate::domain::AppError;
use crate::domain::form::filter_options;
use crate::ports::Prompter;

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Clone, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_error(label: &str, err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(io) if io.kind() == ErrorKind::Interrupted => AppError::Aborted,
        other => AppError::Prompt(format!("{}: {}", label, other)),
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, label: &str, default: Option<&str>, required: bool) -> Result<String, AppError> {
        let mut input = Input::<String>::new().with_prompt(label).allow_empty(!required);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| prompt_error(label, e))
    }

    fn password(&self, label: &str, required: bool) -> Result<String, AppError> {
        Password::new()
            .with_prompt(label)
            .allow_empty_password(!required)
            .interact()
            .map_err(|e| prompt_error(label, e))
    }

    fn select(&self, label: &str, options: &[String], default: usize) -> Result<String, AppError> {
        let index = Select::new()
            .with_prompt(label)
            .items(options)
            .default(default.min(options.len().saturating_sub(1)))
            .interact()
            .map_err(|e| prompt_error(label, e))?;
        options
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::Prompt(format!("{}: no option selected", label)))
    }

    fn multiselect(&self, label: &str, options: &[String]) -> Result<Vec<String>, AppError> {
        let indexes = MultiSelect::new()
            .with_prompt(label)
            .items(options)
            .interact()
            .map_err(|e| prompt_error(label, e))?;
        Ok(indexes.into_iter().filter_map(|i| options.get(i).cloned()).collect())
    }

    fn multisearch(
        &self,
        label: &str,
        options: &[String],
        placeholder: &str,
    ) -> Result<Vec<String>, AppError> {
        let mut chosen: Vec<String> = Vec::new();
        loop {
            let query: String = Input::new()
                .with_prompt(format!("{} ({})", label, placeholder))
                .allow_empty(true)
                .interact_text()
                .map_err(|e| prompt_error(label, e))?;

            let matches = filter_options(options, query.trim());
            if matches.is_empty() {
                println!("No options match '{}'.", query.trim());
            } else {
                let defaults: Vec<bool> = matches.iter().map(|m| chosen.contains(m)).collect();
                let picked = MultiSelect::new()
                    .with_prompt(label)
                    .items(&matches)
                    .defaults(&defaults)
                    .interact()
                    .map_err(|e| prompt_error(label, e))?;
                chosen.retain(|item| !matches.contains(item));
                chosen.extend(picked.into_iter().filter_map(|i| matches.get(i).cloned()));
            }

            let again = Confirm::new()
                .with_prompt("Search again?")
                .default(false)
                .interact()
                .map_err(|e| prompt_error(label, e))?;
            if !again {
                break;
            }
        }

        // Keep option order regardless of search order.
        Ok(options.iter().filter(|option| chosen.contains(option)).cloned().collect())
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool, AppError> {
        Confirm::new().with_prompt(label).default(default).interact().map_err(|e| prompt_error(label, e))
    }

    fn error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}
