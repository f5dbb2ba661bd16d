//! Field-by-field collection of the account form.
//!
//! Each field runs its own retry loop: prompt, validate, then accept or
//! re-prompt. Confirmation fields add a nested loop comparing the entry with
//! the value of the field they match.

use crate::domain::AppError;
use crate::domain::form::{FieldKind, FieldValue, FormField, FormSession, humanize};
use crate::ports::Prompter;

#[derive(Debug)]
enum FieldState {
    Prompt,
    /// The matched field has no value yet; collect it before confirming.
    RecollectMatch(String),
    PromptConfirm(String),
    Validate(FieldValue),
}

pub struct FormCollector<'a> {
    prompter: &'a dyn Prompter,
    fields: &'a [FormField],
}

impl<'a> FormCollector<'a> {
    pub fn new(prompter: &'a dyn Prompter, fields: &'a [FormField]) -> Self {
        Self { prompter, fields }
    }

    /// Collect every field in declared order.
    ///
    /// A field already filled in by an earlier confirmation is not asked again.
    pub fn collect(&self) -> Result<FormSession, AppError> {
        let mut session = FormSession::new();
        for field in self.fields {
            if session.contains(&field.key) {
                tracing::debug!(key = %field.key, "field already collected, skipping");
                continue;
            }
            let value = self.collect_field(field, &mut session)?;
            session.insert(field.key.clone(), value);
        }
        Ok(session)
    }

    fn collect_field(&self, field: &FormField, session: &mut FormSession) -> Result<FieldValue, AppError> {
        let mut state = FieldState::Prompt;
        loop {
            state = match state {
                FieldState::Prompt => match &field.kind {
                    FieldKind::Confirm { matches } if session.contains(matches) => {
                        FieldState::PromptConfirm(matches.clone())
                    }
                    FieldKind::Confirm { matches } => FieldState::RecollectMatch(matches.clone()),
                    _ => FieldState::Validate(self.render(field)?),
                },
                FieldState::RecollectMatch(target) => {
                    self.prompter.error(&format!(
                        "{} must be entered before {}.",
                        self.label_of(&target),
                        field.label
                    ));
                    let value = self.recollect(&target)?;
                    session.insert(target.clone(), value);
                    FieldState::PromptConfirm(target)
                }
                FieldState::PromptConfirm(target) => {
                    let entered = FieldValue::Text(self.prompter.password(&field.label, field.required)?);
                    if session.get(&target) == Some(&entered) {
                        FieldState::Validate(entered)
                    } else {
                        self.prompter.error(&format!(
                            "The {} field confirmation does not match.",
                            target.replace('_', " ")
                        ));
                        FieldState::PromptConfirm(target)
                    }
                }
                FieldState::Validate(value) => match field.rules.validate(&field.key, &value) {
                    Ok(()) => return Ok(value),
                    Err(message) => {
                        self.prompter.error(&message);
                        FieldState::Prompt
                    }
                },
            };
        }
    }

    fn render(&self, field: &FormField) -> Result<FieldValue, AppError> {
        let prompter = self.prompter;
        let label = field.label.as_str();
        Ok(match &field.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Textarea => {
                FieldValue::Text(prompter.text(label, None, field.required)?)
            }
            FieldKind::Password | FieldKind::Confirm { .. } => {
                FieldValue::Text(prompter.password(label, field.required)?)
            }
            FieldKind::Select { options } => FieldValue::Text(prompter.select(label, options, 0)?),
            FieldKind::MultiSelect { options } => FieldValue::List(prompter.multiselect(label, options)?),
            FieldKind::MultiSearch { options, placeholder } => {
                FieldValue::List(prompter.multisearch(label, options, placeholder)?)
            }
        })
    }

    fn declared(&self, key: &str) -> Option<&FormField> {
        self.fields
            .iter()
            .find(|field| field.key == key && !matches!(field.kind, FieldKind::Confirm { .. }))
    }

    fn label_of(&self, key: &str) -> String {
        self.declared(key).map(|field| field.label.clone()).unwrap_or_else(|| humanize(key))
    }

    /// Ask for a matched field out of order, validating it like its own turn would.
    fn recollect(&self, key: &str) -> Result<FieldValue, AppError> {
        match self.declared(key) {
            Some(target) => loop {
                let value = self.render(target)?;
                match target.rules.validate(&target.key, &value) {
                    Ok(()) => return Ok(value),
                    Err(message) => self.prompter.error(&message),
                }
            },
            None => Ok(FieldValue::Text(self.prompter.password(&humanize(key), true)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{FieldDescriptor, resolve_fields};
    use crate::testing::{Answer, ScriptedPrompter};

    fn field(field_type: &str, key: &str, rules: Option<&str>) -> FieldDescriptor {
        FieldDescriptor {
            field_type: Some(field_type.to_string()),
            key: Some(key.to_string()),
            rules: rules.map(str::to_string),
            ..FieldDescriptor::default()
        }
    }

    fn confirm(key: &str, matches: &str) -> FieldDescriptor {
        FieldDescriptor { matches: Some(matches.to_string()), required: true, ..field("confirm", key, None) }
    }

    fn choices(field_type: &str, key: &str, options: &[&str]) -> FieldDescriptor {
        FieldDescriptor {
            options: options.iter().map(|o| o.to_string()).collect(),
            ..field(field_type, key, Some("nullable"))
        }
    }

    fn collect(descriptors: Vec<FieldDescriptor>, prompter: &ScriptedPrompter) -> FormSession {
        let (fields, malformed) = resolve_fields(&descriptors);
        assert!(malformed.is_empty());
        FormCollector::new(prompter, &fields).collect().unwrap()
    }

    #[test]
    fn invalid_value_reprompts_same_field_only() {
        let prompter = ScriptedPrompter::new([
            Answer::text("Al"),
            Answer::text("Alice"),
            Answer::text("alice@example.com"),
        ]);
        let session = collect(
            vec![field("text", "name", Some("required|min:3")), field("email", "email", Some("required|email"))],
            &prompter,
        );

        assert_eq!(session.get("name"), Some(&FieldValue::Text("Alice".into())));
        assert_eq!(session.get("email"), Some(&FieldValue::Text("alice@example.com".into())));
        assert_eq!(prompter.errors(), vec!["The name field must be at least 3 characters.".to_string()]);
        assert!(prompter.is_exhausted());
    }

    #[test]
    fn mismatched_confirmation_is_reprompted() {
        let prompter = ScriptedPrompter::new([
            Answer::text("secret123"),
            Answer::text("secret124"),
            Answer::text("nope"),
            Answer::text("secret123"),
        ]);
        let session = collect(
            vec![field("password", "password", Some("required|min:6")), confirm("password_confirmation", "password")],
            &prompter,
        );

        assert_eq!(session.get("password_confirmation"), Some(&FieldValue::Text("secret123".into())));
        assert_eq!(prompter.errors().len(), 2);
        assert!(prompter.errors()[0].contains("confirmation does not match"));
    }

    #[test]
    fn confirmation_before_its_match_recollects_the_match() {
        let prompter = ScriptedPrompter::new([
            // emergency prompt for `password`, validated by its own rules
            Answer::text("short"),
            Answer::text("longenough"),
            Answer::text("longenough"),
            Answer::text("Ada"),
        ]);
        let session = collect(
            vec![
                confirm("password_confirmation", "password"),
                field("password", "password", Some("required|min:6")),
                field("text", "name", Some("required")),
            ],
            &prompter,
        );

        assert_eq!(session.get("password"), Some(&FieldValue::Text("longenough".into())));
        assert_eq!(session.get("password_confirmation"), Some(&FieldValue::Text("longenough".into())));
        assert_eq!(session.get("name"), Some(&FieldValue::Text("Ada".into())));
        assert!(prompter.errors()[0].contains("must be entered before"));
        assert!(prompter.is_exhausted());
    }

    #[test]
    fn confirmation_of_undeclared_field_asks_for_it() {
        let prompter = ScriptedPrompter::new([Answer::text("pin1234"), Answer::text("pin1234")]);
        let session = collect(vec![confirm("pin_confirmation", "pin")], &prompter);
        assert_eq!(session.get("pin"), Some(&FieldValue::Text("pin1234".into())));
    }

    #[test]
    fn choice_fields_store_selected_values() {
        let prompter = ScriptedPrompter::new([
            Answer::select("Editor"),
            Answer::multi(&["orders", "invoices"]),
            Answer::multi(&["laravel"]),
        ]);
        let session = collect(
            vec![
                choices("select", "role", &["Admin", "Editor"]),
                choices("multiselect", "modules", &["orders", "products", "invoices"]),
                choices("multisearch", "tags", &["php", "laravel", "vue"]),
            ],
            &prompter,
        );

        assert_eq!(session.get("role"), Some(&FieldValue::Text("Editor".into())));
        assert_eq!(
            session.get("modules"),
            Some(&FieldValue::List(vec!["orders".into(), "invoices".into()]))
        );
        assert_eq!(session.get("tags"), Some(&FieldValue::List(vec!["laravel".into()])));
    }

    #[test]
    fn required_list_must_not_be_empty() {
        let prompter = ScriptedPrompter::new([Answer::multi(&[]), Answer::multi(&["products"])]);
        let mut modules = choices("multiselect", "modules", &["orders", "products"]);
        modules.rules = Some("required".into());
        let session = collect(vec![modules], &prompter);

        assert_eq!(session.get("modules"), Some(&FieldValue::List(vec!["products".into()])));
        assert_eq!(prompter.errors(), vec!["The modules field is required.".to_string()]);
    }

    #[test]
    fn abort_propagates() {
        let prompter = ScriptedPrompter::new([Answer::Abort]);
        let (fields, _) = resolve_fields(&[field("text", "name", None)]);
        let err = FormCollector::new(&prompter, &fields).collect().unwrap_err();
        assert!(matches!(err, AppError::Aborted));
    }
}
