use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::rules::RuleSet;

/// Keys become column names in the account insert.
static COLUMN_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("column key regex is valid"));

/// A field as declared in `install.toml`, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub key: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub rules: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "match")]
    pub matches: Option<String>,
    pub placeholder: Option<String>,
}

/// Rendering variant of a resolved field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
    Password,
    /// Re-entry of another field's value (e.g. password confirmation).
    Confirm { matches: String },
    Select { options: Vec<String> },
    MultiSelect { options: Vec<String> },
    MultiSearch { options: Vec<String>, placeholder: String },
}

impl FieldKind {
    /// Whether the collected value is written to the account record.
    pub fn is_persisted(&self) -> bool {
        !matches!(self, FieldKind::Confirm { .. })
    }

    /// Whether the field collects several values rather than one string.
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::MultiSelect { .. } | FieldKind::MultiSearch { .. })
    }
}

/// A validated, renderable form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub required: bool,
    pub rules: RuleSet,
    pub kind: FieldKind,
}

/// A descriptor that cannot be rendered; reported and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedField {
    pub index: usize,
    pub key: Option<String>,
    pub reason: String,
}

impl fmt::Display for MalformedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "field #{} ('{}'): {}", self.index + 1, key, self.reason),
            None => write!(f, "field #{}: {}", self.index + 1, self.reason),
        }
    }
}

impl FieldDescriptor {
    /// Resolve into a `FormField`, applying label and rule fallbacks.
    pub fn resolve(&self, index: usize) -> Result<FormField, MalformedField> {
        let malformed =
            |reason: String| MalformedField { index, key: self.key.clone(), reason };

        let field_type = self
            .field_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| malformed("missing 'type'".to_string()))?;
        let key = self
            .key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| malformed("missing 'key'".to_string()))?;
        if !COLUMN_KEY_RE.is_match(key) {
            return Err(malformed(format!("key '{key}' is not a valid column name")));
        }

        let choices = |kind: &str| -> Result<Vec<String>, MalformedField> {
            if self.options.is_empty() {
                Err(malformed(format!("'{kind}' field requires 'options'")))
            } else {
                Ok(self.options.clone())
            }
        };

        let kind = match field_type {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "textarea" => FieldKind::Textarea,
            "password" => FieldKind::Password,
            "confirm" => {
                let matches = self
                    .matches
                    .as_deref()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .ok_or_else(|| malformed("'confirm' field requires 'match'".to_string()))?;
                FieldKind::Confirm { matches: matches.to_string() }
            }
            "select" => FieldKind::Select { options: choices("select")? },
            "multiselect" => FieldKind::MultiSelect { options: choices("multiselect")? },
            "multisearch" => FieldKind::MultiSearch {
                options: choices("multisearch")?,
                placeholder: self.placeholder.clone().unwrap_or_else(|| "Search...".to_string()),
            },
            other => return Err(malformed(format!("unknown field type '{other}'"))),
        };

        let label = self
            .label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| humanize(key));

        let expression = self.rules.clone().unwrap_or_else(|| {
            if self.required { "required".to_string() } else { "nullable".to_string() }
        });
        let rules = RuleSet::parse(&expression).map_err(malformed)?;

        Ok(FormField {
            key: key.to_string(),
            label,
            required: self.required || rules.is_required(),
            rules,
            kind,
        })
    }
}

/// "first_name" -> "First name".
pub fn humanize(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
