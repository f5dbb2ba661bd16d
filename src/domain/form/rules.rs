//! Pipe-separated validation rules (`required|min:3|max:50`).
//!
//! Empty values are only checked by `required`; every other rule passes on
//! an empty value. The first failing rule, in declared order, wins.

use std::sync::LazyLock;

use regex::Regex;

use super::value::FieldValue;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex is valid"));

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    Nullable,
    String,
    Email,
    Url,
    Numeric,
    Integer,
    Alpha,
    AlphaNum,
    AlphaDash,
    Lowercase,
    Uppercase,
    Min(f64),
    Max(f64),
    Size(f64),
    Between(f64, f64),
    In(Vec<String>),
    NotIn(Vec<String>),
    StartsWith(Vec<String>),
    EndsWith(Vec<String>),
}

impl Rule {
    fn parse(token: &str) -> Result<Self, String> {
        let (name, argument) = match token.split_once(':') {
            Some((name, argument)) => (name.trim(), Some(argument)),
            None => (token.trim(), None),
        };

        let list = || -> Result<Vec<String>, String> {
            let argument = argument.ok_or_else(|| format!("rule '{name}' requires values"))?;
            Ok(argument.split(',').map(|v| v.trim().to_string()).collect())
        };
        let number = |raw: Option<&str>| -> Result<f64, String> {
            raw.and_then(|r| r.trim().parse::<f64>().ok())
                .ok_or_else(|| format!("rule '{name}' requires a numeric argument"))
        };

        let rule = match name {
            "required" => Rule::Required,
            "nullable" => Rule::Nullable,
            "string" => Rule::String,
            "email" => Rule::Email,
            "url" => Rule::Url,
            "numeric" => Rule::Numeric,
            "integer" => Rule::Integer,
            "alpha" => Rule::Alpha,
            "alpha_num" => Rule::AlphaNum,
            "alpha_dash" => Rule::AlphaDash,
            "lowercase" => Rule::Lowercase,
            "uppercase" => Rule::Uppercase,
            "min" => Rule::Min(number(argument)?),
            "max" => Rule::Max(number(argument)?),
            "size" => Rule::Size(number(argument)?),
            "between" => {
                let (low, high) = argument
                    .and_then(|a| a.split_once(','))
                    .ok_or_else(|| "rule 'between' requires two values".to_string())?;
                Rule::Between(number(Some(low))?, number(Some(high))?)
            }
            "in" => Rule::In(list()?),
            "not_in" => Rule::NotIn(list()?),
            "starts_with" => Rule::StartsWith(list()?),
            "ends_with" => Rule::EndsWith(list()?),
            other => return Err(format!("unknown validation rule '{other}'")),
        };
        Ok(rule)
    }
}

/// Parsed rule expression for one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn parse(expression: &str) -> Result<Self, String> {
        let rules = expression
            .split('|')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(Rule::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    fn numeric_sizes(&self) -> bool {
        self.rules.iter().any(|rule| matches!(rule, Rule::Numeric | Rule::Integer))
    }

    /// Validate `value`; returns the first failure message.
    pub fn validate(&self, key: &str, value: &FieldValue) -> Result<(), String> {
        let attribute = key.replace('_', " ");

        if value.is_empty() {
            if self.is_required() {
                return Err(format!("The {attribute} field is required."));
            }
            return Ok(());
        }

        for rule in &self.rules {
            if let Some(message) = self.check(rule, &attribute, value) {
                return Err(message);
            }
        }
        Ok(())
    }

    fn check(&self, rule: &Rule, attribute: &str, value: &FieldValue) -> Option<String> {
        let text = value.as_text();
        let fails_text = |predicate: &dyn Fn(&str) -> bool| match text {
            Some(text) => !predicate(text),
            None => true,
        };

        let failed = match rule {
            Rule::Required | Rule::Nullable => false,
            Rule::String => text.is_none(),
            Rule::Email => fails_text(&|t: &str| EMAIL_RE.is_match(t)),
            Rule::Url => fails_text(&|t: &str| URL_RE.is_match(t)),
            Rule::Numeric => fails_text(&|t: &str| t.trim().parse::<f64>().is_ok()),
            Rule::Integer => fails_text(&|t: &str| t.trim().parse::<i64>().is_ok()),
            Rule::Alpha => fails_text(&|t: &str| t.chars().all(char::is_alphabetic)),
            Rule::AlphaNum => fails_text(&|t: &str| t.chars().all(char::is_alphanumeric)),
            Rule::AlphaDash => {
                fails_text(&|t: &str| t.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_'))
            }
            Rule::Lowercase => fails_text(&|t: &str| t.to_lowercase() == t),
            Rule::Uppercase => fails_text(&|t: &str| t.to_uppercase() == t),
            Rule::Min(min) => self.size_of(value) < *min,
            Rule::Max(max) => self.size_of(value) > *max,
            Rule::Size(size) => self.size_of(value) != *size,
            Rule::Between(low, high) => {
                let size = self.size_of(value);
                size < *low || size > *high
            }
            Rule::In(allowed) => !items(value).iter().all(|item| allowed.contains(item)),
            Rule::NotIn(denied) => items(value).iter().any(|item| denied.contains(item)),
            Rule::StartsWith(prefixes) => {
                fails_text(&|t: &str| prefixes.iter().any(|p| t.starts_with(p.as_str())))
            }
            Rule::EndsWith(suffixes) => {
                fails_text(&|t: &str| suffixes.iter().any(|s| t.ends_with(s.as_str())))
            }
        };

        failed.then(|| self.message(rule, attribute, value))
    }

    fn size_of(&self, value: &FieldValue) -> f64 {
        match value {
            FieldValue::List(items) => items.len() as f64,
            FieldValue::Text(text) => {
                if self.numeric_sizes() {
                    if let Ok(number) = text.trim().parse::<f64>() {
                        return number;
                    }
                }
                text.chars().count() as f64
            }
        }
    }

    fn message(&self, rule: &Rule, attribute: &str, value: &FieldValue) -> String {
        let unit = match value {
            FieldValue::List(_) => SizeUnit::Items,
            FieldValue::Text(text)
                if self.numeric_sizes() && text.trim().parse::<f64>().is_ok() =>
            {
                SizeUnit::Number
            }
            FieldValue::Text(_) => SizeUnit::Characters,
        };

        match rule {
            Rule::Required | Rule::Nullable => format!("The {attribute} field is required."),
            Rule::String => format!("The {attribute} field must be a string."),
            Rule::Email => format!("The {attribute} field must be a valid email address."),
            Rule::Url => format!("The {attribute} field must be a valid URL."),
            Rule::Numeric => format!("The {attribute} field must be a number."),
            Rule::Integer => format!("The {attribute} field must be an integer."),
            Rule::Alpha => format!("The {attribute} field must only contain letters."),
            Rule::AlphaNum => {
                format!("The {attribute} field must only contain letters and numbers.")
            }
            Rule::AlphaDash => format!(
                "The {attribute} field must only contain letters, numbers, dashes, and underscores."
            ),
            Rule::Lowercase => format!("The {attribute} field must be lowercase."),
            Rule::Uppercase => format!("The {attribute} field must be uppercase."),
            Rule::Min(min) => match unit {
                SizeUnit::Characters => {
                    format!("The {attribute} field must be at least {} characters.", fmt_num(*min))
                }
                SizeUnit::Number => format!("The {attribute} field must be at least {}.", fmt_num(*min)),
                SizeUnit::Items => {
                    format!("The {attribute} field must have at least {} items.", fmt_num(*min))
                }
            },
            Rule::Max(max) => match unit {
                SizeUnit::Characters => format!(
                    "The {attribute} field must not be greater than {} characters.",
                    fmt_num(*max)
                ),
                SizeUnit::Number => {
                    format!("The {attribute} field must not be greater than {}.", fmt_num(*max))
                }
                SizeUnit::Items => format!(
                    "The {attribute} field must not have more than {} items.",
                    fmt_num(*max)
                ),
            },
            Rule::Size(size) => match unit {
                SizeUnit::Characters => {
                    format!("The {attribute} field must be {} characters.", fmt_num(*size))
                }
                SizeUnit::Number => format!("The {attribute} field must be {}.", fmt_num(*size)),
                SizeUnit::Items => {
                    format!("The {attribute} field must contain {} items.", fmt_num(*size))
                }
            },
            Rule::Between(low, high) => match unit {
                SizeUnit::Characters => format!(
                    "The {attribute} field must be between {} and {} characters.",
                    fmt_num(*low),
                    fmt_num(*high)
                ),
                SizeUnit::Number => format!(
                    "The {attribute} field must be between {} and {}.",
                    fmt_num(*low),
                    fmt_num(*high)
                ),
                SizeUnit::Items => format!(
                    "The {attribute} field must have between {} and {} items.",
                    fmt_num(*low),
                    fmt_num(*high)
                ),
            },
            Rule::In(_) | Rule::NotIn(_) => format!("The selected {attribute} is invalid."),
            Rule::StartsWith(values) => format!(
                "The {attribute} field must start with one of the following: {}.",
                values.join(", ")
            ),
            Rule::EndsWith(values) => format!(
                "The {attribute} field must end with one of the following: {}.",
                values.join(", ")
            ),
        }
    }
}

enum SizeUnit {
    Characters,
    Number,
    Items,
}

fn items(value: &FieldValue) -> Vec<String> {
    match value {
        FieldValue::Text(text) => vec![text.clone()],
        FieldValue::List(items) => items.clone(),
    }
}

fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 { format!("{}", value as i64) } else { value.to_string() }
}
