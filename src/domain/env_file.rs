//! `.env` document model and the comment-preserving merge engine.
//!
//! The merge walks the template line by line: blank lines, comments and unrelated
//! assignments are copied verbatim, assignments named by the overlay are rewritten
//! as `KEY="value"`, and commented placeholders (`#KEY=value`) gain an active line
//! right after them when the template has no active line for that key.

use std::collections::{BTreeMap, BTreeSet};

/// Key whose value is produced by the application-key step, never by the overlay.
pub const APP_KEY: &str = "APP_KEY";

/// One line of an environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLine {
    Blank(String),
    Comment(String),
    /// `#KEY=value`, a commented-out assignment.
    Placeholder { raw: String, key: String },
    /// `KEY=value`, an active assignment.
    Assignment { raw: String, key: String },
    /// Anything else (no `=`); preserved untouched.
    Other(String),
}

impl EnvLine {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return EnvLine::Blank(line.to_string());
        }

        if let Some(commented) = trimmed.strip_prefix('#') {
            return match assignment_key(commented.trim()) {
                Some(key) => EnvLine::Placeholder { raw: line.to_string(), key },
                None => EnvLine::Comment(line.to_string()),
            };
        }

        match assignment_key(trimmed) {
            Some(key) => EnvLine::Assignment { raw: line.to_string(), key },
            None => EnvLine::Other(line.to_string()),
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            EnvLine::Blank(raw)
            | EnvLine::Comment(raw)
            | EnvLine::Other(raw)
            | EnvLine::Placeholder { raw, .. }
            | EnvLine::Assignment { raw, .. } => raw,
        }
    }
}

/// Key of a `KEY=value` fragment, if the part before `=` is a valid variable name.
fn assignment_key(fragment: &str) -> Option<String> {
    let (key, _) = fragment.split_once('=')?;
    let key = key.trim();
    let mut chars = key.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        Some(key.to_string())
    } else {
        None
    }
}

/// User-supplied values to merge into a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    values: BTreeMap<String, String>,
}

impl EnvOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvOverlay {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overlay = Self::new();
        for (key, value) in iter {
            overlay.insert(key, value);
        }
        overlay
    }
}

/// A parsed environment file with its line order preserved.
///
/// Each line keeps its own terminator (`\r\n`, `\n`, or none on a final
/// unterminated line), so rendering an unmodified document reproduces the
/// source byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvDocument {
    lines: Vec<(EnvLine, &'static str)>,
}

fn split_terminator(piece: &str) -> (&str, &'static str) {
    if let Some(line) = piece.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = piece.strip_suffix('\n') {
        (line, "\n")
    } else {
        (piece, "")
    }
}

impl EnvDocument {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .split_inclusive('\n')
            .map(|piece| {
                let (line, ending) = split_terminator(piece);
                (EnvLine::parse(line), ending)
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> impl Iterator<Item = &EnvLine> {
        self.lines.iter().map(|(line, _)| line)
    }

    /// Terminator used for lines the merge inserts: the first one in the source.
    fn line_ending(&self) -> &'static str {
        self.lines.iter().map(|(_, ending)| *ending).find(|ending| !ending.is_empty()).unwrap_or("\n")
    }

    pub fn render(&self) -> String {
        self.lines.iter().flat_map(|(line, ending)| [line.raw(), ending]).collect()
    }

    fn has_assignment(&self, key: &str) -> bool {
        self.lines().any(|line| matches!(line, EnvLine::Assignment { key: k, .. } if k == key))
    }

    /// Overlay user values onto this document.
    pub fn merge(&self, overlay: &EnvOverlay) -> EnvDocument {
        let active: BTreeSet<&str> = overlay.keys().filter(|key| self.has_assignment(key)).collect();
        let inserted_ending = self.line_ending();
        let mut emitted: BTreeSet<String> = BTreeSet::new();
        let mut lines = Vec::with_capacity(self.lines.len());

        for (line, ending) in &self.lines {
            match line {
                EnvLine::Placeholder { key, .. }
                    if overlay.contains(key)
                        && !active.contains(key.as_str())
                        && !emitted.contains(key) =>
                {
                    // the inserted line takes over the placeholder's terminator
                    lines.push((line.clone(), inserted_ending));
                    lines.push((assignment_line(key, overlay.get(key).unwrap_or_default()), *ending));
                    emitted.insert(key.clone());
                }
                EnvLine::Assignment { key, .. } if overlay.contains(key) => {
                    lines.push((assignment_line(key, overlay.get(key).unwrap_or_default()), *ending));
                    emitted.insert(key.clone());
                }
                _ => lines.push((line.clone(), *ending)),
            }
        }

        for key in overlay.keys().filter(|key| !emitted.contains(*key)) {
            tracing::debug!(key, "overlay key has no matching line in template; dropped");
        }

        EnvDocument { lines }
    }

    /// Replace the value of the first active `key` line verbatim (no quoting).
    ///
    /// Returns `false` when the document has no active line for `key`.
    pub fn set_raw(&mut self, key: &str, value: &str) -> bool {
        let slot = self
            .lines
            .iter_mut()
            .find(|(line, _)| matches!(line, EnvLine::Assignment { key: k, .. } if k == key));

        match slot {
            Some((line, _)) => {
                *line = EnvLine::Assignment { raw: format!("{key}={value}"), key: key.to_string() };
                true
            }
            None => false,
        }
    }

    /// Unquoted value of the first active `key` line.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lines().find_map(|line| match line {
            EnvLine::Assignment { raw, key: k } if k == key => {
                raw.split_once('=').map(|(_, value)| unquote(value.trim()))
            }
            _ => None,
        })
    }
}

fn assignment_line(key: &str, value: &str) -> EnvLine {
    let raw = if key == APP_KEY { format!("{key}=") } else { format!("{key}={}", quote(value)) };
    EnvLine::Assignment { raw, key: key.to_string() }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].replace("\\\"", "\"").replace("\\\\", "\\")
    } else if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
