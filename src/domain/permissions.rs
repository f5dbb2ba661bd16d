use serde::Deserialize;

/// A path that must carry at least the given octal mode, relative to the application root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionRequirement {
    pub path: String,
    pub mode: String,
}

impl PermissionRequirement {
    /// Parse the configured octal mode ("775", "0755").
    pub fn required_bits(&self) -> Option<u32> {
        let trimmed = self.mode.trim();
        if trimmed.is_empty() || trimmed.len() > 4 {
            return None;
        }
        u32::from_str_radix(trimmed, 8).ok()
    }
}

/// Observed state of a path as reported by the host filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    /// Permission bits (`mode & 0o7777`).
    Mode(u32),
    /// Platform without unix modes; only writability is known.
    Writable(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionStatus {
    pub path: String,
    pub mode: String,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionFailure {
    pub path: String,
    pub mode: String,
}

impl PermissionStatus {
    /// A path satisfies its requirement when every required bit is set.
    pub fn evaluate(requirement: &PermissionRequirement, state: PathState) -> Self {
        let satisfied = match (requirement.required_bits(), state) {
            (None, _) | (_, PathState::Missing) => false,
            (Some(required), PathState::Mode(actual)) => actual & required == required,
            (Some(_), PathState::Writable(writable)) => writable,
        };
        Self { path: requirement.path.clone(), mode: requirement.mode.clone(), satisfied }
    }
}

pub fn failures(statuses: &[PermissionStatus]) -> Vec<PermissionFailure> {
    statuses
        .iter()
        .filter(|status| !status.satisfied)
        .map(|status| PermissionFailure { path: status.path.clone(), mode: status.mode.clone() })
        .collect()
}
