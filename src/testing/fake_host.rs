use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::{AppError, PathState};
use crate::ports::{PermissionInspector, PlatformInspector};

pub struct FakePlatform {
    version: Mutex<Option<String>>,
    extensions: Mutex<Option<Vec<String>>>,
    apache_modules: Mutex<Option<Vec<String>>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            version: Mutex::new(Some("8.3.0".to_string())),
            extensions: Mutex::new(Some(Vec::new())),
            apache_modules: Mutex::new(None),
        }
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl FakePlatform {
    pub fn set_version(&self, version: &str) {
        *self.version.lock().unwrap() = Some(version.to_string());
    }

    pub fn set_extensions(&self, extensions: &[&str]) {
        *self.extensions.lock().unwrap() = Some(owned(extensions));
    }

    pub fn set_apache_modules(&self, modules: &[&str]) {
        *self.apache_modules.lock().unwrap() = Some(owned(modules));
    }

    /// Behave like a host without a PHP executable.
    pub fn set_missing(&self) {
        *self.version.lock().unwrap() = None;
        *self.extensions.lock().unwrap() = None;
    }
}

impl PlatformInspector for FakePlatform {
    fn php_version(&self) -> Result<String, AppError> {
        self.version.lock().unwrap().clone().ok_or_else(|| AppError::RuntimeNotFound("php".to_string()))
    }

    fn php_extensions(&self) -> Option<Vec<String>> {
        self.extensions.lock().unwrap().clone()
    }

    fn apache_modules(&self) -> Option<Vec<String>> {
        self.apache_modules.lock().unwrap().clone()
    }
}

/// Paths not set explicitly are reported missing.
#[derive(Default)]
pub struct FakePermissions {
    states: Mutex<HashMap<String, PathState>>,
}

impl FakePermissions {
    pub fn set(&self, path: &str, state: PathState) {
        self.states.lock().unwrap().insert(path.to_string(), state);
    }
}

impl PermissionInspector for FakePermissions {
    fn path_state(&self, relative: &str) -> PathState {
        self.states.lock().unwrap().get(relative).copied().unwrap_or(PathState::Missing)
    }
}
