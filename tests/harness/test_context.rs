//! Shared testing harness for `lci` integration tests.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway Laravel-like application root.
pub(crate) struct TestContext {
    root: TempDir,
    app_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated application directory.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let app_dir = root.path().join("app");
        fs::create_dir_all(&app_dir).expect("Failed to create test app directory");
        Self { root, app_dir }
    }

    pub(crate) fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Directory outside the application, for `--path` invocations.
    pub(crate) fn outside_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `lci` binary inside the application.
    pub(crate) fn cli(&self) -> Command {
        self.cli_in(self.app_dir())
    }

    pub(crate) fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("lci").expect("Failed to locate lci binary");
        cmd.current_dir(dir.as_ref()).env_remove("RUST_LOG");
        cmd
    }

    pub(crate) fn config_path(&self) -> PathBuf {
        self.app_dir.join("config/install.toml")
    }

    pub(crate) fn read_config(&self) -> String {
        fs::read_to_string(self.config_path()).expect("Failed to read config/install.toml")
    }

    pub(crate) fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().expect("config path has a parent"))
            .expect("Failed to create config directory");
        fs::write(path, content).expect("Failed to write config/install.toml");
    }

    pub(crate) fn write_file(&self, relative: &str, content: &str) {
        let path = self.app_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// Run `action` with the process working directory set to the application root.
    pub(crate) fn with_work_dir<F, R>(&self, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::current_dir().expect("Failed to capture current dir");
        env::set_current_dir(&self.app_dir).expect("Failed to switch current dir");
        let result = action();
        env::set_current_dir(original).expect("Failed to restore current dir");
        result
    }
}
