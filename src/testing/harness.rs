use super::{FakeDatabase, FakePermissions, FakePlatform, MemoryEnvStore, ScriptedPrompter};
use crate::app::{AppContext, Ports};
use crate::domain::InstallConfig;

/// Fakes for every port plus a config, ready to build an `AppContext`.
pub struct TestHarness {
    pub config: InstallConfig,
    pub prompter: ScriptedPrompter,
    pub platform: FakePlatform,
    pub permissions: FakePermissions,
    pub env: MemoryEnvStore,
    pub database: FakeDatabase,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::with_config("min_php_version = \"8.2.0\"\n")
    }
}

impl TestHarness {
    pub fn with_config(content: &str) -> Self {
        Self {
            config: InstallConfig::parse(content).unwrap(),
            prompter: ScriptedPrompter::default(),
            platform: FakePlatform::default(),
            permissions: FakePermissions::default(),
            env: MemoryEnvStore::default(),
            database: FakeDatabase::default(),
        }
    }

    pub fn with_context<T>(&self, f: impl FnOnce(&AppContext<'_>) -> T) -> T {
        let ctx = AppContext::new(
            self.config.clone(),
            Ports {
                prompter: &self.prompter,
                platform: &self.platform,
                permissions: &self.permissions,
                env_files: &self.env,
                probe: &self.database,
                accounts: &self.database,
            },
        );
        f(&ctx)
    }
}
