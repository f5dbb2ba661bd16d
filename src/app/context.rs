use crate::domain::InstallConfig;
use crate::ports::{
    AccountStore, DatabaseProbe, EnvFileStore, PermissionInspector, PlatformInspector, Prompter,
};

/// Application context holding the loaded configuration and the ports setup runs against.
pub struct AppContext<'a> {
    config: InstallConfig,
    prompter: &'a dyn Prompter,
    platform: &'a dyn PlatformInspector,
    permissions: &'a dyn PermissionInspector,
    env_files: &'a dyn EnvFileStore,
    probe: &'a dyn DatabaseProbe,
    accounts: &'a dyn AccountStore,
}

/// Port implementations handed to `AppContext::new`.
pub struct Ports<'a> {
    pub prompter: &'a dyn Prompter,
    pub platform: &'a dyn PlatformInspector,
    pub permissions: &'a dyn PermissionInspector,
    pub env_files: &'a dyn EnvFileStore,
    pub probe: &'a dyn DatabaseProbe,
    pub accounts: &'a dyn AccountStore,
}

impl<'a> AppContext<'a> {
    pub fn new(config: InstallConfig, ports: Ports<'a>) -> Self {
        Self {
            config,
            prompter: ports.prompter,
            platform: ports.platform,
            permissions: ports.permissions,
            env_files: ports.env_files,
            probe: ports.probe,
            accounts: ports.accounts,
        }
    }

    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter
    }

    pub fn platform(&self) -> &dyn PlatformInspector {
        self.platform
    }

    pub fn permissions(&self) -> &dyn PermissionInspector {
        self.permissions
    }

    pub fn env_files(&self) -> &dyn EnvFileStore {
        self.env_files
    }

    pub fn probe(&self) -> &dyn DatabaseProbe {
        self.probe
    }

    pub fn accounts(&self) -> &dyn AccountStore {
        self.accounts
    }
}
