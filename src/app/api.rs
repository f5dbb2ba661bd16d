//! API Facade for the application.
//!
//! Builds production adapters for an application root and runs commands against them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::database::SqlDatabase;
use crate::adapters::dialoguer_prompter::DialoguerPrompter;
use crate::adapters::env_filesystem::FilesystemEnvStore;
use crate::adapters::permissions_filesystem::FilesystemPermissionInspector;
use crate::adapters::php_cli::PhpCliInspector;
use crate::app::config::load_install_config;
use crate::app::Ports;
use crate::app::{
    AppContext,
    commands::{install, setup},
};
use crate::ports::DatabaseProbe;

pub use crate::app::commands::install::InstallOutcome;
pub use crate::app::commands::setup::{AccountOutcome, SetupOutcome, SetupStep, SystemReport};
pub use crate::domain::{AppError, ConnectionParams, DbDriver};

/// Build the production context for `root` and hand it to `f`.
fn with_context<T>(
    root: PathBuf,
    f: impl FnOnce(&AppContext<'_>) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let config = load_install_config(&root)?;

    let prompter = DialoguerPrompter::new();
    let platform = PhpCliInspector::new(&config.runtime);
    let permissions = FilesystemPermissionInspector::new(root.clone());
    let env_files = FilesystemEnvStore::new(root.clone(), &config.environment);
    let database =
        SqlDatabase::new(root, Duration::from_secs(config.database.connect_timeout_secs));

    let ctx = AppContext::new(
        config,
        Ports {
            prompter: &prompter,
            platform: &platform,
            permissions: &permissions,
            env_files: &env_files,
            probe: &database,
            accounts: &database,
        },
    );
    f(&ctx)
}

/// Publish the default install config into the current directory.
pub fn install(force: bool) -> Result<InstallOutcome, AppError> {
    install_at(std::env::current_dir()?, force)
}

/// Publish the default install config under `root`.
pub fn install_at(root: impl AsRef<Path>, force: bool) -> Result<InstallOutcome, AppError> {
    install::execute(root.as_ref(), force)
}

/// Run every setup step in the current directory.
pub fn setup() -> Result<SetupOutcome, AppError> {
    setup_at(std::env::current_dir()?)
}

/// Run every setup step against the application at `root`.
pub fn setup_at(root: impl Into<PathBuf>) -> Result<SetupOutcome, AppError> {
    with_context(root.into(), setup::execute)
}

/// Run only the system check against the application at `root`.
pub fn check_at(root: impl Into<PathBuf>) -> Result<SetupOutcome, AppError> {
    with_context(root.into(), |ctx| setup::run_steps(ctx, &[SetupStep::SystemCheck]))
}

/// Probe a database without touching any configuration.
pub fn probe_database(root: impl Into<PathBuf>, params: &ConnectionParams, timeout: Duration) -> bool {
    SqlDatabase::new(root.into(), timeout).probe(params)
}
