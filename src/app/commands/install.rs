//! `lci install`: publish the default install configuration.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::assets::install_config_asset::DEFAULT_INSTALL_CONFIG;
use crate::domain::{AppError, INSTALL_CONFIG_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Published(PathBuf),
    Overwritten(PathBuf),
    /// Left untouched; `--force` was not given.
    AlreadyPresent(PathBuf),
}

impl InstallOutcome {
    pub fn path(&self) -> &Path {
        match self {
            InstallOutcome::Published(path)
            | InstallOutcome::Overwritten(path)
            | InstallOutcome::AlreadyPresent(path) => path,
        }
    }
}

pub fn execute(root: &Path, force: bool) -> Result<InstallOutcome, AppError> {
    let target = root.join(INSTALL_CONFIG_PATH);
    let existed = target.exists();
    if existed && !force {
        tracing::info!(path = %target.display(), "install config already present");
        return Ok(InstallOutcome::AlreadyPresent(target));
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, DEFAULT_INSTALL_CONFIG)?;
    tracing::info!(path = %target.display(), overwritten = existed, "published install config");

    Ok(if existed { InstallOutcome::Overwritten(target) } else { InstallOutcome::Published(target) })
}
