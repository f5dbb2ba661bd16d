//! Loading the published install configuration.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{AppError, INSTALL_CONFIG_PATH, InstallConfig};

/// Read and parse `<root>/config/install.toml`.
pub fn load_install_config(root: &Path) -> Result<InstallConfig, AppError> {
    let path = root.join(INSTALL_CONFIG_PATH);
    let content = fs::read_to_string(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => AppError::ConfigMissing(path.clone()),
        _ => AppError::Io(err),
    })?;
    tracing::debug!(path = %path.display(), "loaded install config");
    InstallConfig::parse(&content)
}
