pub mod app_key;
pub mod database;
pub mod env_file;
pub mod error;
pub mod form;
pub mod install_config;
pub mod permissions;
pub mod persistence;
pub mod requirements;
pub mod version;

pub use database::{ConnectionParams, DbDriver};
pub use env_file::{APP_KEY, EnvDocument, EnvLine, EnvOverlay};
pub use error::AppError;
pub use install_config::{INSTALL_CONFIG_PATH, InstallConfig};
pub use permissions::{PathState, PermissionFailure, PermissionRequirement, PermissionStatus};
pub use persistence::{AccountRecord, ColumnValue, PersistenceError};
pub use requirements::{InstalledCapabilities, RequirementResult, RequirementSpec};
pub use version::{Version, VersionCheck};
