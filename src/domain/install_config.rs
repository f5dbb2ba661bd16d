//! `config/install.toml` model.

use serde::Deserialize;

use super::form::FieldDescriptor;
use super::permissions::PermissionRequirement;
use super::requirements::RequirementSpec;
use super::AppError;

/// Path of the published config, relative to the application root.
pub const INSTALL_CONFIG_PATH: &str = "config/install.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    pub min_php_version: String,
    #[serde(default)]
    pub requirements: RequirementSpec,
    #[serde(default)]
    pub permissions: Vec<PermissionRequirement>,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub account: AccountConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RuntimeConfig {
    pub php_binary: String,
    pub apache_binary: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { php_binary: "php".to_string(), apache_binary: "apachectl".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EnvironmentConfig {
    pub template: String,
    pub target: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self { template: ".env.example".to_string(), target: ".env".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { connect_timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AccountConfig {
    pub enabled: bool,
    pub table: String,
    pub timestamps: bool,
    /// Columns the insert may write. Collected keys outside the list are
    /// dropped; `None` writes every persisted field.
    pub columns: Option<Vec<String>>,
    pub fields: Vec<FieldDescriptor>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            table: "users".to_string(),
            timestamps: true,
            columns: None,
            fields: Vec::new(),
        }
    }
}

impl InstallConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: InstallConfig = toml::from_str(content)?;
        if config.min_php_version.trim().is_empty() {
            return Err(AppError::config_error("min_php_version must not be empty"));
        }
        Ok(config)
    }
}
