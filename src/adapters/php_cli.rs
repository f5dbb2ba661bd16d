use std::process::Command;

use crate::domain::AppError;
use crate::domain::install_config::RuntimeConfig;
use crate::ports::PlatformInspector;

/// Inspects PHP and Apache by running their command-line tools.
#[derive(Debug, Clone)]
pub struct PhpCliInspector {
    php_binary: String,
    apache_binary: String,
}

impl PhpCliInspector {
    pub fn new(runtime: &RuntimeConfig) -> Self {
        Self { php_binary: runtime.php_binary.clone(), apache_binary: runtime.apache_binary.clone() }
    }

    fn run(binary: &str, args: &[&str]) -> Option<String> {
        let output = match Command::new(binary).args(args).output() {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(binary, error = %err, "failed to spawn");
                return None;
            }
        };
        if !output.status.success() {
            tracing::debug!(
                binary,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "command exited unsuccessfully"
            );
            return None;
        }
        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PlatformInspector for PhpCliInspector {
    fn php_version(&self) -> Result<String, AppError> {
        Self::run(&self.php_binary, &["-r", "echo PHP_VERSION;"])
            .map(|out| out.trim().to_string())
            .filter(|version| !version.is_empty())
            .ok_or_else(|| AppError::RuntimeNotFound(self.php_binary.clone()))
    }

    fn php_extensions(&self) -> Option<Vec<String>> {
        Self::run(&self.php_binary, &["-m"]).map(|out| parse_php_modules(&out))
    }

    fn apache_modules(&self) -> Option<Vec<String>> {
        let binary = which::which(&self.apache_binary).ok()?;
        let binary = binary.to_string_lossy();
        Self::run(&binary, &["-M"]).map(|out| parse_apache_modules(&out))
    }
}

/// Parse `php -m` output, skipping the `[PHP Modules]` style section headers.
pub fn parse_php_modules(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(str::to_string)
        .collect()
}

/// Parse `apachectl -M` output (" rewrite_module (shared)") into `mod_rewrite` style names.
pub fn parse_apache_modules(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|name| name.strip_suffix("_module"))
        .map(|name| format!("mod_{}", name))
        .collect()
}
