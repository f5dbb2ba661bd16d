use crate::domain::AppError;

/// Port for inspecting the PHP runtime and web server of the host.
pub trait PlatformInspector {
    /// Full PHP version string (e.g. "8.2.4-1ubuntu2").
    ///
    /// Fails with `RuntimeNotFound` when the PHP executable cannot be run.
    fn php_version(&self) -> Result<String, AppError>;

    /// Loaded PHP extensions; `None` when PHP cannot be inspected.
    fn php_extensions(&self) -> Option<Vec<String>>;

    /// Loaded Apache modules; `None` when Apache is not available on this host.
    fn apache_modules(&self) -> Option<Vec<String>>;
}
