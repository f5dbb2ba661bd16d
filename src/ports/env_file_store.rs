use std::path::PathBuf;

use crate::domain::AppError;

/// Port for the template and active environment files.
pub trait EnvFileStore {
    fn template_path(&self) -> PathBuf;

    fn target_path(&self) -> PathBuf;

    /// Delete any active file and copy the template in its place.
    fn regenerate(&self) -> Result<(), AppError>;

    /// Read the active file; fails with `EnvFileMissing` when absent.
    fn read_env(&self) -> Result<String, AppError>;

    /// Replace the active file atomically.
    fn write_env(&self, content: &str) -> Result<(), AppError>;
}
