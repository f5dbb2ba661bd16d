use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::AppError;
use crate::domain::install_config::EnvironmentConfig;
use crate::ports::EnvFileStore;

/// `.env` template and target files under the application root.
#[derive(Debug, Clone)]
pub struct FilesystemEnvStore {
    template: PathBuf,
    target: PathBuf,
}

impl FilesystemEnvStore {
    pub fn new(root: PathBuf, environment: &EnvironmentConfig) -> Self {
        Self { template: root.join(&environment.template), target: root.join(&environment.target) }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".lci-tmp");
        self.target.with_file_name(name)
    }
}

impl EnvFileStore for FilesystemEnvStore {
    fn template_path(&self) -> PathBuf {
        self.template.clone()
    }

    fn target_path(&self) -> PathBuf {
        self.target.clone()
    }

    fn regenerate(&self) -> Result<(), AppError> {
        if !self.template.is_file() {
            return Err(AppError::EnvTemplateMissing(self.template.clone()));
        }
        match fs::remove_file(&self.target) {
            Ok(()) => tracing::debug!(path = %self.target.display(), "removed existing environment file"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        fs::copy(&self.template, &self.target)?;
        Ok(())
    }

    fn read_env(&self) -> Result<String, AppError> {
        fs::read_to_string(&self.target).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => AppError::EnvFileMissing(self.target.clone()),
            _ => AppError::Io(err),
        })
    }

    fn write_env(&self, content: &str) -> Result<(), AppError> {
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        if let Err(err) = fs::rename(&temp, &self.target) {
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FilesystemEnvStore {
        FilesystemEnvStore::new(dir.path().to_path_buf(), &EnvironmentConfig::default())
    }

    #[test]
    fn regenerate_replaces_target_with_template() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.example"), "APP_NAME=Laravel\n").unwrap();
        fs::write(dir.path().join(".env"), "STALE=1\n").unwrap();

        let store = store(&dir);
        store.regenerate().unwrap();
        assert_eq!(store.read_env().unwrap(), "APP_NAME=Laravel\n");
    }

    #[test]
    fn regenerate_without_template_fails() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).regenerate().unwrap_err();
        assert!(matches!(err, AppError::EnvTemplateMissing(_)));
    }

    #[test]
    fn read_missing_target_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(store(&dir).read_env().unwrap_err(), AppError::EnvFileMissing(_)));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.write_env("APP_KEY=\n").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(".env")).unwrap(), "APP_KEY=\n");
        assert!(!dir.path().join(".env.lci-tmp").exists());
    }
}
