use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::EnvFileStore;

#[derive(Default)]
pub struct MemoryEnvStore {
    template: Mutex<Option<String>>,
    content: Mutex<Option<String>>,
}

impl MemoryEnvStore {
    pub fn set_template(&self, template: &str) {
        *self.template.lock().unwrap() = Some(template.to_string());
    }

    pub fn set_content(&self, content: &str) {
        *self.content.lock().unwrap() = Some(content.to_string());
    }

    /// Current active file, `None` if never written.
    pub fn content(&self) -> Option<String> {
        self.content.lock().unwrap().clone()
    }
}

impl EnvFileStore for MemoryEnvStore {
    fn template_path(&self) -> PathBuf {
        PathBuf::from(".env.example")
    }

    fn target_path(&self) -> PathBuf {
        PathBuf::from(".env")
    }

    fn regenerate(&self) -> Result<(), AppError> {
        let template =
            self.template.lock().unwrap().clone().ok_or_else(|| AppError::EnvTemplateMissing(self.template_path()))?;
        *self.content.lock().unwrap() = Some(template);
        Ok(())
    }

    fn read_env(&self) -> Result<String, AppError> {
        self.content().ok_or_else(|| AppError::EnvFileMissing(self.target_path()))
    }

    fn write_env(&self, content: &str) -> Result<(), AppError> {
        self.set_content(content);
        Ok(())
    }
}
