use std::fs;
use std::path::PathBuf;

use crate::domain::PathState;
use crate::ports::PermissionInspector;

/// Reads permission bits from the local filesystem.
#[derive(Debug, Clone)]
pub struct FilesystemPermissionInspector {
    root: PathBuf,
}

impl FilesystemPermissionInspector {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl PermissionInspector for FilesystemPermissionInspector {
    fn path_state(&self, relative: &str) -> PathState {
        let Ok(metadata) = fs::metadata(self.root.join(relative)) else {
            return PathState::Missing;
        };

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            PathState::Mode(metadata.permissions().mode() & 0o7777)
        }

        #[cfg(not(unix))]
        {
            PathState::Writable(!metadata.permissions().readonly())
        }
    }
}
