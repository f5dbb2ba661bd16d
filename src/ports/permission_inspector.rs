use crate::domain::PathState;

/// Port for reading filesystem permissions under the application root.
pub trait PermissionInspector {
    fn path_state(&self, relative: &str) -> PathState;
}
