mod database;
mod env_file_store;
mod permission_inspector;
mod platform_inspector;
mod prompter;

pub use database::{AccountStore, DatabaseProbe};
pub use env_file_store::EnvFileStore;
pub use permission_inspector::PermissionInspector;
pub use platform_inspector::PlatformInspector;
pub use prompter::Prompter;
