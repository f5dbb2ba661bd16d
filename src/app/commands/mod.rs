pub mod install;
pub mod setup;
