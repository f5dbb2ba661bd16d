pub mod assets;
pub mod database;
pub mod dialoguer_prompter;
pub mod env_filesystem;
pub mod permissions_filesystem;
pub mod php_cli;
