//! lci: interactive installer for Laravel applications.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AccountOutcome, ConnectionParams, DbDriver, InstallOutcome, SetupOutcome, SetupStep,
    SystemReport, check_at, install, install_at, probe_database, setup, setup_at,
};
pub use domain::AppError;
