//! `lci setup`: the ordered installer steps.
//!
//! Steps run strictly in order and the first failure ends the run. Nothing is
//! remembered between runs, so a re-run always starts from the system check.

pub mod account;
pub mod app_key;
pub mod environment;
pub mod system_check;

use std::fmt;

use crate::app::AppContext;
use crate::domain::{AppError, ConnectionParams, DbDriver, EnvDocument};
use crate::ports::EnvFileStore;

pub use account::AccountOutcome;
pub use system_check::SystemReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    SystemCheck,
    Environment,
    AppKey,
    Account,
}

impl SetupStep {
    pub const ALL: [SetupStep; 4] =
        [SetupStep::SystemCheck, SetupStep::Environment, SetupStep::AppKey, SetupStep::Account];

    pub fn name(self) -> &'static str {
        match self {
            SetupStep::SystemCheck => "System Check",
            SetupStep::Environment => "Environment Setup",
            SetupStep::AppKey => "Application Key",
            SetupStep::Account => "Admin Account",
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct SetupOutcome {
    pub completed: Vec<SetupStep>,
    pub report: Option<SystemReport>,
    pub connection: Option<ConnectionParams>,
    pub account: Option<AccountOutcome>,
}

/// Run every step.
pub fn execute(ctx: &AppContext<'_>) -> Result<SetupOutcome, AppError> {
    run_steps(ctx, &SetupStep::ALL)
}

/// Run `steps` in order, wrapping the first failure with the step's name.
pub fn run_steps(ctx: &AppContext<'_>, steps: &[SetupStep]) -> Result<SetupOutcome, AppError> {
    let mut outcome = SetupOutcome::default();

    for (index, step) in steps.iter().copied().enumerate() {
        println!("\n▶ [{}/{}] {}", index + 1, steps.len(), step);
        tracing::info!(step = step.name(), "running setup step");

        run_step(ctx, step, &mut outcome).map_err(|source| {
            tracing::error!(step = step.name(), error = %source, "setup step failed");
            AppError::StepFailed { step: step.name().to_string(), source: Box::new(source) }
        })?;
        outcome.completed.push(step);
    }

    Ok(outcome)
}

fn run_step(ctx: &AppContext<'_>, step: SetupStep, outcome: &mut SetupOutcome) -> Result<(), AppError> {
    match step {
        SetupStep::SystemCheck => outcome.report = Some(system_check::execute(ctx)?),
        SetupStep::Environment => outcome.connection = Some(environment::execute(ctx)?),
        SetupStep::AppKey => app_key::execute(ctx)?,
        SetupStep::Account => {
            let connection = match outcome.connection.clone() {
                Some(connection) => connection,
                None => connection_from_env(ctx.env_files())?,
            };
            outcome.account = Some(account::execute(ctx, &connection)?);
        }
    }
    Ok(())
}

/// Connection settings already stored in the environment file.
pub fn connection_from_env(store: &dyn EnvFileStore) -> Result<ConnectionParams, AppError> {
    let document = EnvDocument::parse(&store.read_env()?);
    let value = |key: &str| document.value(key).unwrap_or_default();

    let driver_name = value("DB_CONNECTION");
    let driver = DbDriver::from_name(&driver_name).ok_or_else(|| {
        AppError::config_error(format!(
            "Unsupported DB_CONNECTION '{}' in {}",
            driver_name,
            store.target_path().display()
        ))
    })?;
    if driver.is_file_based() {
        return Ok(ConnectionParams::sqlite(value("DB_DATABASE")));
    }

    let port = value("DB_PORT")
        .parse::<u16>()
        .ok()
        .or_else(|| driver.default_port())
        .unwrap_or_default();
    Ok(ConnectionParams {
        driver,
        host: value("DB_HOST"),
        port,
        database: value("DB_DATABASE"),
        username: value("DB_USERNAME"),
        password: value("DB_PASSWORD"),
    })
}
