//! `.env` regeneration, application/database prompts and the connection probe loop.

use crate::app::AppContext;
use crate::domain::{APP_KEY, AppError, ConnectionParams, DbDriver, EnvDocument, EnvOverlay};
use crate::ports::{EnvFileStore, Prompter};

const APP_ENVIRONMENTS: [&str; 5] = ["local", "development", "qa", "production", "other"];
const DEFAULT_SQLITE_PATH: &str = "database/database.sqlite";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_USERNAME: &str = "root";

/// Application settings written to `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
    pub debug: bool,
    pub url: String,
}

impl AppSettings {
    fn write_env(&self, overlay: &mut EnvOverlay) {
        overlay.insert("APP_NAME", self.name.clone());
        overlay.insert("APP_ENV", self.environment.clone());
        overlay.insert("APP_DEBUG", self.debug.to_string());
        overlay.insert("APP_URL", self.url.clone());
    }
}

/// Regenerate `.env`, collect settings, probe the database and merge everything in.
///
/// Returns the connection parameters that passed the probe.
pub fn execute(ctx: &AppContext<'_>) -> Result<ConnectionParams, AppError> {
    let env_files = ctx.env_files();
    env_files.regenerate()?;
    println!(
        "♻️  {} regenerated from {}",
        env_files.target_path().display(),
        env_files.template_path().display()
    );

    let prompter = ctx.prompter();
    let settings = ask_app_settings(prompter)?;
    let driver = ask_driver(prompter)?;
    let mut params = ask_connection(prompter, driver, None)?;

    while !ctx.probe().probe(&params) {
        prompter.error("Database connection failed! Please check your credentials.");
        println!("🔁 Please re-enter your database details.");
        params = ask_connection(prompter, driver, Some(&params))?;
    }
    println!("✅ Database connection successful!");

    let overlay = build_overlay(&settings, &params);
    apply_overlay(env_files, &overlay)?;
    println!("✅ {} updated.", env_files.target_path().display());
    Ok(params)
}

/// Every setup run blanks APP_KEY so a stale key never survives regeneration.
pub fn build_overlay(settings: &AppSettings, params: &ConnectionParams) -> EnvOverlay {
    let mut overlay = EnvOverlay::new();
    settings.write_env(&mut overlay);
    overlay.insert(APP_KEY, "");
    params.write_env(&mut overlay);
    overlay
}

/// Merge `overlay` into the active environment file.
pub fn apply_overlay(store: &dyn EnvFileStore, overlay: &EnvOverlay) -> Result<(), AppError> {
    let document = EnvDocument::parse(&store.read_env()?);
    store.write_env(&document.merge(overlay).render())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn ask_app_settings(prompter: &dyn Prompter) -> Result<AppSettings, AppError> {
    let name = prompter.text("App Name", None, true)?;
    let environment = prompter.select("App Environment", &strings(&APP_ENVIRONMENTS), 0)?;
    let debug = prompter.select("App Debug", &strings(&["true", "false"]), 0)? == "true";
    let url = prompter.text("App URL", Some("https://"), true)?;
    Ok(AppSettings { name, environment, debug, url })
}

fn ask_driver(prompter: &dyn Prompter) -> Result<DbDriver, AppError> {
    let names: Vec<String> = DbDriver::ALL.iter().map(|d| d.name().to_string()).collect();
    let chosen = prompter.select("Database Connection", &names, 0)?;
    DbDriver::from_name(&chosen)
        .ok_or_else(|| AppError::Prompt(format!("unsupported database connection '{}'", chosen)))
}

/// Ask for connection details, defaulting to `previous` answers on a retry.
fn ask_connection(
    prompter: &dyn Prompter,
    driver: DbDriver,
    previous: Option<&ConnectionParams>,
) -> Result<ConnectionParams, AppError> {
    if driver.is_file_based() {
        let default = previous.map(|p| p.database.as_str()).unwrap_or(DEFAULT_SQLITE_PATH);
        let database = prompter.text("Database Path", Some(default), true)?;
        return Ok(ConnectionParams::sqlite(database));
    }

    let host = prompter.text(
        "Database Host",
        Some(previous.map(|p| p.host.as_str()).unwrap_or(DEFAULT_HOST)),
        true,
    )?;
    let port = ask_port(prompter, driver, previous)?;
    let database =
        prompter.text("Database Name", previous.map(|p| p.database.as_str()), true)?;
    let username = prompter.text(
        "Database User Name",
        Some(previous.map(|p| p.username.as_str()).unwrap_or(DEFAULT_USERNAME)),
        true,
    )?;
    let password = prompter.password("Database Password (Leave empty if no password)", false)?;

    Ok(ConnectionParams { driver, host, port, database, username, password })
}

fn ask_port(
    prompter: &dyn Prompter,
    driver: DbDriver,
    previous: Option<&ConnectionParams>,
) -> Result<u16, AppError> {
    let default = previous
        .map(|p| p.port)
        .or_else(|| driver.default_port())
        .map(|port| port.to_string());
    loop {
        let answer = prompter.text("DB Port", default.as_deref(), true)?;
        match answer.trim().parse::<u16>() {
            Ok(port) if port > 0 => return Ok(port),
            _ => prompter.error("The port must be a number between 1 and 65535."),
        }
    }
}
