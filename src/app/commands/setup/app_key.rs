use crate::app::AppContext;
use crate::domain::app_key::generate_app_key;
use crate::domain::{APP_KEY, AppError, EnvDocument};
use crate::ports::EnvFileStore;

pub fn execute(ctx: &AppContext<'_>) -> Result<(), AppError> {
    println!("🔐 Generating application key...");
    write_key(ctx.env_files(), &generate_app_key())?;
    println!("✅ Application key set.");
    Ok(())
}

/// Store `key` in the first active APP_KEY line of the environment file.
pub fn write_key(store: &dyn EnvFileStore, key: &str) -> Result<(), AppError> {
    let mut document = EnvDocument::parse(&store.read_env()?);
    if !document.set_raw(APP_KEY, key) {
        return Err(AppError::AppKeyLineMissing(store.target_path()));
    }
    store.write_env(&document.render())
}
