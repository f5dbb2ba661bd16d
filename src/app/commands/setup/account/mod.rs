//! Admin account creation from the configured form.

mod collector;
mod payload;

pub use collector::FormCollector;
pub use payload::build_record;

use chrono::Utc;

use crate::app::AppContext;
use crate::domain::form::resolve_fields;
use crate::domain::{AppError, ConnectionParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountOutcome {
    Created,
    Skipped,
}

pub fn execute(ctx: &AppContext<'_>, connection: &ConnectionParams) -> Result<AccountOutcome, AppError> {
    let account = &ctx.config().account;
    let prompter = ctx.prompter();

    if !account.enabled || account.fields.is_empty() {
        println!("ℹ️  Admin account creation is disabled in the install config.");
        return Ok(AccountOutcome::Skipped);
    }

    let (fields, malformed) = resolve_fields(&account.fields);
    for field in &malformed {
        tracing::warn!(field = %field, "skipping malformed account field");
        println!("⚠️  Skipping account {}", field);
    }
    if fields.is_empty() {
        println!("⚠️  No usable account fields configured; skipping admin account.");
        return Ok(AccountOutcome::Skipped);
    }

    if !prompter.confirm("Create an admin account now?", true)? {
        println!("⏭️  Admin account skipped.");
        return Ok(AccountOutcome::Skipped);
    }

    println!("👤 Creating admin account...");
    let collector = FormCollector::new(prompter, &fields);
    loop {
        let session = collector.collect()?;
        println!("👤 Saving admin user...");

        let saved = build_record(&fields, &session, account, Utc::now().naive_utc())
            .and_then(|record| ctx.accounts().create(connection, &record));

        match saved {
            Ok(()) => {
                println!("✅ Account created successfully!");
                return Ok(AccountOutcome::Created);
            }
            Err(err) => {
                tracing::warn!(kind = err.kind_label(), error = %err, "account insert failed");
                prompter.error(&format!("Failed to create account ({}): {}", err.kind_label(), err));
                if !prompter.confirm("Retry account creation?", true)? {
                    return Err(err.into());
                }
                println!("🔁 Retrying account creation...");
            }
        }
    }
}
