//! Turning a collected form into the row to insert.

use chrono::NaiveDateTime;

use crate::domain::form::{FieldKind, FieldValue, FormField, FormSession};
use crate::domain::install_config::AccountConfig;
use crate::domain::{AccountRecord, ColumnValue, PersistenceError};

const CREATED_AT: &str = "created_at";
const UPDATED_AT: &str = "updated_at";

/// Build the account row: confirmation fields and keys outside
/// `account.columns` are dropped, passwords hashed, lists stored as JSON arrays.
pub fn build_record(
    fields: &[FormField],
    session: &FormSession,
    account: &AccountConfig,
    now: NaiveDateTime,
) -> Result<AccountRecord, PersistenceError> {
    let mut columns = Vec::new();

    for field in fields.iter().filter(|field| field.kind.is_persisted()) {
        let Some(value) = session.get(&field.key) else {
            continue;
        };
        if !account.columns.as_ref().is_none_or(|columns| columns.contains(&field.key)) {
            tracing::debug!(key = %field.key, table = %account.table, "field is not a writable column; dropped");
            continue;
        }
        let column = match (&field.kind, value) {
            (FieldKind::Password, FieldValue::Text(secret)) => ColumnValue::Text(hash_password(secret)?),
            (_, FieldValue::Text(text)) => ColumnValue::Text(text.clone()),
            (_, FieldValue::List(items)) => ColumnValue::Text(
                serde_json::to_string(items)
                    .map_err(|e| PersistenceError::Other(format!("failed to encode {}: {}", field.key, e)))?,
            ),
        };
        columns.push((field.key.clone(), column));
    }

    if account.timestamps {
        for name in [CREATED_AT, UPDATED_AT] {
            if !columns.iter().any(|(column, _)| column == name) {
                columns.push((name.to_string(), ColumnValue::Timestamp(now)));
            }
        }
    }

    Ok(AccountRecord { table: account.table.clone(), columns })
}

/// bcrypt hash in the `$2y$` flavour Laravel's hasher writes and verifies.
fn hash_password(secret: &str) -> Result<String, PersistenceError> {
    bcrypt::hash_with_result(secret, bcrypt::DEFAULT_COST)
        .map(|parts| parts.format_for_version(bcrypt::Version::TwoY))
        .map_err(|e| PersistenceError::Other(format!("failed to hash password: {}", e)))
}
