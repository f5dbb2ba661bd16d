//! Admin account records and typed persistence failures.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A single column value for the account insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Text(String),
    Timestamp(NaiveDateTime),
}

/// Row to insert into the account table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub table: String,
    pub columns: Vec<(String, ColumnValue)>,
}

impl AccountRecord {
    pub fn column(&self, name: &str) -> Option<&ColumnValue> {
        self.columns.iter().find(|(column, _)| column == name).map(|(_, value)| value)
    }
}

/// Failure to save the admin account, classified by driver error code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// Unique, not-null, foreign-key or check constraint rejected the row.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Table or column does not exist.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Other(String),
}

impl PersistenceError {
    /// Classify by SQLSTATE (MySQL, PostgreSQL).
    pub fn from_sqlstate(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some(code) if code.starts_with("23") => Self::ConstraintViolation(message),
            Some("42S02" | "42S22" | "42703" | "42P01") => Self::SchemaMismatch(message),
            Some(code) if code.starts_with("08") => Self::Connection(message),
            _ => Self::Other(message),
        }
    }

    /// Classify by SQLite primary result code.
    pub fn from_sqlite_code(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        let primary = code.and_then(|c| c.parse::<i32>().ok()).map(|c| c & 0xff);
        match primary {
            // SQLITE_CONSTRAINT
            Some(19) => Self::ConstraintViolation(message),
            // SQLITE_CANTOPEN
            Some(14) => Self::Connection(message),
            // SQLITE_ERROR covers unknown tables and columns
            Some(1) => Self::SchemaMismatch(message),
            _ => Self::Other(message),
        }
    }

    /// Classify by SQL Server error number.
    pub fn from_mssql_code(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            515 | 547 | 2601 | 2627 => Self::ConstraintViolation(message),
            207 | 208 => Self::SchemaMismatch(message),
            _ => Self::Other(message),
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::ConstraintViolation(_) => "constraint violation",
            Self::SchemaMismatch(_) => "schema mismatch",
            Self::Connection(_) => "connection",
            Self::Other(_) => "other",
        }
    }
}
