//! Database adapter: connection probing and account inserts for every supported driver.
//!
//! Each call builds its own current-thread tokio runtime, so no connection or
//! configuration outlives the call that used it.

mod mssql;
mod sqlx_driver;
pub mod statement;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::{AccountRecord, ConnectionParams, DbDriver, PersistenceError};
use crate::ports::{AccountStore, DatabaseProbe};

#[derive(Debug, Clone)]
pub struct SqlDatabase {
    root: PathBuf,
    timeout: Duration,
}

enum CallError<E> {
    Driver(E),
    TimedOut,
    Runtime(std::io::Error),
}

impl SqlDatabase {
    /// `root` anchors relative SQLite database paths.
    pub fn new(root: PathBuf, timeout: Duration) -> Self {
        Self { root, timeout }
    }

    fn block_on<T, E, F>(&self, future: F) -> Result<T, CallError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CallError::Runtime)?;
        runtime.block_on(async {
            match tokio::time::timeout(self.timeout, future).await {
                Ok(result) => result.map_err(CallError::Driver),
                Err(_) => Err(CallError::TimedOut),
            }
        })
    }
}

impl DatabaseProbe for SqlDatabase {
    fn probe(&self, params: &ConnectionParams) -> bool {
        tracing::info!(driver = %params.driver, host = %params.host, port = params.port, "probing database connection");
        let outcome = match params.driver {
            DbDriver::Sqlsrv => self.block_on(mssql::ping(params)).map_err(|e| describe(e, |d| d.to_string())),
            _ => self
                .block_on(sqlx_driver::ping(&self.root, params))
                .map_err(|e| describe(e, |d| d.to_string())),
        };
        match outcome {
            Ok(()) => true,
            Err(reason) => {
                tracing::debug!(driver = %params.driver, reason = %reason, "database probe failed");
                false
            }
        }
    }
}

impl AccountStore for SqlDatabase {
    fn create(&self, params: &ConnectionParams, record: &AccountRecord) -> Result<(), PersistenceError> {
        let sql = statement::insert_statement(params.driver, record);
        tracing::debug!(driver = %params.driver, sql = %sql, "inserting account record");

        let driver = params.driver;
        match driver {
            DbDriver::Sqlsrv => self
                .block_on(mssql::insert(params, &sql, record))
                .map_err(|e| persistence_error(e, mssql::classify)),
            _ => self
                .block_on(sqlx_driver::insert(&self.root, params, &sql, record))
                .map_err(|e| persistence_error(e, |d| sqlx_driver::classify(driver, d))),
        }
    }
}

fn describe<E>(err: CallError<E>, driver: impl FnOnce(E) -> String) -> String {
    match err {
        CallError::Driver(e) => driver(e),
        CallError::TimedOut => "connection attempt timed out".to_string(),
        CallError::Runtime(e) => format!("failed to start async runtime: {}", e),
    }
}

fn persistence_error<E>(err: CallError<E>, classify: impl FnOnce(E) -> PersistenceError) -> PersistenceError {
    match err {
        CallError::Driver(e) => classify(e),
        CallError::TimedOut => PersistenceError::Connection("connection attempt timed out".to_string()),
        CallError::Runtime(e) => PersistenceError::Other(format!("failed to start async runtime: {}", e)),
    }
}
