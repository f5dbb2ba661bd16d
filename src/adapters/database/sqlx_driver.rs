//! MySQL, PostgreSQL and SQLite access through sqlx.

use std::path::Path;

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use crate::domain::{AccountRecord, ColumnValue, ConnectionParams, DbDriver, PersistenceError};

fn mysql_options(params: &ConnectionParams) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .database(&params.database)
        .username(&params.username)
        .password(&params.password)
}

fn pg_options(params: &ConnectionParams) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&params.host)
        .port(params.port)
        .database(&params.database)
        .username(&params.username)
        .password(&params.password)
}

fn sqlite_options(root: &Path, params: &ConnectionParams) -> SqliteConnectOptions {
    SqliteConnectOptions::new().filename(root.join(&params.database)).create_if_missing(false)
}

/// Open a connection and close it again.
pub async fn ping(root: &Path, params: &ConnectionParams) -> Result<(), sqlx::Error> {
    match params.driver {
        DbDriver::Mysql => mysql_options(params).connect().await?.close().await,
        DbDriver::Pgsql => pg_options(params).connect().await?.close().await,
        DbDriver::Sqlite => sqlite_options(root, params).connect().await?.close().await,
        DbDriver::Sqlsrv => Err(sqlx::Error::Configuration("sqlsrv is not handled by sqlx".into())),
    }
}

macro_rules! bind_all {
    ($sql:expr, $record:expr) => {{
        let mut query = sqlx::query($sql);
        for (_, value) in &$record.columns {
            query = match value {
                ColumnValue::Text(text) => query.bind(text.as_str()),
                ColumnValue::Timestamp(at) => query.bind(*at),
            };
        }
        query
    }};
}

pub async fn insert(
    root: &Path,
    params: &ConnectionParams,
    sql: &str,
    record: &AccountRecord,
) -> Result<(), sqlx::Error> {
    match params.driver {
        DbDriver::Mysql => {
            let mut conn: MySqlConnection = mysql_options(params).connect().await?;
            bind_all!(sql, record).execute(&mut conn).await?;
            conn.close().await
        }
        DbDriver::Pgsql => {
            let mut conn: PgConnection = pg_options(params).connect().await?;
            bind_all!(sql, record).execute(&mut conn).await?;
            conn.close().await
        }
        DbDriver::Sqlite => {
            let mut conn: SqliteConnection = sqlite_options(root, params).connect().await?;
            bind_all!(sql, record).execute(&mut conn).await?;
            conn.close().await
        }
        DbDriver::Sqlsrv => Err(sqlx::Error::Configuration("sqlsrv is not handled by sqlx".into())),
    }
}

/// Map a sqlx failure onto a typed persistence error.
pub fn classify(driver: DbDriver, err: sqlx::Error) -> PersistenceError {
    match err {
        sqlx::Error::Database(db) => {
            let code = db.code().map(|c| c.into_owned());
            let message = db.message().to_string();
            match driver {
                DbDriver::Sqlite => PersistenceError::from_sqlite_code(code.as_deref(), message),
                _ => PersistenceError::from_sqlstate(code.as_deref(), message),
            }
        }
        err @ (sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut) => {
            PersistenceError::Connection(err.to_string())
        }
        other => PersistenceError::Other(other.to_string()),
    }
}
