//! SQL Server access through tiberius.

use tiberius::{AuthMethod, Client, Config, ToSql};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::domain::{AccountRecord, ColumnValue, ConnectionParams, PersistenceError};

async fn connect(params: &ConnectionParams) -> Result<Client<Compat<TcpStream>>, tiberius::error::Error> {
    let mut config = Config::new();
    config.host(&params.host);
    config.port(params.port);
    config.database(&params.database);
    config.authentication(AuthMethod::sql_server(&params.username, &params.password));
    config.trust_cert();

    let tcp = TcpStream::connect(config.get_addr()).await?;
    tcp.set_nodelay(true)?;
    Client::connect(config, tcp.compat_write()).await
}

pub async fn ping(params: &ConnectionParams) -> Result<(), tiberius::error::Error> {
    let client = connect(params).await?;
    client.close().await
}

pub async fn insert(
    params: &ConnectionParams,
    sql: &str,
    record: &AccountRecord,
) -> Result<(), tiberius::error::Error> {
    let mut client = connect(params).await?;
    let values: Vec<&dyn ToSql> = record
        .columns
        .iter()
        .map(|(_, value)| match value {
            ColumnValue::Text(text) => text as &dyn ToSql,
            ColumnValue::Timestamp(at) => at as &dyn ToSql,
        })
        .collect();
    client.execute(sql, &values).await?;
    client.close().await
}

pub fn classify(err: tiberius::error::Error) -> PersistenceError {
    match err {
        tiberius::error::Error::Server(token) => {
            PersistenceError::from_mssql_code(token.code(), token.message().to_string())
        }
        err @ (tiberius::error::Error::Io { .. }
        | tiberius::error::Error::Tls(_)
        | tiberius::error::Error::Routing { .. }) => PersistenceError::Connection(err.to_string()),
        other => PersistenceError::Other(other.to_string()),
    }
}
