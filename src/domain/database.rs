use std::fmt;

use super::env_file::EnvOverlay;

/// Database drivers offered during environment setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbDriver {
    Mysql,
    Sqlite,
    Pgsql,
    Sqlsrv,
}

impl DbDriver {
    pub const ALL: [DbDriver; 4] = [DbDriver::Mysql, DbDriver::Sqlite, DbDriver::Pgsql, DbDriver::Sqlsrv];

    /// Name as used in `DB_CONNECTION`.
    pub fn name(self) -> &'static str {
        match self {
            DbDriver::Mysql => "mysql",
            DbDriver::Sqlite => "sqlite",
            DbDriver::Pgsql => "pgsql",
            DbDriver::Sqlsrv => "sqlsrv",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|driver| driver.name() == name)
    }

    pub fn default_port(self) -> Option<u16> {
        match self {
            DbDriver::Mysql => Some(3306),
            DbDriver::Pgsql => Some(5432),
            DbDriver::Sqlsrv => Some(1433),
            DbDriver::Sqlite => None,
        }
    }

    /// File-based drivers take only a database path.
    pub fn is_file_based(self) -> bool {
        matches!(self, DbDriver::Sqlite)
    }
}

impl fmt::Display for DbDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidate connection settings, passed explicitly to every probe or store call.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub driver: DbDriver,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionParams {
    pub fn sqlite(database: impl Into<String>) -> Self {
        Self {
            driver: DbDriver::Sqlite,
            host: String::new(),
            port: 0,
            database: database.into(),
            username: String::new(),
            password: String::new(),
        }
    }

    /// `DB_*` entries for the environment overlay.
    pub fn write_env(&self, overlay: &mut EnvOverlay) {
        overlay.insert("DB_CONNECTION", self.driver.name());
        overlay.insert("DB_DATABASE", self.database.clone());
        if self.driver.is_file_based() {
            return;
        }
        overlay.insert("DB_HOST", self.host.clone());
        overlay.insert("DB_PORT", self.port.to_string());
        overlay.insert("DB_USERNAME", self.username.clone());
        overlay.insert("DB_PASSWORD", self.password.clone());
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("driver", &self.driver)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
