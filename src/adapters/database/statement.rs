//! INSERT statement text per driver.

use crate::domain::{AccountRecord, DbDriver};

pub fn quote_identifier(driver: DbDriver, name: &str) -> String {
    match driver {
        DbDriver::Mysql => format!("`{}`", name.replace('`', "``")),
        DbDriver::Sqlsrv => format!("[{}]", name.replace(']', "]]")),
        DbDriver::Pgsql | DbDriver::Sqlite => format!("\"{}\"", name.replace('"', "\"\"")),
    }
}

fn placeholder(driver: DbDriver, position: usize) -> String {
    match driver {
        DbDriver::Mysql | DbDriver::Sqlite => "?".to_string(),
        DbDriver::Pgsql => format!("${}", position),
        DbDriver::Sqlsrv => format!("@P{}", position),
    }
}

/// `INSERT INTO <table> (<columns>) VALUES (<placeholders>)` with values bound in column order.
pub fn insert_statement(driver: DbDriver, record: &AccountRecord) -> String {
    let columns: Vec<String> =
        record.columns.iter().map(|(name, _)| quote_identifier(driver, name)).collect();
    let placeholders: Vec<String> =
        (1..=record.columns.len()).map(|position| placeholder(driver, position)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(driver, &record.table),
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColumnValue;

    fn record() -> AccountRecord {
        AccountRecord {
            table: "users".to_string(),
            columns: vec![
                ("name".to_string(), ColumnValue::Text("Ada".to_string())),
                ("email".to_string(), ColumnValue::Text("ada@example.com".to_string())),
            ],
        }
    }

    #[test]
    fn placeholders_follow_driver_syntax() {
        assert_eq!(
            insert_statement(DbDriver::Mysql, &record()),
            "INSERT INTO `users` (`name`, `email`) VALUES (?, ?)"
        );
        assert_eq!(
            insert_statement(DbDriver::Pgsql, &record()),
            "INSERT INTO \"users\" (\"name\", \"email\") VALUES ($1, $2)"
        );
        assert_eq!(
            insert_statement(DbDriver::Sqlsrv, &record()),
            "INSERT INTO [users] ([name], [email]) VALUES (@P1, @P2)"
        );
        assert_eq!(
            insert_statement(DbDriver::Sqlite, &record()),
            "INSERT INTO \"users\" (\"name\", \"email\") VALUES (?, ?)"
        );
    }

    #[test]
    fn identifiers_escape_their_quote_character() {
        assert_eq!(quote_identifier(DbDriver::Mysql, "we`ird"), "`we``ird`");
        assert_eq!(quote_identifier(DbDriver::Sqlsrv, "a]b"), "[a]]b]");
    }
}
