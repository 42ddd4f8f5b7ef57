//! SQL DDL for bootstrapping the `student` table, and the per-backend statements around it.
//! Column names match the table the existing client was built against.

/// SQLite flavour.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS student (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL,
    Email TEXT NOT NULL UNIQUE
)
"#;

/// MySQL flavour.
pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS student (
    ID INT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    Name VARCHAR(255) NOT NULL,
    Email VARCHAR(255) NOT NULL UNIQUE
)
"#;

/// Store engine named by the database URL's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    MySql,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Self {
        if database_url.starts_with("mysql:") || database_url.starts_with("mariadb:") {
            Backend::MySql
        } else {
            Backend::Sqlite
        }
    }

    pub fn init_sql(self) -> &'static str {
        match self {
            Backend::Sqlite => SQLITE_INIT,
            Backend::MySql => MYSQL_INIT,
        }
    }

    /// Id generated by the last insert on the current connection, as a signed 64-bit integer.
    pub fn last_insert_id_sql(self) -> &'static str {
        match self {
            Backend::Sqlite => "SELECT last_insert_rowid()",
            Backend::MySql => "SELECT CAST(LAST_INSERT_ID() AS SIGNED)",
        }
    }
}
