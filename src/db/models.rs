use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `student` table, serialized with the table's column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbStudent {
    #[serde(rename = "ID")]
    #[sqlx(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    #[sqlx(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    #[sqlx(rename = "Email")]
    pub email: String,
}

/// Validated name/email pair written by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
}

/// Write result of an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Store-assigned id.
    pub insert_id: i64,
    pub affected_rows: u64,
}
