use super::models::{DbStudent, InsertOutcome, StudentFields};
use crate::error::StoreError;
use async_trait::async_trait;

/// Parameterized access to the `student` table.
///
/// Reads return rows; writes return the affected-row count (plus the generated id for inserts).
/// Implementations make no existence or uniqueness decisions; that is left to `StudentService`.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All rows in the store's natural (id) order.
    async fn list_students(&self) -> Result<Vec<DbStudent>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<DbStudent>, StoreError>;

    async fn insert_student(&self, fields: StudentFields) -> Result<InsertOutcome, StoreError>;

    /// Returns the number of rows updated.
    async fn update_student(&self, id: i64, fields: StudentFields) -> Result<u64, StoreError>;

    /// Returns the number of rows deleted.
    async fn delete_student(&self, id: i64) -> Result<u64, StoreError>;
}
