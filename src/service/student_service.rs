use crate::db::{DbStudent, InsertOutcome, StudentFields, StudentStore};
use crate::error::{StoreOp, StudentError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Create/update body as sent by the client. Both fields must be present and non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl StudentDraft {
    pub fn validate(self) -> Result<StudentFields, StudentError> {
        match (self.name, self.email) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Ok(StudentFields { name, email })
            }
            _ => Err(StudentError::MissingFields),
        }
    }
}

/// A path id as read against the integer ids the store assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentId {
    /// Integral value that can name a row. `1`, `1.0` and `1e0` all land here.
    Row(i64),
    /// A number no row can carry: a fraction, or outside the 64-bit range.
    Unmatchable,
    /// Not a number at all.
    NotANumber,
}

/// Reads a path id as a decimal number, surrounding blanks ignored.
///
/// Fractions and exponents are numbers; `Infinity`/`NaN` spellings and hex are not.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
pub fn parse_student_id(raw: &str) -> StudentId {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return StudentId::Row(id);
    }
    // f64 parsing also takes `inf` and `nan`.
    if raw.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return StudentId::NotANumber;
    }
    let Ok(value) = raw.parse::<f64>() else {
        return StudentId::NotANumber;
    };

    let bound = -(i64::MIN as f64);
    if value.is_finite() && value.trunc() == value && value >= -bound && value < bound {
        StudentId::Row(value as i64)
    } else {
        StudentId::Unmatchable
    }
}

/// Student operations over an injected store.
///
/// Each operation returns a tagged result; mapping to HTTP happens once in `StudentError`.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn StudentStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<DbStudent>, StudentError> {
        self.store
            .list_students()
            .await
            .map_err(StudentError::store(StoreOp::List))
    }

    /// Lookup-then-insert. The pair is not atomic; the store's unique constraint catches the
    /// race and is reported as the same conflict.
    pub async fn create(&self, draft: StudentDraft) -> Result<InsertOutcome, StudentError> {
        let fields = draft.validate()?;

        let existing = self
            .store
            .find_by_email(&fields.email)
            .await
            .map_err(StudentError::store(StoreOp::Lookup))?;
        if existing.is_some() {
            return Err(StudentError::AlreadyExists);
        }

        let outcome = match self.store.insert_student(fields).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_unique_violation() => {
                warn!(error = %e, "Student insert lost a duplicate-email race");
                return Err(StudentError::AlreadyExists);
            }
            Err(e) => return Err(StudentError::store(StoreOp::Insert)(e)),
        };

        info!(id = outcome.insert_id, "Student created");
        Ok(outcome)
    }

    /// Overwrites name/email without checking the new email against other rows.
    /// An id that cannot name a row is reported as not found without a store call.
    pub async fn update(&self, raw_id: &str, draft: StudentDraft) -> Result<(), StudentError> {
        let fields = draft.validate()?;
        let StudentId::Row(id) = parse_student_id(raw_id) else {
            return Err(StudentError::NotFound);
        };

        let affected = self
            .store
            .update_student(id, fields)
            .await
            .map_err(StudentError::store(StoreOp::Update))?;
        if affected == 0 {
            return Err(StudentError::NotFound);
        }

        info!(id, "Student updated");
        Ok(())
    }

    /// Only a non-number is an invalid id; a number that cannot name a row is not found.
    pub async fn delete(&self, raw_id: &str) -> Result<(), StudentError> {
        let id = match parse_student_id(raw_id) {
            StudentId::Row(id) => id,
            StudentId::Unmatchable => return Err(StudentError::NotFound),
            StudentId::NotANumber => return Err(StudentError::InvalidId),
        };

        let affected = self
            .store
            .delete_student(id)
            .await
            .map_err(StudentError::store(StoreOp::Delete))?;
        if affected == 0 {
            return Err(StudentError::NotFound);
        }

        info!(id, "Student deleted");
        Ok(())
    }
}
