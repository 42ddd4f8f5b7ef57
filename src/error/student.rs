use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

use super::StoreError;

/// The store call that failed, used to pick the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Lookup,
    Insert,
    Update,
    Delete,
}

impl StoreOp {
    fn client_message(self) -> &'static str {
        match self {
            StoreOp::List => "Failed to fetch students",
            StoreOp::Lookup => "Error checking for existing student",
            StoreOp::Insert => "Failed to create student",
            StoreOp::Update => "Failed to update student",
            StoreOp::Delete => "Failed to delete student",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::List => "list",
            StoreOp::Lookup => "lookup",
            StoreOp::Insert => "insert",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Outcome of a rejected student operation. Every variant maps to exactly one HTTP status.
#[derive(Debug, ThisError)]
pub enum StudentError {
    #[error("name and email are required")]
    MissingFields,

    #[error("invalid id")]
    InvalidId,

    #[error("a student with this email already exists")]
    AlreadyExists,

    #[error("student not found")]
    NotFound,

    #[error("store {op} failed: {source}")]
    Store {
        op: StoreOp,
        #[source]
        source: StoreError,
    },
}

impl StudentError {
    pub fn store(op: StoreOp) -> impl FnOnce(StoreError) -> Self {
        move |source| StudentError::Store { op, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            StudentError::MissingFields
            | StudentError::InvalidId
            | StudentError::AlreadyExists => StatusCode::BAD_REQUEST,
            StudentError::NotFound => StatusCode::NOT_FOUND,
            StudentError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Store details never leave the process.
    pub fn client_message(&self) -> &'static str {
        match self {
            StudentError::MissingFields => "Name and email are required",
            StudentError::InvalidId => "Invalid ID provided",
            StudentError::AlreadyExists => "Student with this email already exists",
            StudentError::NotFound => "Student not found",
            StudentError::Store { op, .. } => op.client_message(),
        }
    }
}

/// Malformed bodies are reported the same way as missing fields.
impl From<JsonRejection> for StudentError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Student request body rejected");
        StudentError::MissingFields
    }
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            StudentError::Store { op, source } => {
                tracing::error!(op = %op, error = %source, "Student store error");
            }
            other => {
                tracing::warn!(status = %status, reason = %other, "Student request rejected");
            }
        }
        (
            status,
            Json(ApiErrorBody {
                error: self.client_message(),
            }),
        )
            .into_response()
    }
}

/// Standardized API error response body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: &'static str,
}
