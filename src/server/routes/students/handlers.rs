use super::extract::StudentBody;
use crate::db::{DbStudent, InsertOutcome};
use crate::error::StudentError;
use crate::server::router::RollbookState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub message: &'static str,
    pub data: InsertOutcome,
}

/// GET /
pub(crate) async fn list_students_handler(
    State(state): State<RollbookState>,
) -> Result<Json<Vec<DbStudent>>, StudentError> {
    let students = state.students.list().await?;
    Ok(Json(students))
}

/// POST /create
pub(crate) async fn create_student_handler(
    State(state): State<RollbookState>,
    StudentBody(draft): StudentBody,
) -> Result<(StatusCode, Json<CreatedBody>), StudentError> {
    let data = state.students.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            message: "Student created successfully",
            data,
        }),
    ))
}

/// PUT /update/{id}
pub(crate) async fn update_student_handler(
    State(state): State<RollbookState>,
    Path(id): Path<String>,
    StudentBody(draft): StudentBody,
) -> Result<Json<MessageBody>, StudentError> {
    state.students.update(&id, draft).await?;
    Ok(Json(MessageBody {
        message: "Student updated successfully",
    }))
}

/// DELETE /student/{id}
pub(crate) async fn delete_student_handler(
    State(state): State<RollbookState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, StudentError> {
    state.students.delete(&id).await?;
    Ok(Json(MessageBody {
        message: "Student deleted successfully",
    }))
}
