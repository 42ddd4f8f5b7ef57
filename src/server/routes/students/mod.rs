use crate::server::router::RollbookState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

mod extract;
pub(crate) mod handlers;

pub fn router() -> Router<RollbookState> {
    Router::new()
        .route("/", get(handlers::list_students_handler))
        .route("/create", post(handlers::create_student_handler))
        .route("/update/{id}", put(handlers::update_student_handler))
        .route("/student/{id}", delete(handlers::delete_student_handler))
}
