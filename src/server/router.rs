use crate::server::routes::students;
use crate::service::StudentService;

use axum::{
    Json, Router,
    extract::Request,
    http::{
        HeaderName, HeaderValue, Method, StatusCode, Version,
        header::{CONTENT_TYPE, InvalidHeaderValue, USER_AGENT},
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use rand::RngCore;
use serde_json::json;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::Level;

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct RollbookState {
    pub students: StudentService,
}

impl RollbookState {
    pub fn new(students: StudentService) -> Self {
        Self { students }
    }
}

/// CORS for the single client origin and the four verbs the routes use.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    macro_rules! access_event {
        ($level:expr) => {
            tracing::event!(
                $level,
                "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
                status.as_u16(),
                request_id,
                method.as_str(),
                protocol,
                path,
                latency_ms,
                user_agent
            )
        };
    }

    if status.is_server_error() {
        access_event!(Level::ERROR);
    } else if status.is_client_error() {
        access_event!(Level::WARN);
    } else {
        access_event!(Level::INFO);
    }

    resp
}

pub fn rollbook_router(state: RollbookState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(students::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(access_log))
}
