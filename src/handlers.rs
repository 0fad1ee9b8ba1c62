use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::constants::ROOT_MESSAGE;

/// `GET /` liveness response
pub async fn default_root_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "message": ROOT_MESSAGE })))
}

/// Empty 204, used for `/favicon.ico` so browsers stop retrying
pub async fn no_content_handler() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
