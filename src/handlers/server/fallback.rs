use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_derive::Serialize;

#[derive(Serialize)]
pub struct FallbackHandlerResponse<'a> {
    message: &'a str,
}

pub async fn fallback_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(FallbackHandlerResponse {
            message: "Invalid path! Probes, go away.",
        }),
    )
}
