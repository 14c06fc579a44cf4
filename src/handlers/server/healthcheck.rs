use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::build_info::{AXUM_VERSION, BUILD_TIME};

#[derive(Serialize, ToSchema)]
pub struct ServerHealthcheckResponse {
    pub build_time: &'static str,
    pub axum_version: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/healthcheck/server",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = ServerHealthcheckResponse)
    )
)]
pub async fn healthcheck() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ServerHealthcheckResponse {
            build_time: BUILD_TIME,
            axum_version: AXUM_VERSION,
        }),
    )
}
