use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::{
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
};

#[derive(Serialize, ToSchema)]
pub struct RootHandlerResponse {
    app_name_version: String,
    server_uptime: String,
    responses_handled: u64,
    store_backend: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/healthcheck/state",
    tag = "server",
    responses(
        (status = 200, description = "Server state and store connectivity", body = RootHandlerResponse),
        (status = 500, description = "Store unreachable", body = CodeErrorResp)
    )
)]
pub async fn root_handler(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    state
        .store()
        .check_connection()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    Ok(Json(RootHandlerResponse {
        app_name_version: state.get_app_name_version(),
        server_uptime: format!("{:?}", state.get_uptime()),
        responses_handled: state.get_responses_handled(),
        store_backend: state.store().backend_name(),
    }))
}
