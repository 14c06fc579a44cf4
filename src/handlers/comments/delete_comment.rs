use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    domain::comment::CommentViewer,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err, store_err},
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    store::ports::{CommentStore, UserStore},
};

#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    params(
        ("comment_id" = Uuid, Path, description = "ID of the comment to delete")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized", body = CodeErrorResp),
        (status = 403, description = "Requester is neither the seller nor a moderator", body = CodeErrorResp),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    ),
    security(("token" = []))
)]
pub async fn delete_comment(
    Extension(auth_status): Extension<AuthStatus>,
    State(state): State<Arc<ServerState>>,
    Path(comment_id): Path<Uuid>,
) -> HandlerResponse<Response> {
    let requester_id: Uuid = match auth_status {
        AuthStatus::LoggedIn(id) => id,
        AuthStatus::LoggedOut => {
            return Err(code_err(
                CodeError::UNAUTHORIZED_ACCESS,
                "Unauthorized deletion request!",
            ));
        }
    };

    let store = state.store();

    let Some(comment) = store
        .find_comment(comment_id)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?
    else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let requester = store
        .find_user(requester_id)
        .await
        .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    let allowed = match &requester {
        Some(user) => user.can_delete(&comment),
        None => false,
    };

    if !allowed {
        return Err(code_err(
            CodeError::FORBIDDEN_DELETION,
            format!("User {requester_id} may not delete comment {comment_id}"),
        ));
    }

    let deleted: bool = store
        .delete_comment(comment_id)
        .await
        .map_err(|e| store_err(CodeError::DB_DELETION_ERROR, e))?;

    // removed by someone else between the lookup and the delete
    if !deleted {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }

    tracing::info!(
        deleted_comment_id = %comment_id,
        requester_id = %requester_id,
        "Comment deleted"
    );

    Ok(StatusCode::NO_CONTENT.into_response())
}
